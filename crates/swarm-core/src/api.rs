//! Query Entry Points
//!
//! Operations invoked from outside the tick loop (UI or automation): id
//! search, deletion, predicate search, shortest path, and the drone
//! lifecycle hooks. Misses are outcomes reported in the return value,
//! never errors; every operation emits a metrics record.

use bevy_ecs::prelude::*;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info};

use swarm_events::{MetricsRecord, NetworkSummary, OperationKind, OperationRecord, PathQueryRecord};

use crate::comms::{DirectoryPair, NetworkId, NetworkPair};
use crate::components::drone::{Alive, Drone, DroneId, DroneRecord, Temperature};
use crate::components::roster::DroneRoster;
use crate::components::world::{Position, Vec2};
use crate::config::Config;
use crate::output::MetricsSink;
use crate::systems::SelfDestructQueue;
use crate::{SimRng, SimulationState};

/// Outcome of an id search: whether the drone was found, where it was, and
/// the simulated time the lookup took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub found: bool,
    pub position: Option<Vec2>,
    pub elapsed: f32,
}

/// Outcome of a predicate search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredicateReport {
    pub found: bool,
    pub position: Option<Vec2>,
}

fn current_tick(world: &World) -> u64 {
    world
        .get_resource::<SimulationState>()
        .map(|state| state.current_tick)
        .unwrap_or(0)
}

fn emit(world: &mut World, record: MetricsRecord) {
    if let Some(mut sink) = world.get_resource_mut::<MetricsSink>() {
        if let Err(e) = sink.log(&record) {
            tracing::warn!("failed to write metrics record: {}", e);
        }
    }
}

/// Looks a drone up by id across both directories.
pub fn search_by_id(world: &mut World, id: u32) -> SearchReport {
    let tick = current_tick(world);
    let outcome = world.resource::<DirectoryPair>().search_by_id(id);
    let found = outcome.record.is_some();

    if found {
        debug!(id, cost = outcome.cost, "drone located");
    } else {
        info!(id, cost = outcome.cost, "drone not found");
    }

    emit(
        world,
        MetricsRecord::Operation(OperationRecord {
            op: OperationKind::Search,
            drone_id: Some(id),
            step_cost: outcome.cost,
            total_cost: outcome.cost,
            found,
            tick,
        }),
    );

    SearchReport {
        found,
        position: outcome.record.map(|r| r.position),
        elapsed: outcome.cost,
    }
}

/// Deletes a drone by id: removes it from its directory, unlinks it from
/// the roster and both networks, and despawns the entity.
pub fn delete_by_id(world: &mut World, id: u32) -> bool {
    let tick = current_tick(world);
    let (removed, cost) = world.resource_mut::<DirectoryPair>().delete_by_id(id);

    if let Some(record) = removed {
        world.resource_mut::<DroneRoster>().remove(record.id);
        world.resource_mut::<NetworkPair>().remove_node(record.id);

        let entity = {
            let mut query = world.query::<(Entity, &DroneId)>();
            query
                .iter(world)
                .find(|(_, drone_id)| drone_id.0 == record.id)
                .map(|(entity, _)| entity)
        };
        if let Some(entity) = entity {
            world.despawn(entity);
        }
        info!(id, cost, "drone deleted");
    } else {
        info!(id, cost, "drone not found for deletion");
    }

    emit(
        world,
        MetricsRecord::Operation(OperationRecord {
            op: OperationKind::Delete,
            drone_id: Some(id),
            step_cost: cost,
            total_cost: cost,
            found: removed.is_some(),
            tick,
        }),
    );

    removed.is_some()
}

/// Exhaustive search for the first drone matching a predicate.
pub fn search_by_predicate<F>(world: &mut World, predicate: F) -> PredicateReport
where
    F: Fn(&DroneRecord) -> bool,
{
    let tick = current_tick(world);
    let outcome = world.resource::<DirectoryPair>().search_by_predicate(predicate);
    let found = outcome.record.is_some();

    if found {
        debug!(cost = outcome.cost, "predicate matched a drone");
    } else {
        info!(cost = outcome.cost, "no drone matched the predicate");
    }

    emit(
        world,
        MetricsRecord::Operation(OperationRecord {
            op: OperationKind::PredicateSearch,
            drone_id: None,
            step_cost: outcome.cost,
            total_cost: outcome.cost,
            found,
            tick,
        }),
    );

    PredicateReport {
        found,
        position: outcome.record.map(|r| r.position),
    }
}

/// Finds the shortest path between two drones on one of the networks,
/// measuring the wall-clock latency of the search.
pub fn shortest_path(
    world: &mut World,
    network: NetworkId,
    start_id: u32,
    target_id: u32,
) -> Option<Vec<u32>> {
    let tick = current_tick(world);
    let started = Instant::now();
    let path = world
        .resource::<NetworkPair>()
        .get(network)
        .shortest_path(start_id, target_id);
    let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;

    match &path {
        Some(p) => debug!(
            start_id,
            target_id,
            hops = p.len().saturating_sub(1),
            elapsed_ms,
            "path found"
        ),
        None => info!(start_id, target_id, elapsed_ms, "no path between drones"),
    }

    emit(
        world,
        MetricsRecord::Path(PathQueryRecord {
            start_id,
            target_id,
            elapsed_ms,
            found: path.is_some(),
            tick,
        }),
    );

    path
}

/// Summarizes a network's shape, probing BFS latency between its first and
/// last nodes when it has more than one.
pub fn network_performance(world: &mut World, network: NetworkId) -> NetworkSummary {
    let (node_count, edge_count, average_degree, probe) = {
        let net = world.resource::<NetworkPair>().get(network);
        let nodes = net.nodes();
        let probe = match (nodes.first(), nodes.last()) {
            (Some(&first), Some(&last)) if nodes.len() > 1 => Some((first, last)),
            _ => None,
        };
        (net.node_count(), net.edge_count(), net.average_degree(), probe)
    };

    let bfs_latency_ms = probe.map(|(first, last)| {
        let started = Instant::now();
        let _ = world
            .resource::<NetworkPair>()
            .get(network)
            .shortest_path(first, last);
        started.elapsed().as_secs_f32() * 1000.0
    });

    let summary = NetworkSummary {
        network: network.as_str().to_string(),
        node_count,
        edge_count,
        average_degree,
        bfs_latency_ms,
    };
    emit(world, MetricsRecord::Network(summary.clone()));
    summary
}

/// Creates a drone at the given position: allocates an id, registers it in
/// the roster, and spawns the entity with a freshly sensed temperature.
pub fn spawn_drone(world: &mut World, position: Vec2) -> u32 {
    let range = {
        let config = world.resource::<Config>();
        config.temperature.min..config.temperature.max
    };
    let temperature = {
        let mut rng = world.resource_mut::<SimRng>();
        rng.0.gen_range(range)
    };
    let id = {
        let mut roster = world.resource_mut::<DroneRoster>();
        let id = roster.allocate_id();
        roster.append(id);
        id
    };

    world.spawn((
        Drone,
        DroneId(id),
        Temperature(temperature),
        Position(position),
        Alive::new(),
    ));
    debug!(id, "drone spawned");
    id
}

/// Queues a self-destruct; the lifecycle system applies it at the start of
/// the next tick.
pub fn request_self_destruct(world: &mut World, id: u32) {
    world.resource_mut::<SelfDestructQueue>().push(id);
}
