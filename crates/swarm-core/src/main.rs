//! Drone Swarm Simulation Engine
//!
//! A flock of drones whose live membership is re-indexed every tick into a
//! pair of id-keyed directories and two communication network topologies,
//! answering search, delete, and shortest-path queries with simulated
//! latency metrics.

use bevy_ecs::prelude::*;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

use swarm_core::api;
use swarm_core::comms::{DirectoryPair, NetworkId, NetworkPair};
use swarm_core::components::roster::DroneRoster;
use swarm_core::config::Config;
use swarm_core::output::{
    generate_snapshot, write_current_state, write_snapshot_to_dir, MetricsSink, SnapshotGenerator,
};
use swarm_core::setup;
use swarm_core::systems::{
    tick_schedule, CompositeSteering, NeighborIndex, SelfDestructQueue, SteeringPolicy,
};
use swarm_core::{SimRng, SimulationState};

use swarm_events::{MetricsRecord, TickRecord};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "swarm_sim")]
#[command(about = "A drone swarm directory & topology simulation engine")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Interval between flock snapshots (in ticks)
    #[arg(long, default_value_t = 100)]
    snapshot_interval: u64,

    /// Interval between scripted probe operations (in ticks, 0 disables)
    #[arg(long, default_value_t = 25)]
    probe_interval: u64,

    /// Path to the tuning file
    #[arg(long, default_value = swarm_core::config::DEFAULT_TUNING_PATH)]
    config: String,

    /// Path for the JSONL metrics stream
    #[arg(long, default_value = "output/metrics.jsonl")]
    metrics: String,

    /// Write the initial flock snapshot and exit
    #[arg(long)]
    output_initial_state: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.config);

    println!("Drone Swarm Simulation Engine");
    println!("=============================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", args.ticks);
    println!("Starting drones: {}", config.flock.starting_count);
    println!("Snapshot interval: {}", args.snapshot_interval);
    println!("Probe interval: {}", args.probe_interval);
    println!();

    // Ensure output directories exist
    fs::create_dir_all("output/snapshots").unwrap_or_else(|e| {
        eprintln!("Warning: Could not create output directories: {}", e);
    });

    // Initialize the ECS world
    let mut world = World::new();

    // Insert core resources
    world.insert_resource(SimulationState {
        current_tick: 0,
        max_ticks: args.ticks,
        snapshot_interval: args.snapshot_interval,
    });
    world.insert_resource(SimRng(SmallRng::seed_from_u64(args.seed)));
    world.insert_resource(SteeringPolicy(Box::new(CompositeSteering::from_config(
        &config,
    ))));
    world.insert_resource(DroneRoster::new());
    world.insert_resource(DirectoryPair::new(config.comms.time_factor));
    world.insert_resource(NetworkPair::default());
    world.insert_resource(NeighborIndex::new());
    world.insert_resource(SelfDestructQueue::new());
    world.insert_resource(SnapshotGenerator::new(args.snapshot_interval));

    let sink = MetricsSink::new(&args.metrics).unwrap_or_else(|e| {
        eprintln!("Warning: Could not open metrics file: {}. Discarding metrics.", e);
        MetricsSink::null()
    });
    world.insert_resource(sink);
    world.insert_resource(config);

    // Spawn the flock
    println!("Spawning drones...");
    let summary = setup::spawn_flock(&mut world);
    println!(
        "  Spawned {} drones (ids {:?}..{:?})",
        summary.total, summary.first_id, summary.last_id
    );

    // Generate initial snapshot
    println!("Generating initial snapshot...");
    let initial_snapshot = generate_snapshot(&mut world, "simulation_start");
    if let Err(e) = write_snapshot_to_dir(&initial_snapshot) {
        eprintln!("  Warning: Could not write initial snapshot: {}", e);
    }
    if let Err(e) = write_current_state(&initial_snapshot) {
        eprintln!("  Warning: Could not write current state: {}", e);
    } else {
        println!("  Wrote initial snapshot (tick 0)");
    }

    if args.output_initial_state {
        println!("Initial state written; exiting.");
        return;
    }

    // Per-tick systems in canonical order
    let mut schedule = tick_schedule();

    println!();
    println!("Starting simulation...");
    println!();

    // Main simulation loop
    for tick in 0..args.ticks {
        world.resource_mut::<SimulationState>().current_tick = tick;
        let tick_started = Instant::now();

        // Run all systems
        schedule.run(&mut world);

        // Scripted probe operations stand in for UI-triggered queries
        if args.probe_interval > 0 && tick > 0 && tick % args.probe_interval == 0 {
            run_probes(&mut world, tick, args.probe_interval);
        }

        // Emit per-tick timing
        let elapsed = tick_started.elapsed().as_secs_f32().max(1e-6);
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let record = MetricsRecord::Tick(TickRecord {
            tick,
            timestamp_ms,
            frame_rate: 1.0 / elapsed,
        });
        if let Err(e) = world.resource_mut::<MetricsSink>().log(&record) {
            eprintln!("Warning: Could not write tick record: {}", e);
        }

        // Generate periodic snapshots
        let should_snapshot = world
            .resource::<SnapshotGenerator>()
            .should_snapshot(tick);
        if should_snapshot {
            api::network_performance(&mut world, NetworkId::Primary);
            api::network_performance(&mut world, NetworkId::Secondary);

            let snapshot = generate_snapshot(&mut world, "periodic");
            if let Err(e) = write_snapshot_to_dir(&snapshot) {
                eprintln!("Warning: Could not write snapshot at tick {}: {}", tick, e);
            }
            if let Err(e) = write_current_state(&snapshot) {
                eprintln!("Warning: Could not write current state at tick {}: {}", tick, e);
            }
            world.resource_mut::<SnapshotGenerator>().mark_snapshot(tick);
        }

        // Print progress every 100 ticks
        if tick > 0 && tick % 100 == 0 {
            println!(
                "Tick {} / {} ({} drones alive)",
                tick,
                args.ticks,
                world.resource::<DroneRoster>().len()
            );
        }
    }

    // Generate final snapshot
    world.resource_mut::<SimulationState>().current_tick = args.ticks;
    let final_snapshot = generate_snapshot(&mut world, "simulation_end");
    if let Err(e) = write_snapshot_to_dir(&final_snapshot) {
        eprintln!("Warning: Could not write final snapshot: {}", e);
    }
    if let Err(e) = write_current_state(&final_snapshot) {
        eprintln!("Warning: Could not write final current state: {}", e);
    }
    if let Err(e) = world.resource_mut::<MetricsSink>().flush() {
        eprintln!("Warning: Could not flush metrics: {}", e);
    }

    println!();
    println!(
        "Simulation complete. Ran {} ticks with {} drones remaining.",
        args.ticks,
        world.resource::<DroneRoster>().len()
    );
    println!(
        "Generated {} snapshots, {} metric records.",
        world.resource::<SnapshotGenerator>().snapshot_count(),
        world.resource::<MetricsSink>().record_count()
    );
}

/// Replays the UI-style operations against the current tick's structures:
/// an id search, a shortest-path query, and the occasional delete or
/// self-destruct to keep membership churning.
fn run_probes(world: &mut World, tick: u64, probe_interval: u64) {
    let ids: Vec<u32> = world.resource::<DroneRoster>().ids().to_vec();
    if ids.len() < 2 {
        return;
    }
    let (a, b) = {
        let mut rng = world.resource_mut::<SimRng>();
        let a = ids[rng.0.gen_range(0..ids.len())];
        let b = ids[rng.0.gen_range(0..ids.len())];
        (a, b)
    };

    api::search_by_id(world, a);
    api::shortest_path(world, NetworkId::Primary, a, b);

    if tick % (probe_interval * 4) == 0 {
        api::delete_by_id(world, b);
    } else if tick % (probe_interval * 2) == 0 {
        api::request_self_destruct(world, b);
    }
}
