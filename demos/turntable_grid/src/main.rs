//! turntable_grid — a box crossing the reference turntable floor.
//!
//! Builds a grid of turntables (the 6 × 3 reference layout, or a `GridSpec`
//! JSON file given as the first argument), gives every module a threaded
//! skill controller, and routes one box from the bottom-left module to the
//! top-right one.  The pose trace lands in `output/turntable_grid/` (or the
//! directory given as the second argument).
//!
//! `RUST_LOG=debug` shows every skill and actuator change.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ct_control::{Controller, ModuleLink, Skill, SkillHandle, SkillLogic, ThreadedController};
use ct_core::{GridSpec, ModuleId, SimConfig};
use ct_modules::build_grid;
use ct_output::{CsvPoseWriter, PoseTraceObserver};
use ct_routing::{ModuleGraph, Router, ShortestPathRouter};
use ct_sim::{World, WorldObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_DURATION_MS:  u32 = 50;
const MAX_TICKS:         u64 = 6_000; // 5 simulated minutes
const SNAPSHOT_INTERVAL: u64 = 4;
/// How long a forwarding belt keeps running once its barrier is clear.
const CLEAR_AFTER_MS:    u64 = 1_000;
const DEFAULT_OUT_DIR:   &str = "output/turntable_grid";

// ── Route planning ────────────────────────────────────────────────────────────

/// Skills per module for carrying a box along `path`: the first module
/// forwards, the last receives, everything in between does both.
fn route_skills(graph: &ModuleGraph, path: &[ModuleId]) -> Result<Vec<(ModuleId, Vec<Skill>)>> {
    let side = |from: ModuleId, to: ModuleId| {
        graph
            .direction(from, to)
            .with_context(|| format!("{} and {} are not neighbours", graph.name(from), graph.name(to)))
    };

    let mut plan = Vec::with_capacity(path.len());
    for (i, &module) in path.iter().enumerate() {
        let mut skills = Vec::with_capacity(2);
        if i > 0 {
            skills.push(Skill::ReceiveFrom(side(module, path[i - 1])?));
        }
        if i + 1 < path.len() {
            skills.push(Skill::ForwardTo(side(module, path[i + 1])?));
        }
        plan.push((module, skills));
    }
    Ok(plan)
}

fn load_grid(path: Option<&Path>) -> Result<GridSpec> {
    let Some(path) = path else {
        return Ok(GridSpec::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let grid: GridSpec = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(grid)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let grid_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);

    // 1. Layout.
    let grid = load_grid(grid_path.as_deref())?;
    let config = SimConfig {
        tick_duration_ms:        TICK_DURATION_MS,
        total_ticks:             MAX_TICKS,
        snapshot_interval_ticks: SNAPSHOT_INTERVAL,
    };
    let mut world = World::new(config)?;
    // Grid order: module `i` here is `ModuleId(i)` in the graph.
    let mut modules = build_grid(&mut world, &grid)?;
    let graph = ModuleGraph::from_grid(&grid);

    // 2. Route from the first to the last module.
    let (Some(first), Some(last)) = (modules.first(), modules.last()) else {
        bail!("grid has no modules");
    };
    let (source, target) = (first.name.clone(), last.name.clone());
    let hop = ShortestPathRouter.next_hop(&graph, &source, &target)?;
    let source_id = graph.id(&source).context("source module missing from graph")?;
    let target_id = graph.id(&target).context("target module missing from graph")?;
    let path = ShortestPathRouter.path(&graph, source_id, target_id)?;
    info!(%source, %target, hops = path.len() - 1, first = %hop.direction, "route planned");

    // 3. One threaded controller per module; skills queued along the route.
    let mut links = Vec::with_capacity(modules.len());
    let mut handles: Vec<SkillHandle> = Vec::with_capacity(modules.len());
    for module in &modules {
        let (logic, handle) = SkillLogic::new(module.name.clone(), CLEAR_AFTER_MS);
        let controller: Box<dyn Controller + Send> = Box::new(ThreadedController::spawn(module.name.clone(), logic)?);
        links.push(ModuleLink::new(controller));
        handles.push(handle);
    }
    let mut pending = 0usize;
    for (module, skills) in route_skills(&graph, &path)? {
        for skill in skills {
            handles[module.index()].command(skill)?;
            pending += 1;
        }
    }

    let source_index = source_id.index();
    let parcel = modules[source_index].spawn_box(&mut world)?;

    // 4. Output.
    std::fs::create_dir_all(&out_dir)?;
    let mut obs = PoseTraceObserver::new(CsvPoseWriter::new(&out_dir)?);

    // 5. Run until the last skill reports or time is up.
    let t0 = Instant::now();
    while world.clock.current_tick.0 < MAX_TICKS && pending > 0 {
        for (link, module) in links.iter_mut().zip(modules.iter_mut()) {
            link.sync(&mut world, module, u64::from(TICK_DURATION_MS))?;
        }
        world.run_ticks(1, &mut obs)?;
        for (i, handle) in handles.iter().enumerate() {
            while let Some(skill) = handle.try_done() {
                pending -= 1;
                info!(module = %graph.name(ModuleId::from_index(i)), ?skill, tick = world.clock.current_tick.0, "skill finished");
            }
        }
    }
    obs.on_run_end(world.clock.current_tick);
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let pose = world.global_pose(parcel.node);
    let holder = world.tree.parent(parcel.node).map_or("<floor>", |p| world.tree.name(p));
    println!("Simulation finished in {:.3} s wall time", t0.elapsed().as_secs_f64());
    println!("  ticks      : {}", world.clock.current_tick.0);
    println!("  sim time   : {:.1} s", world.clock.elapsed_ms() as f64 / 1000.0);
    println!("  skills left: {pending}");
    println!("  box        : ({:.2}, {:.2}) on {holder}", pose.position.x, pose.position.y);
    println!("  trace      : {}", out_dir.display());

    Ok(())
}
