//! throughput: replicated steady-state throughput and service-time runs.
//!
//! ```text
//! throughput [CONFIG.json] [REPLICATIONS]
//! ```
//!
//! Without a config file the default two-week, two-robot scenario runs.  A
//! config file only needs the fields it changes, e.g.
//! `{"robot_num": 4, "order_enter_rate": 0.025}`.
//!
//! The first replication streams its CSV output while it runs; the rest run
//! in parallel and are exported afterwards.  Files land in
//! `output/throughput/seed-<seed>/`.  Set `RUST_LOG=info` (or `debug`) for
//! engine logs.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use rmfs_core::SimConfig;
use rmfs_output::{CsvWriter, SimOutputObserver, write_report};
use rmfs_sim::{ReplicationSummary, SimBuilder, SimReport, run_replications};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_REPLICATIONS: usize = 5;
const OUTPUT_DIR:           &str  = "output/throughput";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn seed_dir(seed: u64) -> PathBuf {
    Path::new(OUTPUT_DIR).join(format!("seed-{seed}"))
}

/// Run one replication with live CSV output.
fn run_streamed(config: &SimConfig) -> Result<SimReport> {
    let mut sim = SimBuilder::new(config.clone()).build()?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(&seed_dir(config.seed))?);
    sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    Ok(sim.into_report())
}

fn print_table(reports: &[SimReport]) {
    println!(
        "{:<8} {:>8} {:>8} {:>10} {:>12} {:>12} {:>10}",
        "Seed", "Served", "Steady", "Orders/h", "Mean svc s", "Std svc s", "Max queue"
    );
    println!("{}", "-".repeat(74));
    for r in reports {
        let s = r.summary();
        println!(
            "{:<8} {:>8} {:>8} {:>10.2} {:>12.1} {:>12.1} {:>10}",
            s.seed,
            s.served,
            s.steady_served,
            s.throughput_per_h,
            s.mean_service_secs.unwrap_or(f64::NAN),
            s.std_service_secs.unwrap_or(f64::NAN),
            s.max_active,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let replications = match args.get(1) {
        Some(n) => n.parse::<usize>().with_context(|| format!("bad replication count {n:?}"))?,
        None => DEFAULT_REPLICATIONS,
    };
    if replications == 0 {
        bail!("need at least one replication");
    }
    config.validate()?;

    println!("=== throughput: rmfs warehouse simulation ===");
    println!(
        "Robots: {}  |  Rate: {:.4}/s ({:.1}/h)  |  Days: {:.1}  |  Warmup: {:.0}%",
        config.robot_num,
        config.order_enter_rate,
        config.order_enter_rate * 3_600.0,
        config.time_limit / 86_400.0,
        config.warmup_frac * 100.0,
    );
    println!(
        "Layout: {} pick aisles, {} cross aisles, {} item types, {} stations",
        config.layout.pick_aisles,
        config.layout.cross_aisles,
        config.layout.item_types,
        config.layout.stations.len(),
    );
    println!();

    let seeds: Vec<u64> = (0..replications as u64).map(|i| config.seed.wrapping_add(i)).collect();

    // 1. First replication, streamed.
    let t0 = Instant::now();
    let mut reports = vec![run_streamed(&config)?];
    info!("streamed replication done in {:.3} s", t0.elapsed().as_secs_f64());

    // 2. Remaining replications, in parallel, exported afterwards.
    let t1 = Instant::now();
    let rest = run_replications(&config, &seeds[1..])?;
    for report in &rest {
        let mut writer = CsvWriter::new(&seed_dir(report.seed))?;
        write_report(report, &mut writer)?;
    }
    reports.extend(rest);
    info!("{} more replications done in {:.3} s", seeds.len() - 1, t1.elapsed().as_secs_f64());

    // 3. Summary.
    print_table(&reports);
    println!();
    let summary = ReplicationSummary::from_reports(&reports);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!();
    println!("CSV output in {OUTPUT_DIR}/seed-*/");

    Ok(())
}
