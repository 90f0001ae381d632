//! Independent replications of one configuration.
//!
//! Each replication builds its own [`Sim`][crate::Sim] from a copy of the
//! config with its own seed, so replications share nothing.  With the
//! `parallel` feature they run on Rayon's thread pool; results come back in
//! seed order either way.

use rmfs_core::SimConfig;

use crate::report::mean;
use crate::{NoopObserver, SimBuilder, SimReport, SimResult};

/// Build and run one replication of `config` with `seed`.
pub fn run_once(config: &SimConfig, seed: u64) -> SimResult<SimReport> {
    let mut sim = SimBuilder::new(config.clone().with_seed(seed)).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.into_report())
}

/// Run one replication per seed.  Stops at the first failing replication.
pub fn run_replications(config: &SimConfig, seeds: &[u64]) -> SimResult<Vec<SimReport>> {
    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_once(config, seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_once(config, seed)).collect()
    }
}

/// Cross-replication averages.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationSummary {
    pub replications:       usize,
    /// Mean steady-state orders served per replication.
    pub mean_steady_served: f64,
    /// Mean steady-state throughput, orders per hour.
    pub throughput_per_h:   f64,
    /// Mean of the per-replication mean service times.
    pub mean_service_secs:  Option<f64>,
    /// Population standard deviation of all pooled steady-state service times.
    pub std_service_secs:   Option<f64>,
}

impl ReplicationSummary {
    pub fn from_reports(reports: &[SimReport]) -> Self {
        let pooled = || reports.iter().flat_map(|r| r.service_times());
        let pooled_std = mean(pooled()).and_then(|m| mean(pooled().map(|s| (s - m) * (s - m))));
        Self {
            replications:       reports.len(),
            mean_steady_served: mean(reports.iter().map(|r| r.steady_state().len() as f64)).unwrap_or(0.0),
            throughput_per_h:   mean(reports.iter().map(|r| r.throughput() * 3_600.0)).unwrap_or(0.0),
            mean_service_secs:  mean(reports.iter().filter_map(SimReport::mean_service_time)),
            std_service_secs:   pooled_std.map(f64::sqrt),
        }
    }
}
