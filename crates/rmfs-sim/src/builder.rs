//! Fluent builder for constructing a [`Sim`].

use log::info;
use rustc_hash::FxHashMap;

use rmfs_core::{OrderId, SimClock, SimConfig, SimRng, SimTime};
use rmfs_events::EventQueue;
use rmfs_warehouse::WarehouseBuilder;

use crate::{ArrivalProcess, PoissonArrivals, QueueSample, QueuedOrders, Sim, SimResult};

/// Offset of the construction stream derived from the run seed.
const LAYOUT_STREAM: u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                          |
/// |-------------------------|--------------------------------------------------|
/// | `.arrivals(p)`          | `PoissonArrivals` at `config.order_enter_rate`   |
/// | `.audit_each_event(b)`  | `false`                                          |
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig::new(7.0 * 86_400.0, 4, 0.02).with_seed(42);
/// let mut sim = SimBuilder::new(config).build()?;
/// sim.run(&mut NoopObserver)?;
/// let report = sim.into_report();
/// ```
pub struct SimBuilder {
    config:           SimConfig,
    arrivals:         Option<Box<dyn ArrivalProcess>>,
    audit_each_event: bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, arrivals: None, audit_each_event: false }
    }

    /// Replace the Poisson arrival stream.
    pub fn arrivals(mut self, arrivals: impl ArrivalProcess + 'static) -> Self {
        self.arrivals = Some(Box::new(arrivals));
        self
    }

    /// Run [`Sim::audit`] after every event.  Slow; meant for tests.
    pub fn audit_each_event(mut self, on: bool) -> Self {
        self.audit_each_event = on;
        self
    }

    /// Validate the config, build the warehouse, and schedule the first
    /// arrival.
    ///
    /// # Errors
    /// Returns a configuration error for any parameter that
    /// [`SimConfig::validate`] rejects.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut layout_rng = rng.child(LAYOUT_STREAM);
        let warehouse = WarehouseBuilder::from_config(&config).build(&mut layout_rng)?;
        info!(
            "warehouse: {} slots, {} item types, {} stations, {} robots, {:?} storage",
            warehouse.layout().len(),
            warehouse.item_types(),
            warehouse.stations().len(),
            warehouse.robots().len(),
            config.storage,
        );

        let arrivals: Box<dyn ArrivalProcess> = match self.arrivals {
            Some(a) => a,
            None => Box::new(PoissonArrivals::new(config.order_enter_rate, config.layout.item_types)?),
        };

        let mut sim = Sim {
            clock:               SimClock::new(config.end_time()),
            events:              EventQueue::new(),
            queued:              QueuedOrders::new(warehouse.item_types()),
            warehouse,
            rng,
            arrivals,
            orders:              FxHashMap::default(),
            next_order:          OrderId(0),
            active:              0,
            queue_series:        vec![QueueSample { time: SimTime::ZERO, active: 0 }],
            served:              Vec::new(),
            served_while_warmup: None,
            events_processed:    0,
            audit_each_event:    self.audit_each_event,
            finished:            false,
            config,
        };
        sim.schedule_next_arrival()?;
        Ok(sim)
    }
}
