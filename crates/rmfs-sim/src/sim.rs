//! The `Sim` struct and its event loop.

use log::{debug, info, trace};
use rustc_hash::FxHashMap;

use rmfs_core::{OrderId, PodId, RobotId, SimClock, SimConfig, SimRng};
use rmfs_events::{Event, EventKind, EventQueue};
use rmfs_warehouse::{Order, OrderStatus, StationChoice, Warehouse, WarehouseError};

use crate::{ArrivalProcess, QueueSample, QueuedOrders, SimError, SimObserver, SimReport, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation context of one run.
///
/// Owns every piece of mutable state: the clock, the pending events, the
/// warehouse, the order queues, and the RNG.  Nothing is global, so
/// independent runs can proceed side by side.
///
/// Each call to [`step`](Self::step) pops the earliest event and dispatches
/// it to one of five handlers:
///
/// | Event                 | Handler effect                                               |
/// |-----------------------|--------------------------------------------------------------|
/// | `OrderArrival`        | count +1; assign free robot + random free pod, or queue; schedule next arrival |
/// | `RobotLiftsPod`       | vacate slot; route to lowest free station or a random one     |
/// | `RobotArrivesStation` | start picking, or wait in the station's line                  |
/// | `PickingFinished`     | count −1; log order; start next in line; send pod to storage  |
/// | `RobotStoresPod`      | free robot and pod; serve the oldest queued order it can      |
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration.
    pub config: SimConfig,

    /// Time of the most recently processed event.
    pub clock: SimClock,

    /// Pending events, earliest first, FIFO among equal times.
    pub events: EventQueue,

    /// Robots, pods, slots, and stations with their free indexes.
    pub warehouse: Warehouse,

    /// Orders waiting for a robot and a pod.
    pub queued: QueuedOrders,

    /// The single random stream of the run.
    pub rng: SimRng,

    pub(crate) arrivals:            Box<dyn ArrivalProcess>,
    /// Scheduled, queued, and in-progress orders.
    pub(crate) orders:              FxHashMap<OrderId, Order>,
    pub(crate) next_order:          OrderId,
    pub(crate) active:              usize,
    pub(crate) queue_series:        Vec<QueueSample>,
    pub(crate) served:              Vec<Order>,
    pub(crate) served_while_warmup: Option<usize>,
    pub(crate) events_processed:    u64,
    pub(crate) audit_each_event:    bool,
    pub(crate) finished:            bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the next event would pass the time limit or no events
    /// remain.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            "run start: seed={} robots={} rate={}/s limit={}s",
            self.config.seed,
            self.warehouse.robots().len(),
            self.config.order_enter_rate,
            self.config.time_limit,
        );
        while self.step(observer)?.is_some() {}
        Ok(())
    }

    /// Process exactly one event and return it.
    ///
    /// Returns `Ok(None)` once the run is over: the queue is empty or its
    /// earliest event lies beyond the time limit.  That event is left
    /// unprocessed.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<Event>> {
        if self.finished {
            return Ok(None);
        }
        let due = self.events.next_time().filter(|&t| !self.clock.is_past_limit(t));
        let event = match due.and_then(|_| self.events.pop()) {
            Some(event) => event,
            None => {
                self.finish(observer);
                return Ok(None);
            }
        };

        self.clock.advance_to(event.time)?;
        trace!("{event}");
        observer.on_event(&event);

        let served_before = self.served.len();
        let samples_before = self.queue_series.len();
        match event.kind {
            EventKind::OrderArrival(order)      => self.on_order_arrival(order)?,
            EventKind::RobotLiftsPod(robot)     => self.on_robot_lifts_pod(robot)?,
            EventKind::RobotArrivesStation(robot) => self.on_robot_arrives_station(robot)?,
            EventKind::PickingFinished(robot)   => self.on_picking_finished(robot)?,
            EventKind::RobotStoresPod(robot)    => self.on_robot_stores_pod(robot)?,
        }
        self.events_processed += 1;

        for &sample in &self.queue_series[samples_before..] {
            observer.on_queue_sample(sample);
        }
        for order in &self.served[served_before..] {
            observer.on_order_served(order);
        }

        let now = self.clock.now();
        if self.served_while_warmup.is_none() && now >= self.config.warmup_boundary() {
            let served = self.served.len();
            self.served_while_warmup = Some(served);
            debug!("warmup over at {now}: {served} orders served during warmup");
            observer.on_warmup_end(now, served);
        }

        if self.audit_each_event {
            self.audit()?;
        }
        Ok(Some(event))
    }

    /// `true` once [`step`](Self::step) has returned `Ok(None)`.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Orders that have arrived and are not yet picked.
    #[inline]
    pub fn active_orders(&self) -> usize {
        self.active
    }

    /// Orders created so far, including the one scheduled to arrive next.
    #[inline]
    pub fn orders_created(&self) -> u64 {
        self.next_order.0
    }

    #[inline]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn queue_series(&self) -> &[QueueSample] {
        &self.queue_series
    }

    pub fn served(&self) -> &[Order] {
        &self.served
    }

    /// Any order that is scheduled, queued, or in progress.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Snapshot of the results so far.
    pub fn report(&self) -> SimReport {
        SimReport {
            seed:                self.config.seed,
            time_limit:          self.config.time_limit,
            warmup_frac:         self.config.warmup_frac,
            queue_series:        self.queue_series.clone(),
            served:              self.served.clone(),
            served_while_warmup: self.warmup_cutoff(),
            final_time:          self.clock.now(),
            events_processed:    self.events_processed,
        }
    }

    /// Consume the run and return its results without copying.
    pub fn into_report(self) -> SimReport {
        let served_while_warmup = self.warmup_cutoff();
        SimReport {
            seed:             self.config.seed,
            time_limit:       self.config.time_limit,
            warmup_frac:      self.config.warmup_frac,
            queue_series:     self.queue_series,
            served:           self.served,
            served_while_warmup,
            final_time:       self.clock.now(),
            events_processed: self.events_processed,
        }
    }

    /// Check warehouse invariants and order accounting.
    ///
    /// Every arrived, unpicked order is either queued or the current order of
    /// exactly one robot, and the active count equals their sum.
    pub fn audit(&self) -> SimResult<()> {
        self.warehouse.audit()?;

        let mut in_progress = 0usize;
        for robot in self.warehouse.robots() {
            let Some(id) = robot.order else { continue };
            match self.orders.get(&id) {
                Some(o) if o.status == OrderStatus::InProgress => in_progress += 1,
                _ => return Err(SimError::Accounting(format!("{} works on {id}, which is not in progress", robot.id))),
            }
        }
        for id in self.queued.iter() {
            match self.orders.get(&id) {
                Some(o) if o.status == OrderStatus::Queued => {}
                _ => return Err(SimError::Accounting(format!("{id} is queued but not in queued state"))),
            }
        }
        let carried = self.orders.values().filter(|o| o.status == OrderStatus::InProgress).count();
        if carried != in_progress {
            return Err(SimError::Accounting(format!(
                "{carried} orders in progress but {in_progress} robots carry one"
            )));
        }
        if in_progress + self.queued.len() != self.active {
            return Err(SimError::Accounting(format!(
                "active={} but {} in progress and {} queued",
                self.active, in_progress, self.queued.len()
            )));
        }
        Ok(())
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn on_order_arrival(&mut self, id: OrderId) -> SimResult<()> {
        let item = self.order_ref(id)?.item;
        self.sample(1)?;

        let robot = self.warehouse.first_free_robot();
        let pod = robot.and_then(|_| self.warehouse.choose_free_pod(item, &mut self.rng));
        match (robot, pod) {
            (Some(robot), Some(pod)) => self.assign(robot, pod, id)?,
            _ => {
                debug!("{id} queued at {}: no free robot or {item} pod", self.clock.now());
                self.queued.push(id, item);
            }
        }

        self.schedule_next_arrival()
    }

    fn on_robot_lifts_pod(&mut self, robot: RobotId) -> SimResult<()> {
        self.warehouse.lift_pod(robot)?;
        let choice = self.warehouse.choose_station(&mut self.rng)?;
        if let StationChoice::Overflow(station) = choice {
            debug!("{robot} overflows into busy {station} at {}", self.clock.now());
        }
        let secs = self.warehouse.send_to_station(robot, choice.id())?;
        self.schedule(secs, EventKind::RobotArrivesStation(robot));
        Ok(())
    }

    fn on_robot_arrives_station(&mut self, robot: RobotId) -> SimResult<()> {
        if let Some(secs) = self.warehouse.arrive_at_station(robot, &mut self.rng)? {
            self.schedule(secs, EventKind::PickingFinished(robot));
        }
        Ok(())
    }

    fn on_picking_finished(&mut self, robot: RobotId) -> SimResult<()> {
        let now = self.clock.now();
        let outcome = self.warehouse.finish_picking(robot, &mut self.rng)?;

        let mut order = self.orders.remove(&outcome.order).ok_or(SimError::UnknownOrder(outcome.order))?;
        order.finish(now)?;
        self.sample(-1)?;
        self.served.push(order);

        if let Some((next, secs)) = outcome.next {
            self.schedule(secs, EventKind::PickingFinished(next));
        }

        let (_slot, secs) = self.warehouse.send_to_storage(robot, &mut self.rng)?;
        self.schedule(secs, EventKind::RobotStoresPod(robot));
        Ok(())
    }

    fn on_robot_stores_pod(&mut self, robot: RobotId) -> SimResult<()> {
        self.warehouse.store_pod(robot)?;

        let warehouse = &self.warehouse;
        let Some((order, item)) = self.queued.pop_first_where(|item| warehouse.has_free_pod(item)) else {
            return Ok(());
        };
        let pod = self.warehouse.choose_free_pod(item, &mut self.rng).ok_or_else(|| {
            WarehouseError::Invariant(format!("{item} reported a free pod but none was chosen"))
        })?;
        debug!("{robot} takes queued {order} at {}", self.clock.now());
        self.assign(robot, pod, order)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Send free `robot` to fetch `pod` for `order`.
    fn assign(&mut self, robot: RobotId, pod: PodId, order: OrderId) -> SimResult<()> {
        let secs = self.warehouse.dispatch(robot, pod, order)?;
        self.orders.get_mut(&order).ok_or(SimError::UnknownOrder(order))?.start()?;
        self.schedule(secs, EventKind::RobotLiftsPod(robot));
        Ok(())
    }

    /// Create the next order from the arrival process and schedule it.
    pub(crate) fn schedule_next_arrival(&mut self) -> SimResult<()> {
        let Some(arrival) = self.arrivals.next_arrival(&mut self.rng) else {
            debug!("arrival stream exhausted at {}", self.clock.now());
            return Ok(());
        };
        if !(arrival.gap.is_finite() && arrival.gap >= 0.0) {
            return Err(SimError::InvalidGap(arrival.gap));
        }
        let types = self.warehouse.item_types();
        if arrival.item.0 >= types {
            return Err(SimError::UnknownItem { item: arrival.item, types });
        }

        let id = self.next_order;
        self.next_order = id.next();
        let at = self.clock.now() + arrival.gap;
        self.orders.insert(id, Order::new(id, at, arrival.item));
        self.events.push(at, EventKind::OrderArrival(id));
        Ok(())
    }

    fn schedule(&mut self, secs: f64, kind: EventKind) {
        self.events.push(self.clock.now() + secs, kind);
    }

    /// Apply `delta` to the active-order count and record a sample.
    fn sample(&mut self, delta: isize) -> SimResult<()> {
        let now = self.clock.now();
        self.active = self.active.checked_add_signed(delta).ok_or(SimError::NegativeQueue(now))?;
        self.queue_series.push(QueueSample { time: now, active: self.active });
        Ok(())
    }

    fn order_ref(&self, id: OrderId) -> SimResult<&Order> {
        self.orders.get(&id).ok_or(SimError::UnknownOrder(id))
    }

    /// The warmup cutoff; a run that stopped before reaching the boundary
    /// served every order during warmup.
    fn warmup_cutoff(&self) -> usize {
        self.served_while_warmup.unwrap_or(self.served.len())
    }

    fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        if self.finished {
            return;
        }
        self.finished = true;
        let now = self.clock.now();
        info!(
            "run end: {now}, {} events, {} orders served ({} during warmup), {} active",
            self.events_processed,
            self.served.len(),
            self.warmup_cutoff(),
            self.active,
        );
        observer.on_sim_end(now);
    }
}
