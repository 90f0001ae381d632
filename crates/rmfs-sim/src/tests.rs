//! Integration tests for rmfs-sim.

use rmfs_core::{ItemType, LayoutConfig, OrderId, Point, SimConfig, SimTime};
use rmfs_events::{Event, EventKind};
use rmfs_warehouse::Order;

use crate::{QueueSample, ScriptedArrivals, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ten pods over two item types, one station at (6, 0), fast picking.
fn small_config(robots: u32, time_limit: f64) -> SimConfig {
    let mut config = SimConfig::new(time_limit, robots, 0.01).with_seed(42);
    config.picking_rate = 1.0;
    config.layout = LayoutConfig {
        pick_aisles:  1,
        cross_aisles: 0,
        item_types:   2,
        stations:     vec![Point::new(6.0, 0.0)],
    };
    config
}

fn scripted(config: SimConfig, arrivals: &[(f64, u16)]) -> Sim {
    let script = ScriptedArrivals::at_times(arrivals.iter().map(|&(t, i)| (t, ItemType(i))));
    SimBuilder::new(config).arrivals(script).audit_each_event(true).build().unwrap()
}

/// Records every callback.
#[derive(Default)]
struct Recorder {
    events:  Vec<Event>,
    samples: Vec<QueueSample>,
    served:  Vec<OrderId>,
    warmup:  Vec<(SimTime, usize)>,
    ended:   Vec<SimTime>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, event: &Event) {
        self.events.push(*event);
    }
    fn on_queue_sample(&mut self, sample: QueueSample) {
        self.samples.push(sample);
    }
    fn on_order_served(&mut self, order: &Order) {
        self.served.push(order.id);
    }
    fn on_warmup_end(&mut self, now: SimTime, served: usize) {
        self.warmup.push((now, served));
    }
    fn on_sim_end(&mut self, final_time: SimTime) {
        self.ended.push(final_time);
    }
}

impl Recorder {
    fn arrivals(&self) -> usize {
        self.events.iter().filter(|e| matches!(e.kind, EventKind::OrderArrival(_))).count()
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use rmfs_core::{ItemType, Point, RmfsError, SimConfig};

    use super::small_config;
    use crate::{ScriptedArrivals, SimBuilder, SimError};

    fn config_error(config: SimConfig) -> bool {
        matches!(SimBuilder::new(config).build(), Err(SimError::Core(RmfsError::Config(_))))
    }

    #[test]
    fn builds_with_one_pending_arrival() {
        let sim = SimBuilder::new(small_config(2, 1_000.0)).build().unwrap();
        assert_eq!(sim.events.len(), 1);
        assert_eq!(sim.orders_created(), 1);
        assert_eq!(sim.queue_series().len(), 1);
        assert_eq!(sim.queue_series()[0].active, 0);
        assert_eq!(sim.warehouse.robots().len(), 2);
        sim.audit().unwrap();
    }

    #[test]
    fn zero_robots_is_rejected() {
        assert!(config_error(small_config(0, 1_000.0)));
    }

    #[test]
    fn zero_stations_is_rejected() {
        let mut config = small_config(1, 1_000.0);
        config.layout.stations.clear();
        assert!(config_error(config));
    }

    #[test]
    fn item_type_without_pods_is_rejected() {
        let mut config = small_config(1, 1_000.0);
        config.layout.item_types = 11; // ten pods
        assert!(config_error(config));
    }

    #[test]
    fn non_positive_rates_and_limits_are_rejected() {
        let mut config = small_config(1, 1_000.0);
        config.order_enter_rate = 0.0;
        assert!(config_error(config));

        let mut config = small_config(1, 1_000.0);
        config.picking_rate = -1.0;
        assert!(config_error(config));

        assert!(config_error(small_config(1, 0.0)));

        let mut config = small_config(1, 1_000.0);
        config.warmup_frac = 1.0;
        assert!(config_error(config));
    }

    #[test]
    fn scripted_item_outside_the_catalogue_is_rejected() {
        let script = ScriptedArrivals::new([(1.0, ItemType(99))]);
        let result = SimBuilder::new(small_config(1, 1_000.0)).arrivals(script).build();
        assert!(matches!(result, Err(SimError::UnknownItem { .. })));
    }

    #[test]
    fn negative_gap_is_rejected() {
        let script = ScriptedArrivals::new([(-1.0, ItemType(0))]);
        let result = SimBuilder::new(small_config(1, 1_000.0)).arrivals(script).build();
        assert!(matches!(result, Err(SimError::InvalidGap(_))));
    }

    #[test]
    fn station_far_from_the_grid_is_fine() {
        let mut config = small_config(1, 1_000.0);
        config.layout.stations = vec![Point::new(100.0, 0.0)];
        SimBuilder::new(config).build().unwrap();
    }
}

// ── Event loop properties ─────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use std::collections::HashSet;

    use rmfs_core::{OrderId, SimConfig};
    use rmfs_events::EventKind;
    use rmfs_warehouse::OrderStatus;

    use super::{Recorder, small_config};
    use crate::{NoopObserver, SimBuilder};

    fn busy_config() -> SimConfig {
        SimConfig::new(30_000.0, 4, 0.02).with_seed(3)
    }

    #[test]
    fn time_never_goes_backwards() {
        let mut sim = SimBuilder::new(busy_config()).audit_each_event(true).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(rec.events.len() > 100);
        for pair in rec.events.windows(2) {
            assert!(pair[0].time <= pair[1].time, "{} after {}", pair[1], pair[0]);
        }
        let last = rec.events.last().unwrap().time;
        assert!(last.secs() <= 30_000.0);
        assert_eq!(sim.clock.now(), last);
        // The event that would overrun the limit stays unprocessed.
        assert!(sim.events.next_time().unwrap().secs() > 30_000.0);
    }

    #[test]
    fn every_order_is_accounted_for_exactly_once() {
        let mut sim = SimBuilder::new(busy_config()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        sim.audit().unwrap();

        let served: HashSet<OrderId> = sim.served().iter().map(|o| o.id).collect();
        assert_eq!(served.len(), sim.served().len(), "an order was served twice");

        let mut pending = 0;
        for n in 0..sim.orders_created() {
            let id = OrderId(n);
            match sim.order(id) {
                Some(order) => {
                    assert!(!served.contains(&id));
                    if order.status == OrderStatus::Queued && !sim.queued.for_item(order.item).any(|q| q == id) {
                        pending += 1;
                    }
                }
                None => assert!(served.contains(&id), "{id} vanished"),
            }
        }
        // Only the next scheduled arrival is neither arrived nor served.
        assert_eq!(pending, 1);
        assert!(sim.served().iter().all(|o| o.status == OrderStatus::Done && o.exit_time.is_some()));
    }

    #[test]
    fn queue_series_moves_in_unit_steps() {
        let mut sim = SimBuilder::new(busy_config()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let series = sim.queue_series();
        assert_eq!(series[0].time.secs(), 0.0);
        assert_eq!(series[0].active, 0);
        assert_eq!(&series[1..], rec.samples.as_slice());

        let (mut ups, mut downs) = (0, 0);
        for pair in series.windows(2) {
            match pair[1].active as i64 - pair[0].active as i64 {
                1 => ups += 1,
                -1 => downs += 1,
                d => panic!("queue moved by {d}"),
            }
        }
        assert_eq!(ups, rec.arrivals());
        assert_eq!(downs, sim.served().len());
        assert_eq!(series.last().unwrap().active, sim.active_orders());
    }

    #[test]
    fn warmup_cutoff_slices_the_served_log() {
        let config = busy_config();
        let boundary = config.warmup_boundary();
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let report = sim.into_report();

        assert_eq!(rec.warmup.len(), 1);
        let (at, cutoff) = rec.warmup[0];
        assert!(at >= boundary);
        assert_eq!(cutoff, report.served_while_warmup);
        assert!(report.served[..cutoff].iter().all(|o| o.exit_time.unwrap() <= at));
        assert!(report.steady_state().iter().all(|o| o.exit_time.unwrap() >= at));
        let before = report.served.iter().filter(|o| o.exit_time.unwrap() < boundary).count();
        assert!(before <= cutoff);
        assert_eq!(report.steady_state().len(), report.served.len() - cutoff);
    }

    #[test]
    fn observer_sees_served_orders_and_one_end() {
        let mut sim = SimBuilder::new(small_config(2, 5_000.0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ids: Vec<OrderId> = sim.served().iter().map(|o| o.id).collect();
        assert_eq!(rec.served, ids);
        assert_eq!(rec.ended.len(), 1);

        // Stepping a finished run does nothing.
        assert!(sim.step(&mut rec).unwrap().is_none());
        assert_eq!(rec.ended.len(), 1);
        assert!(sim.is_finished());
    }

    #[test]
    fn every_fulfilment_runs_the_full_event_chain() {
        let mut sim = SimBuilder::new(small_config(2, 5_000.0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let count = |f: fn(&EventKind) -> bool| rec.events.iter().filter(|e| f(&e.kind)).count();
        let picked = count(|k| matches!(k, EventKind::PickingFinished(_)));
        let stored = count(|k| matches!(k, EventKind::RobotStoresPod(_)));
        let lifted = count(|k| matches!(k, EventKind::RobotLiftsPod(_)));
        assert_eq!(picked, sim.served().len());
        assert!(stored <= picked && picked <= lifted);
    }
}

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use rmfs_core::{OrderId, RobotId, StationId};
    use rmfs_events::EventKind;
    use rmfs_warehouse::OrderStatus;

    use super::{Recorder, scripted, small_config};
    use crate::{NoopObserver, SimBuilder};

    /// Sparse arrivals, one robot, one station: nothing ever waits.
    #[test]
    fn light_load_serves_every_arrival() {
        let mut sim = scripted(small_config(1, 1_000.0), &[(10.0, 0), (400.0, 1), (800.0, 0)]);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.arrivals(), 3);
        assert_eq!(sim.served().len(), 3);
        for order in sim.served() {
            let service = order.service_time().unwrap();
            assert!(service > 0.0 && service < 200.0, "{} took {service}s", order.id);
        }
        assert!(sim.queued.is_empty());
        assert_eq!(sim.active_orders(), 0);
        assert_eq!(sim.warehouse.first_free_robot(), Some(RobotId(0)));
        assert_eq!(sim.warehouse.first_free_station(), Some(StationId(0)));
        // Stream exhausted and the robot parked: the run ends early.
        assert!(sim.clock.now().secs() < 1_000.0);
        assert!(sim.events.is_empty());
    }

    /// The only pod of an item type is busy when a second order for it
    /// arrives; that order waits and is served once the pod is stored back.
    #[test]
    fn order_waits_for_a_busy_pod() {
        let mut config = small_config(2, 1_000.0);
        config.layout.item_types = 10; // one pod per item type
        let mut sim = scripted(config, &[(0.0, 3), (0.5, 3)]);
        let mut rec = Recorder::default();

        loop {
            let event = sim.step(&mut rec).unwrap().unwrap();
            if event.kind == EventKind::OrderArrival(OrderId(1)) {
                break;
            }
        }
        assert_eq!(sim.queued.len(), 1);
        assert_eq!(sim.order(OrderId(1)).unwrap().status, OrderStatus::Queued);
        // A robot was free; only the pod was missing.
        assert_eq!(sim.warehouse.first_free_robot(), Some(RobotId(1)));

        sim.run(&mut rec).unwrap();
        let ids: Vec<OrderId> = sim.served().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(0), OrderId(1)]);
        assert!(sim.queued.is_empty());

        // The queued order was picked up by the robot that stored the pod.
        let lifts: Vec<RobotId> = rec
            .events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::RobotLiftsPod(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(lifts, vec![RobotId(0), RobotId(0)]);
    }

    /// More robots than stations: later robots queue at the busy station.
    #[test]
    fn overflow_robots_share_the_station() {
        let mut sim = scripted(small_config(3, 1_000.0), &[(0.0, 0), (0.0, 1), (0.0, 0)]);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.served().len(), 3);
        assert!(sim.warehouse.station(StationId(0)).is_free());
        assert_eq!(sim.warehouse.free_robot_count(), 3);
        sim.audit().unwrap();
    }

    #[test]
    fn same_seed_replays_the_same_run() {
        let config = rmfs_core::SimConfig::new(50_000.0, 3, 0.02).with_seed(99);
        let run = |config| {
            let mut sim = SimBuilder::new(config).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.into_report()
        };
        let a = run(config.clone());
        let b = run(config.clone());
        assert!(!a.served.is_empty());
        assert_eq!(a.served, b.served);
        assert_eq!(a.queue_series, b.queue_series);
        assert_eq!(a.final_time, b.final_time);
        assert_eq!(a.served_while_warmup, b.served_while_warmup);

        let c = run(config.with_seed(100));
        assert_ne!(a.served, c.served);
    }

    #[test]
    fn event_past_the_limit_is_not_processed() {
        let mut sim = scripted(small_config(1, 1_000.0), &[(2_000.0, 0)]);
        assert!(sim.step(&mut NoopObserver).unwrap().is_none());
        assert_eq!(sim.events_processed(), 0);
        assert_eq!(sim.events.len(), 1);
        assert_eq!(sim.clock.now().secs(), 0.0);
        let report = sim.report();
        assert!(report.served.is_empty());
        assert_eq!(report.served_while_warmup, 0);
    }

    #[test]
    fn empty_script_finishes_immediately() {
        let mut sim = scripted(small_config(1, 1_000.0), &[]);
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.is_finished());
        assert_eq!(sim.orders_created(), 0);
        assert_eq!(sim.into_report().events_processed, 0);
    }
}

// ── QueuedOrders ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod queued_tests {
    use rmfs_core::{ItemType, OrderId};

    use crate::QueuedOrders;

    #[test]
    fn pops_the_oldest_eligible_order() {
        let mut q = QueuedOrders::new(3);
        q.push(OrderId(1), ItemType(2));
        q.push(OrderId(2), ItemType(0));
        q.push(OrderId(3), ItemType(2));
        q.push(OrderId(4), ItemType(1));
        assert_eq!(q.len(), 4);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![OrderId(1), OrderId(2), OrderId(3), OrderId(4)]);

        // Item 2 has no free pod: skip orders 1 and 3.
        assert_eq!(q.pop_first_where(|i| i != ItemType(2)), Some((OrderId(2), ItemType(0))));
        assert_eq!(q.pop_first_where(|_| true), Some((OrderId(1), ItemType(2))));
        assert_eq!(q.pop_first_where(|i| i == ItemType(1)), Some((OrderId(4), ItemType(1))));
        assert_eq!(q.pop_first_where(|i| i == ItemType(1)), None);
        assert_eq!(q.for_item(ItemType(2)).collect::<Vec<_>>(), vec![OrderId(3)]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let mut q = QueuedOrders::new(2);
        assert!(q.is_empty());
        assert_eq!(q.pop_first_where(|_| true), None);
    }
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use rmfs_core::{ItemType, SimRng};

    use crate::{ArrivalProcess, PoissonArrivals, ScriptedArrivals};

    #[test]
    fn poisson_mean_gap_matches_rate() {
        let mut rng = SimRng::new(5);
        let mut p = PoissonArrivals::new(0.02, 60).unwrap();
        let n = 20_000;
        let mut total = 0.0;
        for _ in 0..n {
            let a = p.next_arrival(&mut rng).unwrap();
            assert!(a.gap >= 0.0);
            assert!(a.item.0 < 60);
            total += a.gap;
        }
        let mean = total / n as f64;
        assert!((mean - 50.0).abs() < 2.5, "mean gap {mean}");
    }

    #[test]
    fn poisson_rejects_zero_rate() {
        assert!(PoissonArrivals::new(0.0, 2).is_err());
    }

    #[test]
    fn scripted_times_become_gaps() {
        let mut rng = SimRng::new(0);
        let mut s = ScriptedArrivals::at_times([(5.0, ItemType(1)), (7.5, ItemType(0))]);
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.next_arrival(&mut rng).unwrap().gap, 5.0);
        let second = s.next_arrival(&mut rng).unwrap();
        assert_eq!((second.gap, second.item), (2.5, ItemType(0)));
        assert!(s.next_arrival(&mut rng).is_none());
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use rmfs_core::{ItemType, OrderId, SimConfig, SimTime};
    use rmfs_warehouse::Order;

    use crate::{QueueSample, ReplicationSummary, SimReport, run_replications};

    fn served(id: u64, enter: f64, exit: f64) -> Order {
        let mut o = Order::new(OrderId(id), SimTime(enter), ItemType(0));
        o.start().unwrap();
        o.finish(SimTime(exit)).unwrap();
        o
    }

    fn report() -> SimReport {
        SimReport {
            seed:                1,
            time_limit:          1_000.0,
            warmup_frac:         0.1,
            queue_series:        vec![
                QueueSample { time: SimTime(0.0), active: 0 },
                QueueSample { time: SimTime(50.0), active: 1 },
                QueueSample { time: SimTime(200.0), active: 2 },
                QueueSample { time: SimTime(600.0), active: 1 },
            ],
            served:              vec![served(0, 10.0, 60.0), served(1, 150.0, 250.0), served(2, 200.0, 500.0)],
            served_while_warmup: 1,
            final_time:          SimTime(1_000.0),
            events_processed:    10,
        }
    }

    #[test]
    fn steady_state_statistics() {
        let r = report();
        assert_eq!(r.steady_state().len(), 2);
        assert!((r.throughput() - 2.0 / 900.0).abs() < 1e-12);
        assert_eq!(r.mean_service_time(), Some(200.0));
        assert_eq!(r.service_time_std(), Some(100.0));
        assert_eq!(r.max_active(), 2);
        assert_eq!(r.final_active(), 1);
    }

    #[test]
    fn mean_active_is_time_weighted_after_warmup() {
        // From t=100: 1 until 200, 2 until 600, 1 until 1000.
        let expected = (100.0 * 1.0 + 400.0 * 2.0 + 400.0 * 1.0) / 900.0;
        assert!((report().mean_active().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn summary_reports_hourly_throughput() {
        let s = report().summary();
        assert_eq!(s.served, 3);
        assert_eq!(s.steady_served, 2);
        assert!((s.throughput_per_h - 8.0).abs() < 1e-9);
    }

    #[test]
    fn replications_follow_seed_order() {
        let config = SimConfig::new(20_000.0, 2, 0.01);
        let reports = run_replications(&config, &[7, 8, 9]).unwrap();
        let seeds: Vec<u64> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![7, 8, 9]);

        let summary = ReplicationSummary::from_reports(&reports);
        assert_eq!(summary.replications, 3);
        assert!(summary.throughput_per_h > 0.0);
        assert!(summary.mean_service_secs.is_some());
    }
}
