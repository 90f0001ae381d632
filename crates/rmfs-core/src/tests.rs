//! Unit tests for rmfs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{OrderId, PodId, RobotId, StationId};

    #[test]
    fn index_roundtrip() {
        let id = PodId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PodId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RobotId(0) < RobotId(1));
        assert!(OrderId(100) > OrderId(99));
    }

    #[test]
    fn station_id_rejects_overflow() {
        assert!(StationId::try_from(70_000usize).is_err());
    }

    #[test]
    fn order_id_next() {
        assert_eq!(OrderId(7).next(), OrderId(8));
    }

    #[test]
    fn display() {
        assert_eq!(RobotId(7).to_string(), "RobotId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{DistanceMetric, Point, travel_secs};

    #[test]
    fn manhattan_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(DistanceMetric::Manhattan.distance(a, b), 7.0);
        assert_eq!(DistanceMetric::Manhattan.distance(b, a), 7.0);
    }

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((DistanceMetric::Euclidean.distance(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn travel_time_is_distance_over_speed() {
        assert!((travel_secs(13.0, 1.3) - 10.0).abs() < 1e-12);
        let a = Point::new(0.5, 2.5);
        let b = Point::new(6.0, 0.0);
        let t = DistanceMetric::Manhattan.travel_secs(a, b, 2.0);
        assert!((t - 4.0).abs() < 1e-12, "got {t}");
    }

    #[test]
    fn aisle_penalty_follows_row_parity() {
        assert_eq!(Point::new(0.5, 2.5).aisle_crossing_penalty(), 1.0);
        assert_eq!(Point::new(0.5, 5.5).aisle_crossing_penalty(), 0.0);
        assert_eq!(Point::new(0.5, 6.5).aisle_crossing_penalty(), 1.0);
        assert_eq!(Point::ORIGIN.aisle_crossing_penalty(), 1.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{RmfsError, SimClock, SimTime};

    #[test]
    fn time_arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(t.after(2.5).secs(), 12.5);
        assert_eq!(SimTime(15.0).since(t), 5.0);
    }

    #[test]
    fn total_order() {
        let mut v = vec![SimTime(3.0), SimTime(-0.0), SimTime(1.5), SimTime(0.0)];
        v.sort();
        assert_eq!(v.last().copied(), Some(SimTime(3.0)));
        assert!(SimTime(1.0) < SimTime(1.000_001));
    }

    #[test]
    fn clock_is_monotonic() {
        let mut clock = SimClock::new(SimTime(100.0));
        clock.advance_to(SimTime(5.0)).unwrap();
        clock.advance_to(SimTime(5.0)).unwrap();
        let err = clock.advance_to(SimTime(4.0)).unwrap_err();
        assert!(matches!(err, RmfsError::ClockRegression { .. }));
        assert_eq!(clock.now(), SimTime(5.0));
    }

    #[test]
    fn clock_limit() {
        let clock = SimClock::new(SimTime(100.0));
        assert!(!clock.is_past_limit(SimTime(100.0)));
        assert!(clock.is_past_limit(SimTime(100.5)));
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new(SimTime(1e9));
        clock.advance_to(SimTime(90_000.0)).unwrap(); // 1 day 1 hour
        assert_eq!(clock.elapsed_dhm(), (1, 1, 0));
    }
}

#[cfg(test)]
mod config {
    use crate::{LayoutConfig, RmfsError, SimConfig, SimTime};

    fn is_config_err<T: std::fmt::Debug>(r: Result<T, RmfsError>) -> bool {
        matches!(r, Err(RmfsError::Config(_)))
    }

    #[test]
    fn default_layout_has_1440_slots() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.row_count(), 24);
        assert_eq!(layout.slots_per_row(), 60);
        assert_eq!(layout.slot_count(), 1440);
    }

    #[test]
    fn defaults_validate() {
        SimConfig::default().validate().unwrap();
        SimConfig::new(1000.0, 1, 0.001).validate().unwrap();
    }

    #[test]
    fn warmup_boundary() {
        let cfg = SimConfig::new(1000.0, 1, 0.01);
        assert_eq!(cfg.warmup_boundary(), SimTime(100.0));
        assert!((cfg.steady_state_secs() - 900.0).abs() < 1e-9);
    }

    #[test]
    fn zero_robots_rejected() {
        assert!(is_config_err(SimConfig::new(1000.0, 0, 0.01).validate()));
    }

    #[test]
    fn non_positive_rates_rejected() {
        assert!(is_config_err(SimConfig::new(1000.0, 1, 0.0).validate()));
        assert!(is_config_err(SimConfig::new(1000.0, 1, -1.0).validate()));
        assert!(is_config_err(SimConfig::new(0.0, 1, 0.01).validate()));
        assert!(is_config_err(SimConfig::new(f64::NAN, 1, 0.01).validate()));
        let cfg = SimConfig { picking_rate: 0.0, ..SimConfig::default() };
        assert!(is_config_err(cfg.validate()));
    }

    #[test]
    fn zero_stations_rejected() {
        let mut cfg = SimConfig::default();
        cfg.layout.stations.clear();
        assert!(is_config_err(cfg.validate()));
    }

    #[test]
    fn item_types_must_fit_pods() {
        let mut cfg = SimConfig::default();
        cfg.layout.pick_aisles = 1;
        cfg.layout.cross_aisles = 0; // 10 pods
        cfg.layout.item_types = 11;
        assert!(is_config_err(cfg.validate()));
        cfg.layout.item_types = 10;
        cfg.validate().unwrap();
        cfg.layout.item_types = 0;
        assert!(is_config_err(cfg.validate()));
    }

    #[test]
    fn layout_validates_on_its_own() {
        LayoutConfig::default().validate().unwrap();
        let no_stations = LayoutConfig { stations: Vec::new(), ..LayoutConfig::default() };
        assert!(is_config_err(no_stations.validate()));
        let no_items = LayoutConfig { item_types: 0, ..LayoutConfig::default() };
        assert!(is_config_err(no_items.validate()));
        let no_aisles = LayoutConfig { pick_aisles: 0, ..LayoutConfig::default() };
        assert!(is_config_err(no_aisles.validate()));
    }

    #[test]
    fn warmup_range() {
        let cfg = SimConfig { warmup_frac: 1.0, ..SimConfig::default() };
        assert!(is_config_err(cfg.validate()));
        let cfg = SimConfig { warmup_frac: 0.0, ..SimConfig::default() };
        cfg.validate().unwrap();
    }
}

#[cfg(test)]
mod rng {
    use crate::{Exponential, RmfsError, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn choose_index_bounds() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.choose_index(0), None);
        for _ in 0..1000 {
            let i = rng.choose_index(7).unwrap();
            assert!(i < 7);
        }
    }

    #[test]
    fn exponential_rejects_bad_rates() {
        assert!(matches!(Exponential::new(0.0), Err(RmfsError::Config(_))));
        assert!(matches!(Exponential::new(-2.0), Err(RmfsError::Config(_))));
        assert!(matches!(Exponential::new(f64::INFINITY), Err(RmfsError::Config(_))));
    }

    #[test]
    fn exponential_sample_mean() {
        let exp = Exponential::new(0.5).unwrap();
        assert_eq!(exp.mean(), 2.0);
        let mut rng = SimRng::new(7);
        let n = 20_000;
        let mean = (0..n).map(|_| exp.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "sample mean {mean}");
    }

    #[test]
    fn child_streams_are_reproducible() {
        let mut a = SimRng::new(3);
        let mut b = SimRng::new(3);
        let x: u64 = a.child(1).random();
        let y: u64 = b.child(1).random();
        assert_eq!(x, y);
    }
}
