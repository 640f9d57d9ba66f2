#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use cube_cipher_core::cfb::{CubeCipher, EngineConfig};
    use cube_cipher_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};

    const ALL_STAGES: [Stage; 4] = [Stage::Filter, Stage::Apply, Stage::Sensor, Stage::Combine];

    fn make_counters() -> TelemetryCounters {
        let mut counters = TelemetryCounters::default();
        counters.add_input(12, 2);
        for _ in 0..10 {
            counters.add_step();
        }
        counters
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // ensure elapsed > stage times
        timer.stage_times.add(Stage::Apply, Duration::from_millis(5));
        timer.stage_times.add(Stage::Sensor, Duration::from_millis(10));
        timer.finish();
        timer
    }

    #[test]
    fn counters_track_steps() {
        let c = make_counters();
        assert_eq!(c.sessions, 1);
        assert_eq!(c.chars_in, 12);
        assert_eq!(c.chars_filtered, 2);
        assert_eq!(c.steps, 10);
        assert_eq!(c.moves_applied, 10);
        assert_eq!(c.sensor_reads, 10);
        assert_eq!(c.chars_out, 10);
    }

    #[test]
    fn counters_merge_and_add_assign() {
        let mut a = make_counters();
        a.merge(&make_counters());
        assert_eq!(a.steps, 20);
        assert_eq!(a.sessions, 2);

        let mut b = make_counters();
        b += make_counters();
        assert_eq!(a, b);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Apply, Duration::from_micros(10));
        times.add(Stage::Apply, Duration::from_micros(5));
        times.add(Stage::Combine, Duration::from_micros(1));
        assert_eq!(times.get(Stage::Apply), Duration::from_micros(15));
        assert_eq!(times.get(Stage::Filter), Duration::ZERO);
        assert_eq!(times.total(), Duration::from_micros(16));
        assert!(times.contains(Stage::Combine));
        assert!(!times.contains(Stage::Sensor));
        assert_eq!(times.iter().count(), 2);
    }

    #[test]
    fn snapshot_computes_throughput() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        assert!(snapshot.elapsed >= Duration::from_millis(20));
        assert!(snapshot.steps_per_sec > 0.0);
        assert_eq!(snapshot.total_stage_time(), Duration::from_millis(15));
        assert!(snapshot.has_all_stages(&[Stage::Apply, Stage::Sensor]));
        assert!(!snapshot.has_all_stages(&ALL_STAGES));
        assert!(snapshot.sanity_check());
    }

    #[test]
    fn sanity_check_catches_missing_reads() {
        let mut counters = make_counters();
        counters.sensor_reads -= 1;
        let snapshot = TelemetrySnapshot::from(&counters, &make_timer());
        assert!(!snapshot.sanity_check());
    }

    #[test]
    fn session_attaches_snapshot_when_enabled() {
        let mut quiet = CubeCipher::new("telemetry");
        assert!(quiet.encrypt_sequence("no timing", 'x').unwrap().telemetry.is_none());

        let config = EngineConfig::default().with_telemetry(true);
        let mut cipher = CubeCipher::with_config("telemetry", config).unwrap();
        let outcome = cipher.encrypt_sequence("Hello, World", 'x').unwrap();
        let snapshot = outcome.telemetry.expect("telemetry enabled");

        assert_eq!(snapshot.counters.chars_in, 12);
        assert_eq!(snapshot.counters.chars_filtered, 1);
        assert_eq!(snapshot.counters.steps, 11);
        assert!(snapshot.has_all_stages(&ALL_STAGES));
        assert!(snapshot.sanity_check());
    }

    #[test]
    fn counters_serialize_to_json() {
        let counters = make_counters();
        let json = serde_json::to_string(&counters).unwrap();
        assert!(json.contains("\"steps\":10"));
        let back: TelemetryCounters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counters);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        let json = snapshot.to_json().unwrap();
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, snapshot.counters);
        assert_eq!(back.stage_times, snapshot.stage_times);
    }
}
