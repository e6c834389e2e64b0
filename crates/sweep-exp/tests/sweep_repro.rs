use sweep_core::{ParameterSpec, TypeTag};
use sweep_exp::{to_canonical_json_bytes, EngineConfig, SamplingMode, SweepEngine};

fn specs() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::scalar("tracker.max_hits", TypeTag::Int, 100.0, 400.0, 2),
        ParameterSpec::components(
            "truth.initial_state",
            TypeTag::StateVector,
            vec![0.0, 100.0],
            vec![0.0, 300.0],
            vec![0, 1],
        ),
        ParameterSpec::flag("tracker.use_gating"),
    ]
}

#[test]
fn grid_reports_repeat() {
    let config = EngineConfig::with_seed(8001);
    let report_a = SweepEngine::new(config.clone()).run(&specs()).expect("sweep");
    let report_b = SweepEngine::new(config).run(&specs()).expect("sweep");
    assert_eq!(report_a, report_b);
    let json_a = to_canonical_json_bytes(&report_a).expect("json");
    let json_b = to_canonical_json_bytes(&report_b).expect("json");
    assert_eq!(json_a, json_b);
    // 4 ints x 3 vectors x 2 flags
    assert_eq!(report_a.configurations.len(), 24);
}

#[test]
fn variance_reports_repeat_with_same_seed() {
    let config = EngineConfig {
        mode: SamplingMode::Variance,
        ..EngineConfig::with_seed(4242)
    };
    let report_a = SweepEngine::new(config.clone()).run(&specs()).expect("sweep");
    let report_b = SweepEngine::new(config).run(&specs()).expect("sweep");
    assert_eq!(
        to_canonical_json_bytes(&report_a).expect("json"),
        to_canonical_json_bytes(&report_b).expect("json")
    );
    assert!(report_a.failures.is_empty());
}

#[test]
fn plan_hash_tracks_inputs() {
    let a = SweepEngine::new(EngineConfig::with_seed(1))
        .run(&specs())
        .expect("sweep");
    let b = SweepEngine::new(EngineConfig::with_seed(2))
        .run(&specs())
        .expect("sweep");
    assert_ne!(a.plan_hash, b.plan_hash);
    assert_eq!(a.plan_hash.len(), 64);
}
