use sweep_core::{ParameterSpec, RngHandle, SweepValue, TypeTag};
use sweep_exp::{AxisPolicy, ParameterDispatcher, SamplingMode};

fn grid(spec: &ParameterSpec) -> Vec<SweepValue> {
    ParameterDispatcher::default()
        .dispatch(spec, &mut RngHandle::from_seed(0))
        .expect("grid values")
}

#[test]
fn two_component_vector_scenario() {
    let spec = ParameterSpec::components(
        "truth.initial_state",
        TypeTag::StateVector,
        vec![0.0, 0.0],
        vec![1.0, 1.0],
        vec![1, 1],
    );
    let values = grid(&spec);
    assert_eq!(values.len(), 9);
    let mut seen = Vec::new();
    for value in &values {
        match value {
            SweepValue::StateVector(vector) => {
                assert_eq!(vector.len(), 2);
                for component in vector.as_slice() {
                    assert!([0.0, 0.5, 1.0].contains(component));
                }
                assert!(!seen.contains(&vector.as_slice().to_vec()));
                seen.push(vector.as_slice().to_vec());
            }
            other => panic!("expected a state vector, got {other:?}"),
        }
    }
}

#[test]
fn covariance_matrices_are_diagonal() {
    let spec = ParameterSpec::components(
        "sensor.noise",
        TypeTag::CovarianceMatrix,
        vec![1.0, 2.0, 3.0],
        vec![1.0, 4.0, 3.0],
        vec![0, 0, 0],
    );
    let values = grid(&spec);
    assert_eq!(values.len(), 2);
    for value in &values {
        let SweepValue::Covariance(matrix) = value else {
            panic!("expected a covariance matrix, got {value:?}");
        };
        assert_eq!(matrix.dim(), 3);
        for row in 0..3 {
            for col in 0..3 {
                if row != col {
                    assert_eq!(matrix.get(row, col), Some(0.0));
                }
            }
        }
    }
    assert_eq!(values[0].components(), Some(vec![1.0, 2.0, 3.0]));
    assert_eq!(values[1].components(), Some(vec![1.0, 4.0, 3.0]));
}

#[test]
fn tuples_and_lists_share_the_join() {
    let tuple = ParameterSpec::components(
        "radar.position",
        TypeTag::Tuple,
        vec![0.0, 10.0],
        vec![2.0, 10.0],
        vec![1, 3],
    );
    let list = ParameterSpec {
        path: "radar.mapping".into(),
        kind: TypeTag::List,
        ..tuple.clone()
    };
    let tuples = grid(&tuple);
    let lists = grid(&list);
    assert_eq!(tuples.len(), 3);
    assert_eq!(tuples[1], SweepValue::Tuple(vec![1.0, 10.0]));
    assert_eq!(lists[1], SweepValue::List(vec![1.0, 10.0]));
}

#[test]
fn booleans_ignore_everything_supplied() {
    let spec = ParameterSpec::scalar("tracker.enabled", TypeTag::Bool, -4.0, 8.0, 12);
    for mode in [SamplingMode::Grid, SamplingMode::Variance, SamplingMode::Exponential] {
        let values = ParameterDispatcher::new(mode, AxisPolicy::Logarithmic)
            .dispatch(&spec, &mut RngHandle::from_seed(3))
            .expect("flags always sample");
        assert_eq!(values, vec![SweepValue::Bool(true), SweepValue::Bool(false)]);
    }
}

#[test]
fn scalar_kinds_cast_the_axis() {
    let ints = grid(&ParameterSpec::scalar("a", TypeTag::Int, 0.0, 10.0, 2));
    assert_eq!(
        ints,
        vec![
            SweepValue::Int(0),
            SweepValue::Int(3),
            SweepValue::Int(6),
            SweepValue::Int(10)
        ]
    );
    let probs = grid(&ParameterSpec::scalar("b", TypeTag::Probability, 0.5, 0.5, 3));
    assert_eq!(probs.len(), 1);
    assert_eq!(probs[0].as_f64(), Some(0.5));
    let durations = grid(&ParameterSpec::scalar("c", TypeTag::Duration, 1.0, 2.0, 0));
    assert_eq!(durations.len(), 2);
}

#[test]
fn variance_vectors_zero_the_first_sample() {
    let spec = ParameterSpec::components(
        "truth.initial_state",
        TypeTag::StateVector,
        vec![100.0, 500.0],
        vec![300.0, 500.0],
        vec![1, 0],
    );
    let values = ParameterDispatcher::new(SamplingMode::Variance, AxisPolicy::Linear)
        .dispatch(&spec, &mut RngHandle::from_seed(9))
        .expect("variance values");
    // Component axes: [0, ~200, ~300] and [0]
    assert!(values.len() <= 3);
    assert!(values
        .iter()
        .filter_map(SweepValue::components)
        .all(|components| components[1] == 0.0));
    assert!(values
        .iter()
        .filter_map(SweepValue::components)
        .any(|components| components[0] == 0.0));
}

#[test]
fn oversized_axes_fail_only_their_own_parameter() {
    let specs = vec![
        ParameterSpec::scalar("tracker.max_hits", TypeTag::Int, 0.0, 1.0, i64::MAX),
        ParameterSpec::scalar("detector.p_detect", TypeTag::Probability, 0.5, 0.9, 1),
    ];
    let outcome = ParameterDispatcher::default().generate(&specs, &mut RngHandle::from_seed(9));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].path, "tracker.max_hits");
    assert_eq!(outcome.failures[0].error.code(), "space-too-large");
    assert_eq!(outcome.values["detector.p_detect"].len(), 3);
    assert!(!outcome.values.contains_key("tracker.max_hits"));
}
