// Rejected calls report the right error and leave state unchanged.

use std::sync::Arc;

use backprop_nn::{Error, Layer, Network, Sigmoid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_wrong_input_length_keeps_previous_input() {
    let mut net = Network::new(3, 2, Arc::new(Sigmoid), None);
    net.set_input(&[1.0, 2.0, 3.0]).unwrap();

    let err = net.set_input(&[9.0, 9.0]).unwrap_err();
    match err {
        Error::DimensionMismatch { expected, actual, .. } => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(net.layers()[0].input_snapshot(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_wrong_target_length_keeps_previous_error() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut net = Network::new(2, 2, Arc::new(Sigmoid), Some(&mut rng));
    net.forward(&[1.0, 0.0]).unwrap();
    net.compute_output_error(&[1.0, 0.0]).unwrap();
    let error = net.layers()[0].error_snapshot();

    assert!(net.compute_output_error(&[1.0]).unwrap_err().is_dimension_mismatch());
    assert_eq!(net.layers()[0].error_snapshot(), error);
}

#[test]
fn test_training_before_input_is_structural() {
    let mut net = Network::new(2, 2, Arc::new(Sigmoid), None);
    net.add_layer(1, Arc::new(Sigmoid), None);

    assert!(matches!(net.forward_pass(), Err(Error::InputNotSet(_))));
    assert!(matches!(net.adjust_weights(0.5), Err(Error::InputNotSet(_))));
}

#[test]
fn test_cannot_remove_only_layer() {
    let mut net = Network::new(2, 2, Arc::new(Sigmoid), None);
    let err = net.remove_last_layer().unwrap_err();
    assert!(err.is_structural());
    assert_eq!(net.num_layers(), 1);
}

#[test]
fn test_chaining_is_enforced() {
    let err = Network::from_layers(vec![
        Layer::new(2, 3, Arc::new(Sigmoid), None),
        Layer::new(4, 1, Arc::new(Sigmoid), None),
    ])
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "dimension mismatch in chained layer input: expected 3, got 4"
    );
}

/// A layer appended after training has never seen an input, so a weight
/// update must be refused before any other layer applies its stale error.
#[test]
fn test_rejected_update_leaves_every_layer_unchanged() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut net = Network::new(2, 3, Arc::new(Sigmoid), Some(&mut rng));
    net.add_layer(2, Arc::new(Sigmoid), Some(&mut rng));

    net.forward(&[1.0, 0.5]).unwrap();
    net.compute_output_error(&[0.0, 1.0]).unwrap();
    net.backpropagate().unwrap();
    net.adjust_weights(1.0).unwrap();

    net.remove_last_layer().unwrap();
    net.add_layer(2, Arc::new(Sigmoid), Some(&mut rng));
    let before = net.snapshot();

    assert!(matches!(net.adjust_weights(1.0), Err(Error::InputNotSet("adjust_weights"))));
    assert!(matches!(net.backpropagate(), Err(Error::InputNotSet("backpropagate"))));
    assert_eq!(net.snapshot(), before);
}

#[test]
fn test_error_computation_before_input_is_structural() {
    let mut net = Network::new(2, 3, Arc::new(Sigmoid), None);
    net.add_layer(1, Arc::new(Sigmoid), None);
    let before = net.snapshot();

    let err = net.compute_output_error(&[1.0]).unwrap_err();
    assert!(err.is_structural());
    assert!(net.backpropagate().unwrap_err().is_structural());
    assert_eq!(net.snapshot(), before);
}
