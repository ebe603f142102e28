//! A small fully-connected feed-forward network trained by backpropagation.
//!
//! A training step is always the same five calls on a [`Network`]:
//!
//! ```
//! use std::sync::Arc;
//! use backprop_nn::{Network, Sigmoid};
//!
//! let mut net = Network::new(2, 4, Arc::new(Sigmoid), None);
//! net.add_layer(2, Arc::new(Sigmoid), None);
//!
//! net.set_input(&[0.0, 1.0])?;
//! net.forward_pass()?;
//! net.compute_output_error(&[0.0, 0.0])?;
//! net.backpropagate()?;
//! net.adjust_weights(1.0)?;
//! # Ok::<(), backprop_nn::Error>(())
//! ```

pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::{Activation, ActivationKind, Identity, LeakyReLU, ReLU, Sigmoid, Tanh};
pub use layers::dense::{Layer, LayerSnapshot};
pub use network::{LayerSpec, Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{evaluate_mse, train_loop, train_step, EpochStats, TrainConfig};
