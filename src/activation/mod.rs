pub mod activation;
pub mod kind;

pub use activation::{Activation, Identity, LeakyReLU, ReLU, Sigmoid, Tanh};
pub use kind::ActivationKind;
