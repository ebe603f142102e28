use crate::error::Result;
use crate::network::Network;

/// Plain gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one weight update to every layer from the errors computed by
    /// the preceding backward pass.
    pub fn step(&self, network: &mut Network) -> Result<()> {
        network.adjust_weights(self.learning_rate)
    }
}
