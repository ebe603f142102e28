use rand::RngCore;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::activation::Activation;
use crate::error::{ensure_len, Error, Result};
use crate::layers::dense::{Layer, LayerSnapshot};

/// Ordered stack of layers where each layer's output size equals the next
/// layer's input size. Always holds at least one layer.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network with a single layer.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Arc<dyn Activation>,
        rng: Option<&mut dyn RngCore>,
    ) -> Network {
        let layer = Layer::new(input_size, output_size, activation, rng);
        debug!("network created: {} -> {}", input_size, output_size);
        Network { layers: vec![layer] }
    }

    /// Chains pre-built layers, checking every adjacent pair.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let mut iter = layers.into_iter();
        let first = iter.next().ok_or(Error::EmptyNetwork)?;
        let mut network = Network { layers: vec![first] };
        for layer in iter {
            network.push_layer(layer)?;
        }
        Ok(network)
    }

    /// Appends a layer fed by the current last layer.
    pub fn add_layer(
        &mut self,
        output_size: usize,
        activation: Arc<dyn Activation>,
        rng: Option<&mut dyn RngCore>,
    ) {
        let input_size = self.output_size();
        self.layers
            .push(Layer::new(input_size, output_size, activation, rng));
        debug!("layer added: {} -> {} ({} layers)", input_size, output_size, self.layers.len());
    }

    /// Appends a pre-built layer whose input size must match the current
    /// output size.
    pub fn push_layer(&mut self, layer: Layer) -> Result<()> {
        ensure_len("chained layer input", self.output_size(), layer.input_size())?;
        debug!(
            "layer pushed: {} -> {} ({} layers)",
            layer.input_size(),
            layer.output_size(),
            self.layers.len() + 1
        );
        self.layers.push(layer);
        Ok(())
    }

    pub fn remove_last_layer(&mut self) -> Result<Layer> {
        if self.layers.len() == 1 {
            return Err(Error::OnlyRemainingLayer);
        }
        let removed = self.layers.pop().ok_or(Error::OnlyRemainingLayer)?;
        debug!("layer removed ({} layers left)", self.layers.len());
        Ok(removed)
    }

    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        self.layers[0].set_input(input)
    }

    /// Runs every layer in order, feeding each activated output into the
    /// next layer.
    pub fn forward_pass(&mut self) -> Result<()> {
        let n = self.layers.len();
        for i in 0..n {
            self.layers[i].forward()?;
            if i + 1 < n {
                let activated = self.layers[i].activated_output();
                self.layers[i + 1].set_input(&activated)?;
            }
        }
        Ok(())
    }

    /// `set_input` followed by `forward_pass`; returns the output.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.set_input(input)?;
        self.forward_pass()?;
        Ok(self.output())
    }

    pub fn compute_output_error(&mut self, expected: &[f64]) -> Result<()> {
        let last = self.layers.len() - 1;
        self.layers[last].compute_error_from_target(expected)
    }

    /// Propagates the output error down to the first layer. Must follow
    /// `compute_output_error`.
    pub fn backpropagate(&mut self) -> Result<()> {
        self.require_inputs("backpropagate")?;
        for i in (1..self.layers.len()).rev() {
            let (lower, upper) = self.layers.split_at_mut(i);
            lower[i - 1].compute_error_from_upstream(&upper[0])?;
        }
        Ok(())
    }

    /// Updates every layer. Layers are independent at this point since all
    /// errors were computed by `backpropagate`.
    pub fn adjust_weights(&mut self, learning_rate: f64) -> Result<()> {
        self.require_inputs("adjust_weights")?;
        for layer in &mut self.layers {
            layer.adjust_weights(learning_rate)?;
        }
        Ok(())
    }

    /// Activated output of the last layer.
    pub fn output(&self) -> Vec<f64> {
        self.last_layer().activated_output()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.last_layer().output_size()
    }

    /// Fails before any layer is touched if one of them never had an input,
    /// e.g. a layer appended after the last training step.
    fn require_inputs(&self, operation: &'static str) -> Result<()> {
        if self.layers.iter().all(Layer::has_input) {
            Ok(())
        } else {
            Err(Error::InputNotSet(operation))
        }
    }

    fn last_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    pub fn snapshot(&self) -> Vec<LayerSnapshot> {
        self.layers.iter().map(Layer::snapshot).collect()
    }

    /// Pretty-printed JSON of every layer's state, for logs.
    pub fn state_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network with {} layer(s)", self.layers.len())?;
        for (i, layer) in self.layers.iter().enumerate() {
            write!(f, "[{i}] {layer}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Sigmoid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sigmoid() -> Arc<dyn Activation> {
        Arc::new(Sigmoid)
    }

    #[test]
    fn test_add_layer_chains_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut net = Network::new(2, 4, sigmoid(), Some(&mut rng));
        net.add_layer(3, sigmoid(), Some(&mut rng));
        net.add_layer(2, sigmoid(), None);

        assert_eq!(net.num_layers(), 3);
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.output_size(), 2);
        for pair in net.layers().windows(2) {
            assert_eq!(pair[0].output_size(), pair[1].input_size());
        }
    }

    #[test]
    fn test_push_layer_rejects_wrong_size() {
        let mut net = Network::new(2, 4, sigmoid(), None);
        let err = net.push_layer(Layer::new(3, 1, sigmoid(), None)).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(net.num_layers(), 1);
    }

    #[test]
    fn test_from_layers_rejects_empty() {
        let err = Network::from_layers(vec![]).unwrap_err();
        assert!(matches!(err, Error::EmptyNetwork));
    }

    #[test]
    fn test_remove_last_layer() {
        let mut net = Network::new(2, 3, sigmoid(), None);
        net.add_layer(1, sigmoid(), None);

        let removed = net.remove_last_layer().unwrap();
        assert_eq!(removed.input_size(), 3);
        assert_eq!(net.output_size(), 3);

        assert!(matches!(net.remove_last_layer(), Err(Error::OnlyRemainingLayer)));
        assert_eq!(net.num_layers(), 1);
    }

    #[test]
    fn test_forward_pass_without_input_fails() {
        let mut net = Network::new(2, 2, sigmoid(), None);
        assert!(net.forward_pass().unwrap_err().is_structural());
    }

    #[test]
    fn test_state_json_lists_layers() {
        let mut net = Network::new(2, 3, sigmoid(), None);
        net.add_layer(1, sigmoid(), None);
        net.forward(&[1.0, 0.0]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&net.state_json().unwrap()).unwrap();
        let layers = json.as_array().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1]["output"][0], 0.5);

        assert!(net.to_string().starts_with("Network with 2 layer(s)"));
    }
}
