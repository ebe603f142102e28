use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activation::ActivationKind;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::network::Network;

/// Describes one layer in a `NetworkSpec`.
///
/// Fields:
/// - `size`      : number of neurons in this layer; its input size is the
///               previous layer's `size` (or `NetworkSpec::input_size`)
/// - `activation`: activation applied after the linear transform
/// - `bias`      : whether the layer carries a trainable bias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    #[serde(default)]
    pub activation: ActivationKind,
    #[serde(default)]
    pub bias: bool,
}

/// Architecture description that can be kept in JSON. It carries no
/// weights: `seed` decides the initial weights (zero when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Network {
    /// Builds a network from a spec. With a seed, all layers draw their
    /// weights from one `ChaCha8Rng` in layer order.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        if spec.layers.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let mut rng = spec.seed.map(ChaCha8Rng::seed_from_u64);
        let mut input_size = spec.input_size;
        let mut layers = Vec::with_capacity(spec.layers.len());

        for layer_spec in &spec.layers {
            let layer_rng = rng.as_mut().map(|r| r as &mut dyn RngCore);
            let mut layer = Layer::new(
                input_size,
                layer_spec.size,
                layer_spec.activation.build(),
                layer_rng,
            );
            if layer_spec.bias {
                layer = layer.with_bias();
            }
            input_size = layer_spec.size;
            layers.push(layer);
        }

        debug!(
            "network built from spec: {} inputs, {} layers, seed {:?}",
            spec.input_size,
            spec.layers.len(),
            spec.seed
        );
        Network::from_layers(layers)
    }
}
