use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::activation::{Activation, Identity, LeakyReLU, ReLU, Sigmoid, Tanh};

/// Serializable selector for the built-in activations, used by
/// `NetworkSpec` so architectures can be described in JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    #[default]
    Sigmoid,
    Tanh,
    Identity,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
}

impl ActivationKind {
    pub fn build(&self) -> Arc<dyn Activation> {
        match *self {
            ActivationKind::Sigmoid => Arc::new(Sigmoid),
            ActivationKind::Tanh => Arc::new(Tanh),
            ActivationKind::Identity => Arc::new(Identity),
            ActivationKind::ReLU => Arc::new(ReLU),
            ActivationKind::LeakyReLU { alpha } => Arc::new(LeakyReLU { alpha }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_kind() {
        assert_eq!(ActivationKind::Sigmoid.build().name(), "sigmoid");
        assert_eq!(ActivationKind::ReLU.build().name(), "relu");
        let leaky = ActivationKind::LeakyReLU { alpha: 0.2 }.build();
        assert_eq!(leaky.activate(-1.0), -0.2);
    }

    #[test]
    fn test_json_names() {
        let kind: ActivationKind = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(kind, ActivationKind::Tanh);
        let kind: ActivationKind =
            serde_json::from_str(r#"{"leaky_relu":{"alpha":0.01}}"#).unwrap();
        assert_eq!(kind, ActivationKind::LeakyReLU { alpha: 0.01 });
    }
}
