use rand::RngCore;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::activation::Activation;
use crate::error::{ensure_len, Error, Result};
use crate::loss::MseLoss;
use crate::math::{vector, Matrix};

/// One fully-connected layer: weights, per-neuron buffers and the
/// activation applied to its weighted sums.
///
/// The layer owns every buffer. They change only through `set_input`,
/// `forward`, the two `compute_error_*` calls and `adjust_weights`, and a
/// rejected call leaves all of them untouched.
#[derive(Debug, Clone)]
pub struct Layer {
    weights: Matrix,
    bias: Option<Vec<f64>>,
    input: Vec<f64>,
    /// Pre-activation sums `z`; activated values are derived on demand.
    output: Vec<f64>,
    error: Vec<f64>,
    activation: Arc<dyn Activation>,
    input_set: bool,
}

impl Layer {
    /// Allocates a layer of `output_size` neurons fed by `input_size` inputs.
    ///
    /// Without an RNG all weights start at zero. With one, each weight is an
    /// independent uniform sample from [-1, 1], drawn input row by input row,
    /// so a seeded generator reproduces the same layer.
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: Arc<dyn Activation>,
        rng: Option<&mut dyn RngCore>,
    ) -> Layer {
        let weights = match rng {
            Some(rng) => Matrix::random(input_size, output_size, rng),
            None => Matrix::zeros(input_size, output_size),
        };
        Layer::with_weights(weights, activation)
    }

    /// Builds a layer around known weights; sizes come from the matrix shape.
    pub fn with_weights(weights: Matrix, activation: Arc<dyn Activation>) -> Layer {
        let input_size = weights.rows();
        let output_size = weights.cols();
        Layer {
            weights,
            bias: None,
            input: vec![0.0; input_size],
            output: vec![0.0; output_size],
            error: vec![0.0; output_size],
            activation,
            input_set: false,
        }
    }

    /// Adds a zero-initialized bias term to every neuron.
    pub fn with_bias(mut self) -> Layer {
        self.bias = Some(vec![0.0; self.output_size()]);
        self
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn output_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn has_bias(&self) -> bool {
        self.bias.is_some()
    }

    pub fn activation(&self) -> &dyn Activation {
        self.activation.as_ref()
    }

    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        ensure_len("layer input", self.input_size(), input.len())?;
        self.input.copy_from_slice(input);
        self.input_set = true;
        Ok(())
    }

    /// `z_j = Σ_i input[i] * weights[i][j]` (plus `bias[j]`), stored as the
    /// raw output.
    pub fn forward(&mut self) -> Result<()> {
        self.require_input("forward")?;

        let mut z = self.weights.left_mul(&self.input);
        if let Some(bias) = &self.bias {
            for (z_j, b_j) in z.iter_mut().zip(bias) {
                *z_j += b_j;
            }
        }
        self.output = z;

        trace!("forward: z = {}", vector::format_vec(&self.output));
        Ok(())
    }

    pub fn activated_output(&self) -> Vec<f64> {
        self.output
            .iter()
            .map(|&z| self.activation.activate(z))
            .collect()
    }

    /// Output-layer error: `(a_j - expected_j) * derivative(a_j)`.
    pub fn compute_error_from_target(&mut self, expected: &[f64]) -> Result<()> {
        ensure_len("target", self.output_size(), expected.len())?;
        self.require_input("compute_error_from_target")?;

        let activated = self.activated_output();
        let loss_grad = MseLoss::derivative(&activated, expected);
        self.error = vector::hadamard(&loss_grad, &self.activation_derivatives(&activated));

        trace!("output error = {}", vector::format_vec(&self.error));
        Ok(())
    }

    /// Hidden-layer error from the layer this one feeds:
    /// `(Σ_k next.weights[j][k] * next.error[k]) * derivative(a_j)`.
    pub fn compute_error_from_upstream(&mut self, next: &Layer) -> Result<()> {
        ensure_len("upstream layer input", self.output_size(), next.input_size())?;
        ensure_len("upstream error", next.output_size(), next.error_view().len())?;
        self.require_input("compute_error_from_upstream")?;

        let propagated = next.weights_view().right_mul(next.error_view());
        let activated = self.activated_output();
        self.error = vector::hadamard(&propagated, &self.activation_derivatives(&activated));

        trace!("hidden error = {}", vector::format_vec(&self.error));
        Ok(())
    }

    /// Plain gradient descent: `weights[i][j] -= lr * error[j] * input[i]`.
    pub fn adjust_weights(&mut self, learning_rate: f64) -> Result<()> {
        self.require_input("adjust_weights")?;

        self.weights.sub_outer(learning_rate, &self.input, &self.error);
        if let Some(bias) = &mut self.bias {
            for (b_j, e_j) in bias.iter_mut().zip(&self.error) {
                *b_j -= learning_rate * e_j;
            }
        }
        Ok(())
    }

    /// Whether `set_input` has succeeded at least once.
    pub(crate) fn has_input(&self) -> bool {
        self.input_set
    }

    fn require_input(&self, operation: &'static str) -> Result<()> {
        if self.input_set {
            Ok(())
        } else {
            Err(Error::InputNotSet(operation))
        }
    }

    fn activation_derivatives(&self, activated: &[f64]) -> Vec<f64> {
        activated
            .iter()
            .map(|&a| self.activation.derivative(a))
            .collect()
    }

    /// Read-only view used by the previous layer during backpropagation.
    pub fn weights_view(&self) -> &Matrix {
        &self.weights
    }

    /// Read-only view used by the previous layer during backpropagation.
    pub fn error_view(&self) -> &[f64] {
        &self.error
    }

    pub fn bias_view(&self) -> Option<&[f64]> {
        self.bias.as_deref()
    }

    pub fn weights_snapshot(&self) -> Matrix {
        self.weights.clone()
    }

    pub fn input_snapshot(&self) -> Vec<f64> {
        self.input.clone()
    }

    /// Raw pre-activation buffer.
    pub fn output_snapshot(&self) -> Vec<f64> {
        self.output.clone()
    }

    pub fn error_snapshot(&self) -> Vec<f64> {
        self.error.clone()
    }

    pub fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            input_size: self.input_size(),
            output_size: self.output_size(),
            activation: self.activation.name(),
            weights: self.weights.to_vec(),
            bias: self.bias.clone(),
            input: self.input_snapshot(),
            pre_activation: self.output_snapshot(),
            output: self.activated_output(),
            error: self.error_snapshot(),
        }
    }
}

/// Copy of a layer's state for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub input_size: usize,
    pub output_size: usize,
    pub activation: &'static str,
    pub weights: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<Vec<f64>>,
    pub input: Vec<f64>,
    pub pre_activation: Vec<f64>,
    pub output: Vec<f64>,
    pub error: Vec<f64>,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Layer {} -> {} ({})",
            self.input_size(),
            self.output_size(),
            self.activation.name()
        )?;
        write!(f, "weights:\n{}", self.weights)?;
        if let Some(bias) = &self.bias {
            writeln!(f, "bias:   {}", vector::format_vec(bias))?;
        }
        writeln!(f, "input:  {}", vector::format_vec(&self.input))?;
        writeln!(f, "output: {}", vector::format_vec(&self.activated_output()))?;
        writeln!(f, "error:  {}", vector::format_vec(&self.error))
    }
}
