use std::fmt::Debug;

/// Element-wise nonlinearity applied to a layer's weighted sums.
///
/// Implementations are stateless values shared between layers through
/// `Arc<dyn Activation>`.
pub trait Activation: Debug + Send + Sync {
    /// Maps a pre-activation value `z` to the activated value `a`.
    fn activate(&self, z: f64) -> f64;

    /// `da/dz`, written in terms of the **activated** value `a = activate(z)`.
    /// Callers must pass the post-activation value, never the raw sum.
    fn derivative(&self, a: f64) -> f64;

    /// Short name used in state dumps.
    fn name(&self) -> &'static str;
}

/// Logistic sigmoid `1 / (1 + e^-z)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn activate(&self, z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    fn derivative(&self, a: f64) -> f64 {
        a * (1.0 - a)
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tanh;

impl Activation for Tanh {
    fn activate(&self, z: f64) -> f64 {
        z.tanh()
    }

    fn derivative(&self, a: f64) -> f64 {
        1.0 - a * a
    }

    fn name(&self) -> &'static str {
        "tanh"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Activation for Identity {
    fn activate(&self, z: f64) -> f64 {
        z
    }

    fn derivative(&self, _a: f64) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReLU;

impl Activation for ReLU {
    fn activate(&self, z: f64) -> f64 {
        if z > 0.0 { z } else { 0.0 }
    }

    // a > 0 exactly when z > 0.
    fn derivative(&self, a: f64) -> f64 {
        if a > 0.0 { 1.0 } else { 0.0 }
    }

    fn name(&self) -> &'static str {
        "relu"
    }
}

/// Leaky ReLU with negative slope `alpha`. `alpha` must be positive so the
/// sign of the activated value matches the sign of `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyReLU {
    pub alpha: f64,
}

impl Activation for LeakyReLU {
    fn activate(&self, z: f64) -> f64 {
        if z > 0.0 { z } else { self.alpha * z }
    }

    fn derivative(&self, a: f64) -> f64 {
        if a > 0.0 { 1.0 } else { self.alpha }
    }

    fn name(&self) -> &'static str {
        "leaky_relu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Central difference of `activate` at `z`, compared with `derivative`
    /// evaluated at the activated value.
    fn check_derivative(act: &dyn Activation, z: f64) {
        let h = 1e-6;
        let numeric = (act.activate(z + h) - act.activate(z - h)) / (2.0 * h);
        let analytic = act.derivative(act.activate(z));
        assert_abs_diff_eq!(numeric, analytic, epsilon = 1e-6);
    }

    #[test]
    fn test_sigmoid_values() {
        assert_eq!(Sigmoid.activate(0.0), 0.5);
        assert_eq!(Sigmoid.derivative(0.5), 0.25);
        assert!(Sigmoid.activate(50.0) > 0.999);
        assert!(Sigmoid.activate(-50.0) < 0.001);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let acts: [&dyn Activation; 5] = [
            &Sigmoid,
            &Tanh,
            &Identity,
            &ReLU,
            &LeakyReLU { alpha: 0.1 },
        ];
        for act in acts {
            for z in [-2.0, -0.3, 0.7, 1.5] {
                check_derivative(act, z);
            }
        }
    }
}
