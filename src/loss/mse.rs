/// Squared-error loss used for reporting and for the output-layer error.
pub struct MseLoss;

impl MseLoss {
    /// Mean of the squared differences.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        let total: f64 = predicted
            .iter()
            .zip(expected)
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        total / n
    }

    /// Gradient of `0.5 * Σ (predicted - expected)²` with respect to each
    /// prediction.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected).map(|(a, b)| a - b).collect()
    }
}
