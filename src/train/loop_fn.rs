use tracing::{debug, info};

use crate::error::{ensure_len, Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.iterations` sweeps over the samples and
/// returns the statistics of every sweep.
///
/// Samples are visited in the order given, one weight update per sample.
///
/// # Errors
/// - `EmptyDataset` if `inputs` is empty
/// - `DimensionMismatch` if the sample counts differ, or if a sample does
///   not fit the network (reported before any weight changes)
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    validate_dataset(network, inputs, targets)?;

    let optimizer = Sgd::new(config.learning_rate);
    let mut history = Vec::with_capacity(config.iterations);
    debug!(
        "training: {} samples, {} iterations, learning rate {}",
        inputs.len(),
        config.iterations,
        config.learning_rate
    );

    for iteration in 1..=config.iterations {
        let mut total_loss = 0.0;
        for (input, target) in inputs.iter().zip(targets) {
            total_loss += train_step(network, input, target, &optimizer)?;
        }
        let loss = total_loss / inputs.len() as f64;

        if config.log_interval > 0 && iteration % config.log_interval == 0 {
            info!("Iteration {}: loss = {:.6}", iteration, loss);
        }

        history.push(EpochStats { iteration, loss });
    }

    Ok(history)
}

/// Mean MSE over a dataset without touching the weights (eval mode).
pub fn evaluate_mse(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    validate_dataset(network, inputs, targets)?;

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets) {
        let output = network.forward(input)?;
        total += MseLoss::loss(&output, target);
    }
    Ok(total / inputs.len() as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate_dataset(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(Error::EmptyDataset);
    }
    ensure_len("target count", inputs.len(), targets.len())?;
    for (input, target) in inputs.iter().zip(targets) {
        ensure_len("sample input", network.input_size(), input.len())?;
        ensure_len("sample target", network.output_size(), target.len())?;
    }
    Ok(())
}
