use crate::{
    error::Result,
    loss::mse::MseLoss,
    network::network::Network,
    optim::sgd::Sgd,
};

/// One training step on a single sample: set the input, run the forward
/// pass, compute the output error, backpropagate and update the weights.
///
/// Returns the sample's MSE measured before the update.
pub fn train_step(
    network: &mut Network,
    input: &[f64],
    expected: &[f64],
    optimizer: &Sgd,
) -> Result<f64> {
    network.set_input(input)?;
    network.forward_pass()?;
    let loss = MseLoss::loss(&network.output(), expected);

    network.compute_output_error(expected)?;
    network.backpropagate()?;
    optimizer.step(network)?;

    Ok(loss)
}
