//! Trains the four-pair regression demo and prints the resulting outputs.
//!
//! Run with:
//!   cargo run --release -- --iterations 10000 --learning-rate 1.0
//!   RUST_LOG=debug cargo run -- --spec net.json

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backprop_nn::{evaluate_mse, train_loop, Network, NetworkSpec, Sigmoid, TrainConfig};

#[derive(Parser, Debug)]
#[command(name = "backprop-nn", about = "Train a small feed-forward network by backpropagation")]
struct Args {
    /// Full sweeps over the four training pairs
    #[arg(long, default_value_t = 10_000)]
    iterations: usize,

    #[arg(long, default_value_t = 1.0)]
    learning_rate: f64,

    /// Seed for the weight initialization
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Hidden layer width (ignored with --spec)
    #[arg(long, default_value_t = 4)]
    hidden: usize,

    /// Log the training loss every N iterations (0 disables)
    #[arg(long, default_value_t = 1000)]
    log_interval: usize,

    /// JSON network spec with 2 inputs and 2 outputs
    #[arg(long)]
    spec: Option<String>,
}

fn build_network(args: &Args) -> Result<Network> {
    if let Some(path) = &args.spec {
        let spec = NetworkSpec::load_json(path)
            .with_context(|| format!("failed to load network spec from {path}"))?;
        return Ok(Network::from_spec(&spec)?);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut network = Network::new(2, args.hidden, Arc::new(Sigmoid), Some(&mut rng));
    network.add_layer(2, Arc::new(Sigmoid), Some(&mut rng));
    Ok(network)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut network = build_network(&args)?;

    let inputs = vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![
        vec![0.0, 0.0],
        vec![0.3, 0.0],
        vec![0.6, 0.0],
        vec![0.9, 0.0],
    ];

    let config = TrainConfig::new(args.iterations, args.learning_rate)
        .with_log_interval(args.log_interval);
    train_loop(&mut network, &inputs, &targets, &config).context("training failed")?;

    let mse = evaluate_mse(&mut network, &inputs, &targets)?;
    info!("final MSE = {:.6}", mse);

    for input in &inputs {
        let output = network.forward(input)?;
        info!("Input: {:?} -> Output: {:.4?}", input, output);
    }
    info!("final state:\n{}", network);

    Ok(())
}
