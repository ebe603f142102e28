/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`   : full sweeps over the training samples
/// - `learning_rate`: gradient-descent step size
/// - `log_interval` : emit an `info!` line every this many iterations;
///                     `0` disables progress logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    pub log_interval: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that logs every 1000 iterations.
    pub fn new(iterations: usize, learning_rate: f64) -> Self {
        TrainConfig {
            iterations,
            learning_rate,
            log_interval: 1000,
        }
    }

    pub fn with_log_interval(mut self, log_interval: usize) -> Self {
        self.log_interval = log_interval;
        self
    }
}
