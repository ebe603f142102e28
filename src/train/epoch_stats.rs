use serde::{Serialize, Deserialize};

/// Statistics for one sweep over the training samples, returned by
/// `train_loop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Mean per-sample MSE measured before each sample's update.
    pub loss: f64,
}
