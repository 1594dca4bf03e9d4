use serde::{Deserialize, Serialize};

/// Sender address reserved for coins issued by the node itself (mining reward).
pub const MINING_SENDER: &str = "0";

/// A value transfer between two addresses. No signatures: any sender string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Reward transaction paying `amount` to `recipient` out of thin air.
    pub fn reward(recipient: impl Into<String>, amount: u64) -> Self {
        Self::new(MINING_SENDER, recipient, amount)
    }

    pub fn is_reward(&self) -> bool {
        self.sender == MINING_SENDER
    }
}
