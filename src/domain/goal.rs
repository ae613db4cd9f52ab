use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal funded by manual contributions, capped at its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Adds funds, clamping the running total at the target. Contributions
    /// are additive only; the total never decreases.
    pub fn add_funds(&mut self, amount: f64) {
        self.current_amount = (self.current_amount + amount).min(self.target_amount);
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn progress_percent(&self) -> u32 {
        if self.target_amount <= 0.0 {
            return 0;
        }
        let percent = (self.current_amount / self.target_amount * 100.0).round();
        percent.min(100.0) as u32
    }
}
