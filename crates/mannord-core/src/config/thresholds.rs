//! Classification and freeze thresholds.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Spam/ham decision thresholds plus the wider pair that triggers freezing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// `weight < spam` classifies the item as spam.
    pub spam: f64,
    /// `weight > ham` classifies the item as ham.
    pub ham: f64,
    /// `weight < definitely_spam` freezes the item.
    pub definitely_spam: f64,
    /// `weight > definitely_ham` freezes the item.
    pub definitely_ham: f64,
}

impl ClassificationThresholds {
    /// Check ordering: `definitely_spam <= spam < ham <= definitely_ham`.
    ///
    /// The outer pair must contain the inner pair, so a frozen item is
    /// always classified spam or ham.
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        let all = [self.spam, self.ham, self.definitely_spam, self.definitely_ham];
        if all.iter().any(|v| v.is_nan()) {
            return Err(ConfigError::ValidationFailed {
                field: format!("{section}.thresholds"),
                message: "thresholds must not be NaN".to_string(),
            });
        }
        if self.spam >= self.ham {
            return Err(ConfigError::ValidationFailed {
                field: format!("{section}.thresholds.spam"),
                message: format!("spam ({}) must be below ham ({})", self.spam, self.ham),
            });
        }
        if self.definitely_spam > self.spam {
            return Err(ConfigError::ValidationFailed {
                field: format!("{section}.thresholds.definitely_spam"),
                message: format!(
                    "definitely_spam ({}) must not exceed spam ({})",
                    self.definitely_spam, self.spam
                ),
            });
        }
        if self.definitely_ham < self.ham {
            return Err(ConfigError::ValidationFailed {
                field: format!("{section}.thresholds.definitely_ham"),
                message: format!(
                    "definitely_ham ({}) must not be below ham ({})",
                    self.definitely_ham, self.ham
                ),
            });
        }
        Ok(())
    }
}
