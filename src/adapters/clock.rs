//! Receipt clock adapters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::ReceiptClock;

/// Length of the random receipt suffix.
const SUFFIX_LEN: usize = 8;

/// Wall clock plus UUID v4 randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReceiptClock;

impl ReceiptClock for SystemReceiptClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn random_suffix(&self) -> String {
        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(SUFFIX_LEN);
        suffix
    }
}

/// Frozen clock for deterministic receipts in tests.
#[derive(Debug, Clone)]
pub struct FixedReceiptClock {
    now: DateTime<Utc>,
    suffix: String,
}

impl FixedReceiptClock {
    pub fn new(now: DateTime<Utc>, suffix: impl Into<String>) -> Self {
        Self {
            now,
            suffix: suffix.into(),
        }
    }
}

impl ReceiptClock for FixedReceiptClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn random_suffix(&self) -> String {
        self.suffix.clone()
    }
}
