//! Receipt clock port.
//!
//! Supplies the wall-clock time and random suffix used to generate default
//! order receipts. Injected so tests can produce deterministic receipts.

use chrono::{DateTime, Utc};

/// Time and randomness source for receipt generation.
pub trait ReceiptClock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;

    /// Short random token that keeps receipts generated in the same
    /// millisecond distinct.
    fn random_suffix(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn ReceiptClock) {}
    }
}
