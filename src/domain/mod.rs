//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Amounts, orders, signatures and webhook events

pub mod payment;
