//! Razorpay Checkout - Merchant-side Razorpay integration
//!
//! This crate creates Razorpay orders, verifies checkout callback signatures,
//! and authenticates and routes Razorpay webhook deliveries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
