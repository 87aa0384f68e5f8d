//! Domain layer containing webhook types and errors.
//!
//! # Module Organization
//!
//! - `webhook` - Stripe event envelope, payload shapes, error types

pub mod webhook;
