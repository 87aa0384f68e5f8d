//! Subscription Webhooks - Stripe webhook receiver
//!
//! Verifies signed Stripe deliveries and forwards subscription lifecycle
//! changes (checkout completion, subscription updates and deletions) to a
//! subscription updater.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
