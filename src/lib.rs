//! Convênio kiosk - a terminal check-in station for health-insurance providers
//!
//! This library provides the provider catalogue, the per-provider
//! authentication attempts and their timers, and the TUI that drives them.

pub mod checkin;
pub mod logging;
pub mod ui;
