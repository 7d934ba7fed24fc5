//! Approval monitor: summarizes a model's approval notifications.
//!
//! The binary in `main.rs` is a manual harness around [`monitor::summarize`].

pub mod config;
pub mod errors;
pub mod models;
pub mod monitor;
pub mod notification;
