//! Attendance Reconciliation Engine for a gym franchise network.
//!
//! This crate derives attendance incidents (absence, late arrival, early
//! departure) by reconciling planned shift assignments against recorded
//! clock-in/clock-out data, with an idempotent processing log that makes
//! repeated runs safe from any entry point.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod store;
