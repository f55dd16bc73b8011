//! Core types for the trade planner.
//!
//! This crate provides the foundational building blocks including:
//! - Raw and parsed trade inputs
//! - Stop-loss, position sizing and plan result types
//! - Error types shared by the other crates

pub mod types;
pub mod error;

pub use error::{CalcError, CalcResult, InputError, PlannerError, PlannerResult};
pub use types::*;
