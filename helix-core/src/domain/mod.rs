//! Core domain types
//!
//! This module contains the structures the builder works with. Project records
//! and settings are read-only inputs, work items and diagnostics are produced
//! fresh for every run.

pub mod diagnostic;
pub mod project;
pub mod settings;
pub mod work_item;
