//! Helix Core
//!
//! Core types and abstractions for building Helix work items.
//!
//! This crate contains:
//! - Domain types: project records, global settings, work items and diagnostics
//! - DTOs: the manifest read from disk and the serialized work item handed to the grid
//! - TimeSpan parsing and formatting shared by both

pub mod domain;
pub mod dto;
pub mod error;
pub mod timespan;
