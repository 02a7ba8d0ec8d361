//! ocompute Core
//!
//! Core types and abstractions for the ocompute CLI.
//!
//! This crate contains:
//! - Domain types: Compute resources as the CLI sees them (Orchestration, Instance, etc.)
//! - DTOs: Wire representations exchanged with the compute REST API

pub mod domain;
pub mod dto;
