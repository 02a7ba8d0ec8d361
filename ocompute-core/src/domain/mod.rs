//! Core domain types
//!
//! This module contains the compute resources the CLI inspects and manages.
//! These types are transient snapshots of remote, API-owned state; the
//! compute service stays authoritative for all of them.

pub mod identity;
pub mod image;
pub mod instance;
pub mod orchestration;
pub mod shape;
pub mod status;
