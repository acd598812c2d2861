//! Shared UI crate for Cogprofile. Data shaping, chart rendering and views live
//! here; the platform crates only launch them.

pub mod chart;
pub mod components;
pub mod core;
pub mod views;
