//! Step definitions for support ticket escalation scenarios.

pub mod given;
pub mod when;
pub mod world;
