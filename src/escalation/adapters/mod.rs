//! Adapter implementations for escalation ports.

pub mod memory;
pub mod rest;
