//! Unit tests for the escalation module.
//!
//! Tests are organised by concern: domain values, payload derivation,
//! workflow orchestration, and form binding.
