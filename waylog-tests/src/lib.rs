//! Black-box scenarios (`tests/scenarios.rs`) and property tests
//! (`tests/properties.rs`) against the four public entry points
//! (`waylog_api::{typecheck, prove, unify, freshen}`). This crate has no
//! library surface of its own, matching the teacher's `chalk-tests`.
