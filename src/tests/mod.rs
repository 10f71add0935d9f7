//! Internal test modules - whitebox tests with crate access
//!
//! End-to-end behavior of the controller driving an in-memory surface,
//! checked against hand-computed layouts.

mod acceptance_scenarios;
