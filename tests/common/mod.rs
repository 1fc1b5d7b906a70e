//! Shared test utilities for cadgraph integration tests.
//!
//! Consolidates the document and block builders plus the float assertion
//! helpers that the lifecycle, block reference, and regeneration tests
//! share, imported via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use cadgraph::types::Vector3;

/// Tolerance for geometry comparisons.
pub const EPSILON: f64 = 1e-9;

/// Assert two floats are within [`EPSILON`].
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Assert two vectors are within [`EPSILON`] componentwise.
pub fn assert_vec3_close(actual: Vector3, expected: Vector3) {
    assert!(
        (actual.x - expected.x).abs() < EPSILON
            && (actual.y - expected.y).abs() < EPSILON
            && (actual.z - expected.z).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
