//! Property-based testing for generator invariants
//!
//! This module provides property-based test generators and invariant
//! verification for the vector and chaos event generators.

pub mod generator_invariants;
