//! Test utilities and helpers for the simple-vector crates.
//!
//! This crate provides:
//! - Seeded data generation for randomized container tests
//! - An instrumented element type that counts constructions and drops
//!
//! # Usage
//!
//! This crate is intended for use as a dev-dependency only.

pub mod data_gen;
pub mod tracked;
