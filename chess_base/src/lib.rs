//! # Base types for castellan
//!
//! This is an auxiliary crate for `castellan`, which contains plain value types: coordinates,
//! colors, piece kinds, square sets and game outcomes.
//!
//! Normally you don't want to use this crate directly. Use `castellan` instead.

pub mod bitboard;
pub mod bitboard_consts;
pub mod geometry;
pub mod types;
