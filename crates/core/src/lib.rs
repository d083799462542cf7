//! Trait Assessment Core
//!
//! Foundational error types and trait-dimension types for the trait
//! assessment workspace. This crate has zero dependencies on scoring,
//! storage, or flow code.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `dimension` - The six trait dimensions and the fixed-arity `TraitMap`

pub mod dimension;
pub mod error;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Trait Dimensions ───────────────────────────────────────────────────
pub use dimension::{
    ExposureCounts, NormalizedTraitVector, TraitDimension, TraitMap, TraitVector,
};
