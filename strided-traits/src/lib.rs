//! Element-kind vocabulary for the strided-nd crates.
//!
//! This crate holds everything that describes *what* an array stores,
//! independent of any buffer:
//!
//! - [`ElementKind`]: the closed set of numeric element kinds
//! - [`Scalar`]: the value type crossing the get/set boundary
//! - [`Element`]: Rust element types backing each kind, with their write coercion

pub mod kind;
pub mod scalar;

pub use kind::{ElementKind, KindError};
pub use scalar::{clamp_u8, wrap_bits, Element, Scalar};
