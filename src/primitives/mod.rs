//! Core compute primitives (Vector, Matrix).
//!
//! Row-major dense storage shared by every estimator.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
