//!  __mpmatrix__ is a Rust library of dense-interface, sparse-storage matrices
//! over multiple precision scalars.
//!
//! Every [`Matrix`](algebra::Matrix) belongs to one arithmetic context:
//!
//! * __Exact__ : arbitrary precision binary floating point, rounded to nearest.
//! * __Native__ : hardware double precision.
//! * __Interval__ : outward rounded intervals that enclose the true result.
//!
//! Working precision, guard bits and display digits are global settings,
//! see [`settings`].
//!
//! ## Features
//!
//! * __Sparse storage__: only nonzero entries are kept.  Matrix dimensions act
//!   as a window over the store, so shrinking and regrowing a matrix is cheap.
//!
//! * __Mixed contexts__: operands from different contexts are promoted to the
//!   wider one (`Native < Exact < Interval`) before any arithmetic.
//!
//! * __Linear algebra__: products, integer powers, inverses and linear solves,
//!   Kronecker products, and vector and matrix norms.
//!
//! ```
//! use mpmatrix::algebra::{Context, Matrix};
//!
//! let A = Matrix::from_rows(Context::Exact, &[[1, 2], [3, 4]]).unwrap();
//! let B = &A * &A;
//! assert_eq!(B, Matrix::from_rows(Context::Exact, &[[7, 10], [15, 22]]).unwrap());
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod settings;
