//! Sparse matrices over the three arithmetic contexts.

mod constructors;
mod core;
mod display;
mod kron;
mod linsolve;
mod matrix_math;
mod norms;
mod ops;
mod slicing;
mod store;

pub use self::core::*;
pub use constructors::*;
pub use display::*;
pub use kron::*;
pub use linsolve::*;
pub use norms::*;
pub use slicing::*;
pub use store::*;
