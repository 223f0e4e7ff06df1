//! Scalar engines and sparse matrices.
//!
//! Three arithmetic contexts share one matrix type:
//!
//! * [`Context::Exact`] : arbitrary precision binary floating point ([`BigFloat`]),
//!   rounded to nearest at the configured precision.
//! * [`Context::Native`] : hardware `f64`.
//! * [`Context::Interval`] : closed intervals ([`Interval`]) with outward rounding,
//!   so every result encloses the exact result.
//!
//! Real engines implement [`RealT`].  [`Number`] adds complex values on top
//! and [`Scalar`] tags a number with its context.  Mixed-context operations
//! promote both operands to the wider context first.

mod bigfloat;
mod error_types;
mod floats;
mod interval;
mod matrix;
mod native;
mod number;
mod scalar;

pub use bigfloat::*;
pub use error_types::*;
pub use floats::*;
pub use interval::*;
pub use matrix::*;
pub use number::*;
pub use scalar::*;
