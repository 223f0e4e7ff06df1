#![allow(non_snake_case)]
use crate::algebra::{BigFloat, ScalarError};
use std::fmt::Debug;

/// Core trait for the real number engine underlying an arithmetic context.
///
/// Each [`Context`](crate::algebra::Context) is backed by one engine
/// implementing `RealT`: [`BigFloat`] for the exact context, `f64` for the
/// native context and [`Interval`](crate::algebra::Interval) for the interval
/// context.  Complex values are layered on top by
/// [`Number`](crate::algebra::Number), so the same algorithms run over all
/// three engines.
///
/// Every rounding operation receives the working precision in bits.  `f64`
/// ignores it.  `BigFloat` rounds to nearest at that precision, and
/// `Interval` rounds its lower endpoint down and its upper endpoint up.
pub trait RealT: 'static + Clone + Debug + PartialEq + Send + Sync + Sized {
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;

    /// True if zero cannot be excluded from the value.  Only differs
    /// from `is_zero` for enclosures.
    fn straddles_zero(&self) -> bool {
        self.is_zero()
    }

    fn add(&self, rhs: &Self, prec: u32) -> Self;
    fn sub(&self, rhs: &Self, prec: u32) -> Self;
    fn mul(&self, rhs: &Self, prec: u32) -> Self;
    fn div(&self, rhs: &Self, prec: u32) -> Result<Self, ScalarError>;
    fn neg(&self) -> Self;
    fn abs(&self) -> Self;

    /// `self * self`.  Enclosures override this so the result
    /// stays nonnegative.
    fn square(&self, prec: u32) -> Self {
        self.mul(self, prec)
    }

    fn sqrt(&self, prec: u32) -> Result<Self, ScalarError>;

    /// Integer power of a nonnegative value.
    fn powi(&self, n: u32, prec: u32) -> Self;

    /// Principal `n`-th root of a nonnegative value.
    fn root(&self, n: u32, prec: u32) -> Result<Self, ScalarError>;

    fn max(&self, rhs: &Self) -> Self;

    fn from_f64(x: f64, prec: u32) -> Result<Self, ScalarError>;
    fn from_bigfloat(x: &BigFloat, prec: u32) -> Self;
    fn parse(s: &str, prec: u32) -> Result<Self, ScalarError>;

    /// Re-round a value produced at a higher working precision.
    fn round(&self, prec: u32) -> Self;

    /// Nearest `f64` (midpoint for enclosures).
    fn to_f64(&self) -> f64;

    /// Approximate absolute value used for pivot selection.  For
    /// enclosures this is the smallest absolute value in the enclosure.
    fn magnitude(&self) -> f64;

    fn to_string_digits(&self, digits: usize) -> String;
}

/// Trait for converting Rust integer primitives to a [`RealT`] value
/// without going through `f64`.
pub trait AsRealT<R> {
    fn as_R(&self, prec: u32) -> R;
}

macro_rules! impl_as_RealT {
    ($ty:ty) => {
        impl<R> AsRealT<R> for $ty
        where
            R: RealT,
        {
            #[inline]
            fn as_R(&self, prec: u32) -> R {
                R::from_bigfloat(&BigFloat::from(*self), prec)
            }
        }
    };
}
impl_as_RealT!(u32);
impl_as_RealT!(u64);
impl_as_RealT!(usize);
impl_as_RealT!(i32);
impl_as_RealT!(i64);
