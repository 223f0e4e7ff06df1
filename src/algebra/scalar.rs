#![allow(non_snake_case)]
use crate::algebra::{AsRealT, BigFloat, Interval, Number, RealT, Round, ScalarError};
use crate::settings::{settings, PrecisionSettings};
use enum_dispatch::enum_dispatch;
use num_complex::Complex64;
use std::borrow::Cow;
use std::fmt;

macro_rules! dispatch_unary {
    ($a:expr, |$x:ident| $body:expr) => {
        match $a {
            Scalar::Exact($x) => Scalar::Exact($body),
            Scalar::Native($x) => Scalar::Native($body),
            Scalar::Interval($x) => Scalar::Interval($body),
        }
    };
}
macro_rules! dispatch_binary {
    ($a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {
        match ($a, $b) {
            (Scalar::Exact($x), Scalar::Exact($y)) => Scalar::Exact($body),
            (Scalar::Native($x), Scalar::Native($y)) => Scalar::Native($body),
            (Scalar::Interval($x), Scalar::Interval($y)) => Scalar::Interval($body),
            _ => unreachable!("operands are coerced to a common context"),
        }
    };
}

/// Context-independent queries on a scalar value.
#[enum_dispatch]
pub trait ScalarValue {
    fn is_zero(&self) -> bool;

    /// True if the imaginary part is zero.
    fn is_real(&self) -> bool;

    /// True if zero cannot be excluded from the value.
    fn straddles_zero(&self) -> bool;

    /// Approximate absolute value.  Enclosures report the smallest
    /// absolute value they contain.
    fn magnitude(&self) -> f64;

    /// Nearest `f64` to the real part.
    fn to_f64(&self) -> f64;

    fn to_complex64(&self) -> Complex64;

    fn to_string_digits(&self, digits: usize) -> String;
}

impl<R: RealT> ScalarValue for Number<R> {
    fn is_zero(&self) -> bool {
        self.re().is_zero() && self.im().is_zero()
    }

    fn is_real(&self) -> bool {
        self.im().is_zero()
    }

    fn straddles_zero(&self) -> bool {
        self.re().straddles_zero() && self.im().straddles_zero()
    }

    fn magnitude(&self) -> f64 {
        match self {
            Number::Real(a) => a.magnitude(),
            Number::Complex(a, b) => a.magnitude().hypot(b.magnitude()),
        }
    }

    fn to_f64(&self) -> f64 {
        self.re().to_f64()
    }

    fn to_complex64(&self) -> Complex64 {
        Complex64::new(self.re().to_f64(), self.im().to_f64())
    }

    fn to_string_digits(&self, digits: usize) -> String {
        match self {
            Number::Real(a) => a.to_string_digits(digits),
            Number::Complex(a, b) => {
                let (sign, b) = if b.to_f64() < 0.0 {
                    ('-', b.neg())
                } else {
                    ('+', b.clone())
                };
                format!(
                    "({} {} {}j)",
                    a.to_string_digits(digits),
                    sign,
                    b.to_string_digits(digits)
                )
            }
        }
    }
}

/// A scalar tagged with the arithmetic context that produced it.
///
/// Rust literals (`i32`, `f64`, `Complex64`, ...) convert into the
/// `Native` variant, so combining a literal with a matrix never raises
/// the matrix's context.  The exception is an integer that needs more
/// than 53 significant bits, which becomes an `Exact` value so that it
/// reaches the target context without rounding.
#[enum_dispatch(ScalarValue)]
#[derive(Clone, Debug)]
pub enum Scalar {
    Exact(Number<BigFloat>),
    Native(Number<f64>),
    Interval(Number<Interval>),
}

impl Scalar {
    pub fn context(&self) -> Context {
        match self {
            Scalar::Exact(_) => Context::Exact,
            Scalar::Native(_) => Context::Native,
            Scalar::Interval(_) => Context::Interval,
        }
    }

    /// Convert into `ctx` at that context's current working precision.
    pub fn to_context(&self, ctx: Context) -> Result<Scalar, ScalarError> {
        ctx.convert(self)
    }

    pub fn as_exact(&self) -> Option<&Number<BigFloat>> {
        match self {
            Scalar::Exact(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_native(&self) -> Option<&Number<f64>> {
        match self {
            Scalar::Native(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Number<Interval>> {
        match self {
            Scalar::Interval(x) => Some(x),
            _ => None,
        }
    }

    fn common_ops(&self, rhs: &Scalar) -> ScalarOps {
        self.context().promote(rhs.context()).ops()
    }

    pub fn add(&self, rhs: &Scalar) -> Result<Scalar, ScalarError> {
        self.common_ops(rhs).add(self, rhs)
    }

    pub fn sub(&self, rhs: &Scalar) -> Result<Scalar, ScalarError> {
        self.common_ops(rhs).sub(self, rhs)
    }

    pub fn mul(&self, rhs: &Scalar) -> Result<Scalar, ScalarError> {
        self.common_ops(rhs).mul(self, rhs)
    }

    pub fn div(&self, rhs: &Scalar) -> Result<Scalar, ScalarError> {
        self.common_ops(rhs).div(self, rhs)
    }

    pub fn neg(&self) -> Scalar {
        dispatch_unary!(self, |x| x.neg())
    }

    pub fn conj(&self) -> Scalar {
        dispatch_unary!(self, |x| x.conj())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.common_ops(other).equals(self, other)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or_else(|| settings().display_digits);
        write!(f, "{}", self.to_string_digits(digits))
    }
}

macro_rules! impl_scalar_from_float {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::Native(Number::Real(f64::from(v)))
                }
            }
        )*
    };
}
impl_scalar_from_float!(f32, f64);

// integers wider than the f64 mantissa are kept exact
macro_rules! impl_scalar_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    let x = BigFloat::from(v);
                    if x.bits() <= u64::from(f64::MANTISSA_DIGITS) {
                        Scalar::Native(Number::Real(v as f64))
                    } else {
                        Scalar::Exact(Number::Real(x))
                    }
                }
            }
        )*
    };
}
impl_scalar_from_int!(i32, i64, u32, u64, usize);

impl From<Complex64> for Scalar {
    fn from(z: Complex64) -> Self {
        Scalar::Native(Number::Complex(z.re, z.im))
    }
}

impl From<BigFloat> for Scalar {
    fn from(x: BigFloat) -> Self {
        Scalar::Exact(Number::Real(x))
    }
}

impl From<Interval> for Scalar {
    fn from(x: Interval) -> Self {
        Scalar::Interval(Number::Real(x))
    }
}

impl From<&Scalar> for Scalar {
    fn from(x: &Scalar) -> Self {
        x.clone()
    }
}

// ---------------------------------------------------------------------
// contexts
// ---------------------------------------------------------------------

/// Arithmetic context of a matrix.
///
/// Mixed operations are carried out in the higher-ranked context of the
/// two operands: `Native < Exact < Interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Context {
    /// hardware `f64` arithmetic
    Native,
    /// arbitrary precision arithmetic, rounded to nearest
    Exact,
    /// interval arithmetic with outward rounding
    Interval,
}

// result context of a mixed operation, indexed by operand rank
const PROMOTION: [[Context; 3]; 3] = [
    [Context::Native, Context::Exact, Context::Interval],
    [Context::Exact, Context::Exact, Context::Interval],
    [Context::Interval, Context::Interval, Context::Interval],
];

impl Context {
    fn rank(self) -> usize {
        match self {
            Context::Native => 0,
            Context::Exact => 1,
            Context::Interval => 2,
        }
    }

    pub fn promote(self, other: Context) -> Context {
        PROMOTION[self.rank()][other.rank()]
    }

    /// Current working precision in bits.
    pub fn precision(self) -> u32 {
        self.precision_in(&settings())
    }

    /// Working precision in bits under `cfg`.
    pub fn precision_in(self, cfg: &PrecisionSettings) -> u32 {
        match self {
            Context::Native => 53,
            Context::Exact => cfg.exact_prec,
            Context::Interval => cfg.interval_prec,
        }
    }

    /// Scalar operations at the current working precision.
    pub fn ops(self) -> ScalarOps {
        self.ops_in(&settings())
    }

    /// Scalar operations at the working precision given by `cfg`.
    pub fn ops_in(self, cfg: &PrecisionSettings) -> ScalarOps {
        ScalarOps::new(self, self.precision_in(cfg))
    }

    pub fn zero(self) -> Scalar {
        self.ops().zero()
    }

    pub fn one(self) -> Scalar {
        self.ops().one()
    }

    pub fn convert(self, x: &Scalar) -> Result<Scalar, ScalarError> {
        self.ops().convert(x)
    }

    pub fn parse(self, s: &str) -> Result<Scalar, ScalarError> {
        self.ops().parse(s)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Context::Native => "native",
            Context::Exact => "exact",
            Context::Interval => "interval",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------
// scalar operations
// ---------------------------------------------------------------------

/// Scalar arithmetic in a fixed context at a fixed working precision.
///
/// Operands from other contexts are converted first.  The precision is
/// captured once so that a whole matrix operation runs at a single
/// precision even if the global settings change concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarOps {
    ctx: Context,
    prec: u32,
}

impl ScalarOps {
    pub fn new(ctx: Context, prec: u32) -> Self {
        let prec = match ctx {
            Context::Native => 53,
            _ => prec,
        };
        Self { ctx, prec }
    }

    pub fn context(&self) -> Context {
        self.ctx
    }

    pub fn precision(&self) -> u32 {
        self.prec
    }

    /// Same context with `bits` extra bits of working precision.
    pub fn with_guard_bits(self, bits: u32) -> Self {
        Self::new(self.ctx, self.prec.saturating_add(bits))
    }

    pub fn zero(&self) -> Scalar {
        match self.ctx {
            Context::Exact => Scalar::Exact(Number::zero()),
            Context::Native => Scalar::Native(Number::zero()),
            Context::Interval => Scalar::Interval(Number::zero()),
        }
    }

    pub fn one(&self) -> Scalar {
        match self.ctx {
            Context::Exact => Scalar::Exact(Number::one()),
            Context::Native => Scalar::Native(Number::one()),
            Context::Interval => Scalar::Interval(Number::one()),
        }
    }

    /// Exact integer `n` rounded into this context.
    pub fn from_usize(&self, n: usize) -> Scalar {
        let p = self.prec;
        match self.ctx {
            Context::Exact => Scalar::Exact(Number::Real(n.as_R(p))),
            Context::Native => Scalar::Native(Number::Real(n.as_R(p))),
            Context::Interval => Scalar::Interval(Number::Real(n.as_R(p))),
        }
    }

    pub fn parse(&self, s: &str) -> Result<Scalar, ScalarError> {
        let p = self.prec;
        Ok(match self.ctx {
            Context::Exact => Scalar::Exact(Number::Real(BigFloat::parse(s, p, Round::Nearest)?)),
            Context::Native => Scalar::Native(Number::Real(<f64 as RealT>::parse(s, p)?)),
            Context::Interval => Scalar::Interval(Number::Real(Interval::parse(s, p)?)),
        })
    }

    /// Convert `x` into this context, rounding to this precision.
    ///
    /// Exact and native values become intervals by outward rounding.
    /// Intervals leave the interval context through their midpoint.
    pub fn convert(&self, x: &Scalar) -> Result<Scalar, ScalarError> {
        let p = self.prec;
        Ok(match (self.ctx, x) {
            (Context::Exact, Scalar::Exact(v)) => Scalar::Exact(v.round(p)),
            (Context::Exact, Scalar::Native(v)) => {
                Scalar::Exact(v.try_map(|r| <BigFloat as RealT>::from_f64(*r, p))?)
            }
            (Context::Exact, Scalar::Interval(v)) => Scalar::Exact(v.map(|r| r.mid(p))),

            (Context::Native, Scalar::Exact(v)) => Scalar::Native(v.map(|r| r.to_f64())),
            (Context::Native, Scalar::Native(v)) => Scalar::Native(v.clone()),
            (Context::Native, Scalar::Interval(v)) => Scalar::Native(v.map(|r| RealT::to_f64(r))),

            (Context::Interval, Scalar::Exact(v)) => {
                Scalar::Interval(v.map(|r| Interval::from_bigfloat(r, p)))
            }
            (Context::Interval, Scalar::Native(v)) => {
                Scalar::Interval(v.try_map(|r| <Interval as RealT>::from_f64(*r, p))?)
            }
            (Context::Interval, Scalar::Interval(v)) => Scalar::Interval(v.round(p)),
        })
    }

    // borrows values already in this context, converts the rest
    fn coerce<'a>(&self, x: &'a Scalar) -> Result<Cow<'a, Scalar>, ScalarError> {
        if x.context() == self.ctx {
            Ok(Cow::Borrowed(x))
        } else {
            Ok(Cow::Owned(self.convert(x)?))
        }
    }

    pub fn add(&self, a: &Scalar, b: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, b, p) = (self.coerce(a)?, self.coerce(b)?, self.prec);
        Ok(dispatch_binary!(a.as_ref(), b.as_ref(), |x, y| x.add(y, p)))
    }

    pub fn sub(&self, a: &Scalar, b: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, b, p) = (self.coerce(a)?, self.coerce(b)?, self.prec);
        Ok(dispatch_binary!(a.as_ref(), b.as_ref(), |x, y| x.sub(y, p)))
    }

    pub fn mul(&self, a: &Scalar, b: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, b, p) = (self.coerce(a)?, self.coerce(b)?, self.prec);
        Ok(dispatch_binary!(a.as_ref(), b.as_ref(), |x, y| x.mul(y, p)))
    }

    pub fn div(&self, a: &Scalar, b: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, b, p) = (self.coerce(a)?, self.coerce(b)?, self.prec);
        Ok(dispatch_binary!(a.as_ref(), b.as_ref(), |x, y| x.div(y, p)?))
    }

    /// Larger of two real values.
    pub fn max(&self, a: &Scalar, b: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, b) = (self.coerce(a)?, self.coerce(b)?);
        Ok(dispatch_binary!(a.as_ref(), b.as_ref(), |x, y| x.max(y)?))
    }

    pub fn neg(&self, a: &Scalar) -> Result<Scalar, ScalarError> {
        let a = self.coerce(a)?;
        Ok(a.neg())
    }

    pub fn conj(&self, a: &Scalar) -> Result<Scalar, ScalarError> {
        let a = self.coerce(a)?;
        Ok(a.conj())
    }

    /// Absolute value as a real scalar.
    pub fn abs(&self, a: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, p) = (self.coerce(a)?, self.prec);
        Ok(dispatch_unary!(a.as_ref(), |x| Number::Real(x.abs(p)?)))
    }

    /// `|a|²`, avoiding the square root for complex values.
    pub fn abs_sq(&self, a: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, p) = (self.coerce(a)?, self.prec);
        Ok(dispatch_unary!(a.as_ref(), |x| Number::Real(x.abs_sq(p))))
    }

    pub fn sqrt(&self, a: &Scalar) -> Result<Scalar, ScalarError> {
        let (a, p) = (self.coerce(a)?, self.prec);
        Ok(dispatch_unary!(a.as_ref(), |x| x.sqrt(p)?))
    }

    pub fn powi(&self, a: &Scalar, n: u32) -> Result<Scalar, ScalarError> {
        let (a, p) = (self.coerce(a)?, self.prec);
        Ok(dispatch_unary!(a.as_ref(), |x| x.powi(n, p)?))
    }

    pub fn root(&self, a: &Scalar, n: u32) -> Result<Scalar, ScalarError> {
        let (a, p) = (self.coerce(a)?, self.prec);
        Ok(dispatch_unary!(a.as_ref(), |x| x.root(n, p)?))
    }

    /// Numeric equality after conversion into this context.  Values that
    /// cannot be converted compare unequal.
    pub fn equals(&self, a: &Scalar, b: &Scalar) -> bool {
        let (a, b) = match (self.coerce(a), self.coerce(b)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return false,
        };
        match (a.as_ref(), b.as_ref()) {
            (Scalar::Exact(x), Scalar::Exact(y)) => x == y,
            (Scalar::Native(x), Scalar::Native(y)) => x == y,
            (Scalar::Interval(x), Scalar::Interval(y)) => x == y,
            _ => false,
        }
    }

    /// Sum of `values`, starting from the first term.
    pub fn sum<'a>(
        &self,
        values: impl IntoIterator<Item = &'a Scalar>,
    ) -> Result<Scalar, ScalarError> {
        let mut values = values.into_iter();
        let mut acc = match values.next() {
            Some(first) => self.convert(first)?,
            None => return Ok(self.zero()),
        };
        for v in values {
            acc = self.add(&acc, v)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_table() {
        use Context::*;
        for (a, b, c) in [
            (Native, Native, Native),
            (Native, Exact, Exact),
            (Exact, Native, Exact),
            (Exact, Interval, Interval),
            (Interval, Native, Interval),
        ] {
            assert_eq!(a.promote(b), c);
        }
    }

    #[test]
    fn test_literals_are_native() {
        assert_eq!(Scalar::from(3).context(), Context::Native);
        assert_eq!(Scalar::from(0.5).context(), Context::Native);
        assert_eq!(
            Scalar::from(Complex64::new(1.0, 2.0)).context(),
            Context::Native
        );
        assert_eq!(Scalar::from(-7i64).as_native(), Some(&Number::Real(-7.0)));

        // integers past the f64 mantissa stay exact
        let big = Scalar::from(u64::MAX);
        assert_eq!(big.context(), Context::Exact);
        assert!(big.as_native().is_none());
        assert_eq!(big.as_exact().unwrap().re(), &BigFloat::from(u64::MAX));
    }

    #[test]
    fn test_complex_queries() {
        let z = Scalar::from(Complex64::new(1.5, -2.0));
        assert!(!z.is_real());
        assert_eq!(z.to_complex64(), Complex64::new(1.5, -2.0));
        assert_eq!(z.conj().to_complex64(), Complex64::new(1.5, 2.0));

        let x = Context::Exact.convert(&Scalar::from(Complex64::new(2.0, 0.0))).unwrap();
        assert!(x.is_real());
        assert_eq!(x.to_complex64(), Complex64::new(2.0, 0.0));
    }

    #[test]
    fn test_mixed_arithmetic_promotes() {
        let ops = ScalarOps::new(Context::Exact, 100);
        let third = ops.div(&Scalar::from(1), &Scalar::from(3)).unwrap();
        assert_eq!(third.context(), Context::Exact);
        assert_eq!(third.as_exact().unwrap().re().bits(), 100);

        let x = Scalar::from(BigFloat::from(2)).add(&Scalar::from(0.5)).unwrap();
        assert_eq!(x.context(), Context::Exact);
        assert_eq!(x, Scalar::from(2.5));
    }

    #[test]
    fn test_interval_conversion_is_outward() {
        let ops = ScalarOps::new(Context::Interval, 53);
        let x = ops.convert(&Scalar::from(BigFloat::parse("0.1", 200, Round::Nearest).unwrap())).unwrap();
        let iv = x.as_interval().unwrap().re();
        assert!(iv.lower() < iv.upper());

        let back = ScalarOps::new(Context::Native, 53).convert(&x).unwrap();
        assert_eq!(back, Scalar::from(0.1));
    }

    #[test]
    fn test_complex_abs_and_sqrt() {
        let ops = ScalarOps::new(Context::Native, 53);
        let z = Scalar::from(Complex64::new(3.0, 4.0));
        assert_eq!(ops.abs(&z).unwrap(), Scalar::from(5));
        assert_eq!(ops.sqrt(&z), Err(ScalarError::Domain));
        assert_eq!(ops.div(&z, &Scalar::from(0)), Err(ScalarError::DivisionByZero));
    }

    #[test]
    fn test_display_digits() {
        let x = ScalarOps::new(Context::Exact, 53).parse("0.1").unwrap();
        assert_eq!(format!("{x:.5}"), "0.1");
        assert_eq!(Scalar::from(Complex64::new(1.0, -2.0)).to_string_digits(5), "(1.0 - 2.0j)");
    }
}
