use crate::algebra::{BigFloat, RealT, Round, ScalarError};
use std::fmt;

/// Closed interval `[lo, hi]` with [`BigFloat`] endpoints.
///
/// All arithmetic rounds the lower endpoint toward −∞ and the upper endpoint
/// toward +∞, so the result always encloses the exact result of the
/// operation applied to any points of the operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    lo: BigFloat,
    hi: BigFloat,
}

fn min4(v: [BigFloat; 4]) -> BigFloat {
    let [a, b, c, d] = v;
    a.min(b).min(c).min(d)
}

fn max4(v: [BigFloat; 4]) -> BigFloat {
    let [a, b, c, d] = v;
    a.max(b).max(c).max(d)
}

impl Interval {
    pub fn new(lo: BigFloat, hi: BigFloat) -> Result<Self, ScalarError> {
        if lo > hi {
            return Err(ScalarError::InvalidInterval);
        }
        Ok(Self { lo, hi })
    }

    /// Degenerate interval `[x, x]`.
    pub fn point(x: BigFloat) -> Self {
        Self {
            lo: x.clone(),
            hi: x,
        }
    }

    /// Interval bounded by two `f64` endpoints, widened outward to `prec` bits.
    pub fn from_bounds(lo: f64, hi: f64, prec: u32) -> Result<Self, ScalarError> {
        let lo = BigFloat::from_f64(lo)?.round(prec, Round::Floor);
        let hi = BigFloat::from_f64(hi)?.round(prec, Round::Ceiling);
        Self::new(lo, hi)
    }

    pub fn lower(&self) -> &BigFloat {
        &self.lo
    }

    pub fn upper(&self) -> &BigFloat {
        &self.hi
    }

    /// Exact width `hi - lo`.
    pub fn width(&self) -> BigFloat {
        self.hi.add_exact(&self.lo.neg())
    }

    pub fn mid(&self, prec: u32) -> BigFloat {
        self.lo.add(&self.hi, prec, Round::Nearest).mul_pow2(-1)
    }

    pub fn contains(&self, x: &BigFloat) -> bool {
        &self.lo <= x && x <= &self.hi
    }

    pub fn contains_zero(&self) -> bool {
        self.contains(&BigFloat::zero())
    }

    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Smallest absolute value of any point in the interval.
    pub fn mignitude(&self) -> BigFloat {
        if self.contains_zero() {
            BigFloat::zero()
        } else {
            self.lo.abs().min(self.hi.abs())
        }
    }

    // returns self with the negative part clipped, or a domain error
    fn nonnegative(&self) -> Result<(BigFloat, &BigFloat), ScalarError> {
        if self.hi.is_negative() {
            return Err(ScalarError::Domain);
        }
        let lo = if self.lo.is_negative() {
            BigFloat::zero()
        } else {
            self.lo.clone()
        };
        Ok((lo, &self.hi))
    }
}

impl RealT for Interval {
    fn zero() -> Self {
        Self::point(BigFloat::zero())
    }

    fn one() -> Self {
        Self::point(BigFloat::one())
    }

    fn is_zero(&self) -> bool {
        self.lo.is_zero() && self.hi.is_zero()
    }

    fn straddles_zero(&self) -> bool {
        self.contains_zero()
    }

    fn add(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            lo: self.lo.add(&rhs.lo, prec, Round::Floor),
            hi: self.hi.add(&rhs.hi, prec, Round::Ceiling),
        }
    }

    fn sub(&self, rhs: &Self, prec: u32) -> Self {
        Self {
            lo: self.lo.sub(&rhs.hi, prec, Round::Floor),
            hi: self.hi.sub(&rhs.lo, prec, Round::Ceiling),
        }
    }

    fn mul(&self, rhs: &Self, prec: u32) -> Self {
        let (a, b) = (self, rhs);
        let products = |rnd| {
            [
                a.lo.mul(&b.lo, prec, rnd),
                a.lo.mul(&b.hi, prec, rnd),
                a.hi.mul(&b.lo, prec, rnd),
                a.hi.mul(&b.hi, prec, rnd),
            ]
        };
        Self {
            lo: min4(products(Round::Floor)),
            hi: max4(products(Round::Ceiling)),
        }
    }

    fn div(&self, rhs: &Self, prec: u32) -> Result<Self, ScalarError> {
        if rhs.contains_zero() {
            return Err(ScalarError::DivisionByZero);
        }
        let (a, b) = (self, rhs);
        let quotients = |rnd| -> Result<[BigFloat; 4], ScalarError> {
            Ok([
                a.lo.div(&b.lo, prec, rnd)?,
                a.lo.div(&b.hi, prec, rnd)?,
                a.hi.div(&b.lo, prec, rnd)?,
                a.hi.div(&b.hi, prec, rnd)?,
            ])
        };
        Ok(Self {
            lo: min4(quotients(Round::Floor)?),
            hi: max4(quotients(Round::Ceiling)?),
        })
    }

    fn neg(&self) -> Self {
        Self {
            lo: self.hi.neg(),
            hi: self.lo.neg(),
        }
    }

    fn abs(&self) -> Self {
        if !self.lo.is_negative() {
            self.clone()
        } else if !self.hi.is_negative() && !self.hi.is_zero() {
            Self {
                lo: BigFloat::zero(),
                hi: self.lo.neg().max(self.hi.clone()),
            }
        } else {
            RealT::neg(self)
        }
    }

    fn square(&self, prec: u32) -> Self {
        let a = RealT::abs(self);
        Self {
            lo: a.lo.mul(&a.lo, prec, Round::Floor),
            hi: a.hi.mul(&a.hi, prec, Round::Ceiling),
        }
    }

    fn sqrt(&self, prec: u32) -> Result<Self, ScalarError> {
        let (lo, hi) = self.nonnegative()?;
        Ok(Self {
            lo: lo.sqrt(prec, Round::Floor)?,
            hi: hi.sqrt(prec, Round::Ceiling)?,
        })
    }

    fn powi(&self, n: u32, prec: u32) -> Self {
        // odd powers are monotone, even powers go through |x|
        let a = if n % 2 == 0 {
            RealT::abs(self)
        } else {
            self.clone()
        };
        Self {
            lo: a.lo.powi(n, prec, Round::Floor),
            hi: a.hi.powi(n, prec, Round::Ceiling),
        }
    }

    fn root(&self, n: u32, prec: u32) -> Result<Self, ScalarError> {
        let (lo, hi) = self.nonnegative()?;
        Ok(Self {
            lo: lo.root(n, prec, Round::Floor)?,
            hi: hi.root(n, prec, Round::Ceiling)?,
        })
    }

    fn max(&self, rhs: &Self) -> Self {
        Self {
            lo: self.lo.clone().max(rhs.lo.clone()),
            hi: self.hi.clone().max(rhs.hi.clone()),
        }
    }

    fn from_f64(x: f64, prec: u32) -> Result<Self, ScalarError> {
        Ok(Self::from_bigfloat(&BigFloat::from_f64(x)?, prec))
    }

    fn from_bigfloat(x: &BigFloat, prec: u32) -> Self {
        Self {
            lo: x.round(prec, Round::Floor),
            hi: x.round(prec, Round::Ceiling),
        }
    }

    fn parse(s: &str, prec: u32) -> Result<Self, ScalarError> {
        Ok(Self {
            lo: BigFloat::parse(s, prec, Round::Floor)?,
            hi: BigFloat::parse(s, prec, Round::Ceiling)?,
        })
    }

    fn round(&self, prec: u32) -> Self {
        Self {
            lo: self.lo.round(prec, Round::Floor),
            hi: self.hi.round(prec, Round::Ceiling),
        }
    }

    fn to_f64(&self) -> f64 {
        self.mid(53).to_f64()
    }

    fn magnitude(&self) -> f64 {
        self.mignitude().to_f64()
    }

    fn to_string_digits(&self, digits: usize) -> String {
        format!(
            "[{}, {}]",
            self.lo.to_string_digits(digits),
            self.hi.to_string_digits(digits)
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(15);
        write!(f, "{}", self.to_string_digits(digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREC: u32 = 53;

    fn iv(lo: f64, hi: f64) -> Interval {
        Interval::from_bounds(lo, hi, PREC).unwrap()
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(
            Interval::from_bounds(2.0, 1.0, PREC),
            Err(ScalarError::InvalidInterval)
        );
    }

    #[test]
    fn test_mul_sign_cases() {
        assert_eq!(iv(-1.0, 2.0).mul(&iv(3.0, 4.0), PREC), iv(-4.0, 8.0));
        assert_eq!(iv(-3.0, -1.0).mul(&iv(-2.0, 5.0), PREC), iv(-15.0, 6.0));
        assert_eq!(iv(-1.0, 1.0).mul(&Interval::zero(), PREC), Interval::zero());
    }

    #[test]
    fn test_div_by_interval_containing_zero() {
        assert_eq!(
            iv(1.0, 2.0).div(&iv(-1.0, 1.0), PREC),
            Err(ScalarError::DivisionByZero)
        );
        let q = Interval::one().div(&iv(3.0, 3.0), PREC).unwrap();
        assert!(q.lower() < q.upper());
        assert!(q.contains(&BigFloat::from_f64(1.0 / 3.0).unwrap()));
    }

    #[test]
    fn test_parse_encloses_decimal() {
        let x = Interval::parse("0.1", PREC).unwrap();
        assert!(!x.is_point());
        let tenth = BigFloat::parse("0.1", 300, Round::Nearest).unwrap();
        assert!(x.contains(&tenth));

        let y = Interval::parse("0.5", PREC).unwrap();
        assert!(y.is_point());
    }

    #[test]
    fn test_square_and_sqrt() {
        let x = iv(-2.0, 1.0);
        assert_eq!(x.square(PREC), iv(0.0, 4.0));
        assert_eq!(x.mul(&x, PREC), iv(-2.0, 4.0));
        assert_eq!(iv(-1.0, 4.0).sqrt(PREC).unwrap(), iv(0.0, 2.0));
        assert_eq!(iv(-4.0, -1.0).sqrt(PREC), Err(ScalarError::Domain));
    }

    #[test]
    fn test_mignitude() {
        assert_eq!(iv(-3.0, 2.0).magnitude(), 0.0);
        assert_eq!(iv(-3.0, -2.0).magnitude(), 2.0);
        assert_eq!(RealT::abs(&iv(-3.0, 2.0)), iv(0.0, 3.0));
    }
}
