use crate::algebra::{RealT, ScalarError};

/// A real or complex value over a [`RealT`] engine.
///
/// Real values are kept in the `Real` variant so that the common case
/// does no work on an imaginary part.  A `Complex` value with a zero
/// imaginary part compares equal to the corresponding `Real`.
#[derive(Clone, Debug)]
pub enum Number<R> {
    Real(R),
    Complex(R, R),
}

impl<R: RealT> Number<R> {
    pub fn zero() -> Self {
        Number::Real(R::zero())
    }

    pub fn one() -> Self {
        Number::Real(R::one())
    }

    pub fn re(&self) -> &R {
        match self {
            Number::Real(re) | Number::Complex(re, _) => re,
        }
    }

    pub fn im(&self) -> R {
        match self {
            Number::Real(_) => R::zero(),
            Number::Complex(_, im) => im.clone(),
        }
    }

    pub fn add(&self, rhs: &Self, prec: u32) -> Self {
        use Number::*;
        match (self, rhs) {
            (Real(a), Real(b)) => Real(a.add(b, prec)),
            (Real(a), Complex(c, d)) => Complex(a.add(c, prec), d.round(prec)),
            (Complex(a, b), Real(c)) => Complex(a.add(c, prec), b.round(prec)),
            (Complex(a, b), Complex(c, d)) => Complex(a.add(c, prec), b.add(d, prec)),
        }
    }

    pub fn sub(&self, rhs: &Self, prec: u32) -> Self {
        use Number::*;
        match (self, rhs) {
            (Real(a), Real(b)) => Real(a.sub(b, prec)),
            (Real(a), Complex(c, d)) => Complex(a.sub(c, prec), d.neg().round(prec)),
            (Complex(a, b), Real(c)) => Complex(a.sub(c, prec), b.round(prec)),
            (Complex(a, b), Complex(c, d)) => Complex(a.sub(c, prec), b.sub(d, prec)),
        }
    }

    pub fn mul(&self, rhs: &Self, prec: u32) -> Self {
        use Number::*;
        match (self, rhs) {
            (Real(a), Real(b)) => Real(a.mul(b, prec)),
            (Real(a), Complex(c, d)) => Complex(a.mul(c, prec), a.mul(d, prec)),
            (Complex(a, b), Real(c)) => Complex(a.mul(c, prec), b.mul(c, prec)),
            (Complex(a, b), Complex(c, d)) => Complex(
                a.mul(c, prec).sub(&b.mul(d, prec), prec),
                a.mul(d, prec).add(&b.mul(c, prec), prec),
            ),
        }
    }

    pub fn div(&self, rhs: &Self, prec: u32) -> Result<Self, ScalarError> {
        match rhs {
            Number::Real(c) => self.try_map(|x| x.div(c, prec)),
            Number::Complex(c, d) => {
                let den = c.square(prec).add(&d.square(prec), prec);
                let num = self.mul(&rhs.conj(), prec);
                num.try_map(|x| x.div(&den, prec))
            }
        }
    }

    pub fn neg(&self) -> Self {
        self.map(|x| x.neg())
    }

    pub fn conj(&self) -> Self {
        match self {
            Number::Real(a) => Number::Real(a.clone()),
            Number::Complex(a, b) => Number::Complex(a.clone(), b.neg()),
        }
    }

    /// `|x|²` without a square root.
    pub fn abs_sq(&self, prec: u32) -> R {
        match self {
            Number::Real(a) => a.square(prec),
            Number::Complex(a, b) => a.square(prec).add(&b.square(prec), prec),
        }
    }

    pub fn abs(&self, prec: u32) -> Result<R, ScalarError> {
        match self {
            Number::Real(a) => Ok(a.abs()),
            Number::Complex(_, b) if b.is_zero() => Ok(self.re().abs()),
            Number::Complex(..) => self.abs_sq(prec).sqrt(prec),
        }
    }

    // the remaining functions are only defined on the real line

    fn real_part(&self) -> Result<&R, ScalarError> {
        match self {
            Number::Real(a) => Ok(a),
            Number::Complex(a, b) if b.is_zero() => Ok(a),
            Number::Complex(..) => Err(ScalarError::Domain),
        }
    }

    pub fn sqrt(&self, prec: u32) -> Result<Self, ScalarError> {
        Ok(Number::Real(self.real_part()?.sqrt(prec)?))
    }

    pub fn powi(&self, n: u32, prec: u32) -> Result<Self, ScalarError> {
        Ok(Number::Real(self.real_part()?.powi(n, prec)))
    }

    pub fn root(&self, n: u32, prec: u32) -> Result<Self, ScalarError> {
        Ok(Number::Real(self.real_part()?.root(n, prec)?))
    }

    pub fn max(&self, rhs: &Self) -> Result<Self, ScalarError> {
        Ok(Number::Real(self.real_part()?.max(rhs.real_part()?)))
    }

    pub fn round(&self, prec: u32) -> Self {
        self.map(|x| x.round(prec))
    }

    pub fn map<S>(&self, f: impl Fn(&R) -> S) -> Number<S> {
        match self {
            Number::Real(a) => Number::Real(f(a)),
            Number::Complex(a, b) => Number::Complex(f(a), f(b)),
        }
    }

    pub fn try_map<S, E>(&self, f: impl Fn(&R) -> Result<S, E>) -> Result<Number<S>, E> {
        Ok(match self {
            Number::Real(a) => Number::Real(f(a)?),
            Number::Complex(a, b) => Number::Complex(f(a)?, f(b)?),
        })
    }
}

impl<R: RealT> PartialEq for Number<R> {
    fn eq(&self, other: &Self) -> bool {
        self.re() == other.re() && self.im() == other.im()
    }
}

impl<R: RealT> From<R> for Number<R> {
    fn from(x: R) -> Self {
        Number::Real(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_arithmetic() {
        let a = Number::Complex(1.0, 2.0);
        let b = Number::Complex(3.0, -1.0);
        assert_eq!(a.mul(&b, 53), Number::Complex(5.0, 5.0));
        assert_eq!(a.add(&b, 53), Number::Real(4.0).add(&Number::Complex(0.0, 1.0), 53));
        assert_eq!(a.mul(&b, 53).div(&b, 53), Ok(a.clone()));
        assert_eq!(a.conj(), Number::Complex(1.0, -2.0));
        assert_eq!(Number::Complex(3.0, 4.0).abs(53), Ok(5.0));
    }

    #[test]
    fn test_real_only_functions() {
        assert_eq!(Number::Complex(4.0, 0.0).sqrt(53), Ok(Number::Real(2.0)));
        assert_eq!(Number::Complex(4.0, 1.0).sqrt(53), Err(ScalarError::Domain));
        assert_eq!(Number::Real(2.0).powi(3, 53), Ok(Number::Real(8.0)));
    }
}
