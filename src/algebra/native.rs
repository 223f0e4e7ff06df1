use crate::algebra::{BigFloat, RealT, Round, ScalarError};

// Native double precision engine.  The working precision is fixed at 53
// bits so the `prec` argument is ignored throughout.

impl RealT for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
    fn add(&self, rhs: &Self, _prec: u32) -> Self {
        self + rhs
    }
    fn sub(&self, rhs: &Self, _prec: u32) -> Self {
        self - rhs
    }
    fn mul(&self, rhs: &Self, _prec: u32) -> Self {
        self * rhs
    }
    fn div(&self, rhs: &Self, _prec: u32) -> Result<Self, ScalarError> {
        if *rhs == 0.0 {
            return Err(ScalarError::DivisionByZero);
        }
        Ok(self / rhs)
    }
    fn neg(&self) -> Self {
        -self
    }
    fn abs(&self) -> Self {
        f64::abs(*self)
    }
    fn sqrt(&self, _prec: u32) -> Result<Self, ScalarError> {
        if *self < 0.0 {
            return Err(ScalarError::Domain);
        }
        Ok(f64::sqrt(*self))
    }
    fn powi(&self, n: u32, _prec: u32) -> Self {
        f64::powi(*self, i32::try_from(n).unwrap_or(i32::MAX))
    }
    fn root(&self, n: u32, _prec: u32) -> Result<Self, ScalarError> {
        if n == 0 || *self < 0.0 {
            return Err(ScalarError::Domain);
        }
        match n {
            1 => Ok(*self),
            2 => Ok(f64::sqrt(*self)),
            3 => Ok(f64::cbrt(*self)),
            _ => Ok(f64::powf(*self, 1.0 / f64::from(n))),
        }
    }
    fn max(&self, rhs: &Self) -> Self {
        f64::max(*self, *rhs)
    }
    fn from_f64(x: f64, _prec: u32) -> Result<Self, ScalarError> {
        Ok(x)
    }
    fn from_bigfloat(x: &BigFloat, _prec: u32) -> Self {
        x.to_f64()
    }
    fn parse(s: &str, _prec: u32) -> Result<Self, ScalarError> {
        Ok(BigFloat::parse(s, 53, Round::Nearest)?.to_f64())
    }
    fn round(&self, _prec: u32) -> Self {
        *self
    }
    fn to_f64(&self) -> f64 {
        *self
    }
    fn magnitude(&self) -> f64 {
        f64::abs(*self)
    }
    fn to_string_digits(&self, digits: usize) -> String {
        match BigFloat::from_f64(*self) {
            Ok(x) => x.to_string_digits(digits),
            Err(_) if self.is_nan() => "nan".to_string(),
            Err(_) if *self > 0.0 => "+inf".to_string(),
            Err(_) => "-inf".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_errors() {
        assert_eq!(RealT::div(&1.0, &0.0, 53), Err(ScalarError::DivisionByZero));
        assert_eq!(RealT::sqrt(&-1.0, 53), Err(ScalarError::Domain));
        assert_eq!(RealT::root(&27.0, 3, 53), Ok(3.0));
    }

    #[test]
    fn test_native_formatting() {
        assert_eq!(RealT::to_string_digits(&0.1, 15), "0.1");
        assert_eq!(RealT::to_string_digits(&f64::INFINITY, 15), "+inf");
        assert_eq!(RealT::to_string_digits(&-2.0, 15), "-2.0");
        assert_eq!(<f64 as RealT>::parse("1e-3", 53), Ok(0.001));
    }
}
