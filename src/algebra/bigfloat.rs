#![allow(non_snake_case)]
use crate::algebra::{RealT, ScalarError};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Float, One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Rounding direction applied when a result does not fit the
/// working precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    /// round to nearest, ties to even
    Nearest,
    /// round toward −∞
    Floor,
    /// round toward +∞
    Ceiling,
}

/// Arbitrary precision binary floating point number.
///
/// Represents `(-1)^neg · man · 2^exp` with an unbounded integer mantissa.
/// Values are kept normalized (odd mantissa, or the canonical zero), so
/// structural equality is numeric equality.
///
/// Every rounding operation takes the working precision in bits and a
/// [`Round`] direction:
///
/// ```
/// use mpmatrix::algebra::{BigFloat, Round};
///
/// let third = BigFloat::one().div(&BigFloat::from(3), 53, Round::Floor).unwrap();
/// let upper = BigFloat::one().div(&BigFloat::from(3), 53, Round::Ceiling).unwrap();
/// assert!(third < upper);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigFloat {
    neg: bool,
    man: BigUint,
    exp: i64,
}

impl BigFloat {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self {
            neg: false,
            man: BigUint::one(),
            exp: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.man.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// number of significant bits in the mantissa
    pub fn bits(&self) -> u64 {
        self.man.bits()
    }

    pub fn mantissa(&self) -> &BigUint {
        &self.man
    }

    pub fn exponent(&self) -> i64 {
        self.exp
    }

    // value lies in [2^(top-1), 2^top) for nonzero values
    fn top(&self) -> i64 {
        self.exp + self.man.bits() as i64
    }

    fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.neg {
            -1
        } else {
            1
        }
    }

    // builds a value without rounding, stripping trailing zero bits
    fn exact(neg: bool, mut man: BigUint, mut exp: i64) -> Self {
        if man.is_zero() {
            return Self::zero();
        }
        let tz = man.trailing_zeros().unwrap_or(0);
        if tz > 0 {
            man >>= tz;
            exp += tz as i64;
        }
        Self { neg, man, exp }
    }

    // builds a value rounded to `prec` significant bits
    fn from_parts(neg: bool, man: BigUint, exp: i64, prec: u32, rnd: Round) -> Self {
        if man.is_zero() {
            return Self::zero();
        }
        let prec = u64::from(prec.max(1));
        let bits = man.bits();
        if bits <= prec {
            return Self::exact(neg, man, exp);
        }

        let shift = bits - prec;
        let q = &man >> shift;
        let rem = man - (&q << shift);

        let round_up = if rem.is_zero() {
            false
        } else {
            match rnd {
                Round::Nearest => {
                    let half = BigUint::one() << (shift - 1);
                    match rem.cmp(&half) {
                        Ordering::Greater => true,
                        Ordering::Less => false,
                        Ordering::Equal => q.is_odd(),
                    }
                }
                // directed rounding grows the magnitude only on
                // the side it points to
                Round::Floor => neg,
                Round::Ceiling => !neg,
            }
        };

        let q = if round_up { q + 1u32 } else { q };
        Self::exact(neg, q, exp + shift as i64)
    }

    /// Round to `prec` bits.  Values that already fit are returned unchanged.
    pub fn round(&self, prec: u32, rnd: Round) -> Self {
        if self.bits() <= u64::from(prec) {
            return self.clone();
        }
        Self::from_parts(self.neg, self.man.clone(), self.exp, prec, rnd)
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            neg: !self.neg,
            man: self.man.clone(),
            exp: self.exp,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            neg: false,
            man: self.man.clone(),
            exp: self.exp,
        }
    }

    /// Exact scaling by `2^k`.
    pub fn mul_pow2(&self, k: i64) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            neg: self.neg,
            man: self.man.clone(),
            exp: self.exp + k,
        }
    }

    /// Exact sum, with no rounding.
    pub fn add_exact(&self, rhs: &Self) -> Self {
        if rhs.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return rhs.clone();
        }
        let e = self.exp.min(rhs.exp);
        let a = &self.man << (self.exp - e) as u64;
        let b = &rhs.man << (rhs.exp - e) as u64;
        Self::signed_sum(self.neg, a, rhs.neg, b, e, None)
    }

    fn signed_sum(
        aneg: bool,
        a: BigUint,
        bneg: bool,
        b: BigUint,
        exp: i64,
        round: Option<(u32, Round)>,
    ) -> Self {
        let (neg, man) = if aneg == bneg {
            (aneg, a + b)
        } else {
            match a.cmp(&b) {
                Ordering::Greater => (aneg, a - b),
                Ordering::Less => (bneg, b - a),
                Ordering::Equal => return Self::zero(),
            }
        };
        match round {
            Some((prec, rnd)) => Self::from_parts(neg, man, exp, prec, rnd),
            None => Self::exact(neg, man, exp),
        }
    }

    pub fn add(&self, rhs: &Self, prec: u32, rnd: Round) -> Self {
        if rhs.is_zero() {
            return self.round(prec, rnd);
        }
        if self.is_zero() {
            return rhs.round(prec, rnd);
        }

        let (big, small) = if self.top() >= rhs.top() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // A summand lying entirely below both the last bit of the larger
        // operand and the rounding position only decides the direction of
        // rounding.  Replace it with a short sticky value so that operands
        // with wildly different exponents don't produce huge shifts.
        let sticky_exp = big.exp.min(big.top() - i64::from(prec) - 2) - 1;
        let sticky;
        let small = if small.top() <= sticky_exp {
            sticky = Self {
                neg: small.neg,
                man: BigUint::one(),
                exp: sticky_exp - 1,
            };
            &sticky
        } else {
            small
        };

        let e = big.exp.min(small.exp);
        let a = &big.man << (big.exp - e) as u64;
        let b = &small.man << (small.exp - e) as u64;
        Self::signed_sum(big.neg, a, small.neg, b, e, Some((prec, rnd)))
    }

    pub fn sub(&self, rhs: &Self, prec: u32, rnd: Round) -> Self {
        self.add(&rhs.neg(), prec, rnd)
    }

    pub fn mul(&self, rhs: &Self, prec: u32, rnd: Round) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        Self::from_parts(
            self.neg != rhs.neg,
            &self.man * &rhs.man,
            self.exp + rhs.exp,
            prec,
            rnd,
        )
    }

    pub fn div(&self, rhs: &Self, prec: u32, rnd: Round) -> Result<Self, ScalarError> {
        if rhs.is_zero() {
            return Err(ScalarError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        // scale the dividend so the quotient carries at least prec+2 bits,
        // then fold any remainder into a sticky bit
        let extra =
            (i64::from(prec) + 3 + rhs.man.bits() as i64 - self.man.bits() as i64).max(0);
        let num = &self.man << extra as u64;
        let (q, r) = num.div_rem(&rhs.man);
        let exp = self.exp - extra - rhs.exp;

        let (q, exp) = if r.is_zero() {
            (q, exp)
        } else {
            ((q << 1u32) | BigUint::one(), exp - 1)
        };
        Ok(Self::from_parts(self.neg != rhs.neg, q, exp, prec, rnd))
    }

    pub fn sqrt(&self, prec: u32, rnd: Round) -> Result<Self, ScalarError> {
        self.root(2, prec, rnd)
    }

    /// Principal `n`-th root of a nonnegative value.
    pub fn root(&self, n: u32, prec: u32, rnd: Round) -> Result<Self, ScalarError> {
        if n == 0 {
            return Err(ScalarError::Domain);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if self.neg {
            return Err(ScalarError::Domain);
        }
        if n == 1 {
            return Ok(self.round(prec, rnd));
        }

        let k = i64::from(n);
        let mut extra = (k * (i64::from(prec) + 3) - self.man.bits() as i64).max(0);
        extra += (self.exp - extra).rem_euclid(k);

        let radicand = &self.man << extra as u64;
        let r = if n == 2 {
            radicand.sqrt()
        } else {
            radicand.nth_root(n)
        };
        let exp = (self.exp - extra) / k;

        let (r, exp) = if r.pow(n) == radicand {
            (r, exp)
        } else {
            ((r << 1u32) | BigUint::one(), exp - 1)
        };
        Ok(Self::from_parts(false, r, exp, prec, rnd))
    }

    /// Integer power, computed exactly and rounded once.
    pub fn powi(&self, n: u32, prec: u32, rnd: Round) -> Self {
        if n == 0 {
            return Self::one();
        }
        if self.is_zero() {
            return Self::zero();
        }
        Self::from_parts(
            self.neg && n % 2 == 1,
            self.man.pow(n),
            self.exp * i64::from(n),
            prec,
            rnd,
        )
    }

    /// Exact conversion from a finite `f64`.
    pub fn from_f64(x: f64) -> Result<Self, ScalarError> {
        if !x.is_finite() {
            return Err(ScalarError::NonFinite);
        }
        let (man, exp, sign) = Float::integer_decode(x);
        Ok(Self::exact(sign < 0, BigUint::from(man), i64::from(exp)))
    }

    /// Nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let r = self.round(53, Round::Nearest);
        let m = r.man.to_f64().unwrap_or(f64::INFINITY);
        let v = ldexp(m, r.exp);
        if r.neg {
            -v
        } else {
            v
        }
    }

    /// Correctly rounded conversion of decimal text such as `"-1.25e-3"`.
    pub fn parse(s: &str, prec: u32, rnd: Round) -> Result<Self, ScalarError> {
        let err = || ScalarError::Parse(s.to_string());

        let t = s.trim();
        let (neg, t) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };

        let (mantissa, exp10) = match t.find(['e', 'E']) {
            Some(i) => (&t[..i], t[i + 1..].parse::<i64>().map_err(|_| err())?),
            None => (t, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let is_digits = |p: &str| p.bytes().all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part)
        {
            return Err(err());
        }

        let digits = format!("{int_part}{frac_part}");
        let man = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(err)?;
        let exp10 = exp10 - frac_part.len() as i64;
        let pow10 = |k: i64| -> Result<BigUint, ScalarError> {
            let k = u32::try_from(k).map_err(|_| err())?;
            Ok(BigUint::from(10u32).pow(k))
        };

        if exp10 >= 0 {
            Ok(Self::from_parts(neg, man * pow10(exp10)?, 0, prec, rnd))
        } else {
            let num = Self::exact(neg, man, 0);
            let den = Self::exact(false, pow10(-exp10)?, 0);
            num.div(&den, prec, rnd)
        }
    }

    /// Decimal rendering with `digits` significant digits.
    pub fn to_string_digits(&self, digits: usize) -> String {
        let digits = digits.max(1);
        if self.is_zero() {
            return "0.0".to_string();
        }
        let (text, exp10) = self.decimal_digits(digits);
        format_decimal(self.neg, &text, exp10, digits)
    }

    // returns the `digits` leading decimal digits (rounded half up) and
    // the decimal exponent of the first one
    fn decimal_digits(&self, digits: usize) -> (String, i64) {
        let ten = BigUint::from(10u32);
        let lower = ten.pow(digits as u32 - 1);
        let upper = &lower * &ten;

        let mut d = ((self.top() - 1) as f64 * std::f64::consts::LOG10_2).floor() as i64;
        loop {
            let shift = digits as i64 - 1 - d;
            let mut num = self.man.clone();
            let mut den = BigUint::one();
            if self.exp >= 0 {
                num <<= self.exp as u64;
            } else {
                den <<= (-self.exp) as u64;
            }
            if shift >= 0 {
                num *= ten.pow(shift as u32);
            } else {
                den *= ten.pow((-shift) as u32);
            }

            let (q, r) = num.div_rem(&den);
            let n = if (r << 1u32) >= den { q + 1u32 } else { q };

            if n >= upper {
                d += 1;
            } else if n < lower {
                d -= 1;
            } else {
                return (n.to_string(), d);
            }
        }
    }
}

fn ldexp(mut x: f64, mut e: i64) -> f64 {
    while e > 1000 {
        x *= 2f64.powi(1000);
        e -= 1000;
        if x.is_infinite() {
            return x;
        }
    }
    while e < -1000 {
        x *= 2f64.powi(-1000);
        e += 1000;
        if x == 0.0 {
            return x;
        }
    }
    x * 2f64.powi(e as i32)
}

fn format_decimal(neg: bool, digits: &str, exp10: i64, requested: usize) -> String {
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let n = digits.len() as i64;
    let sign = if neg { "-" } else { "" };

    if exp10 >= 0 && exp10 < requested as i64 {
        let split = (exp10 + 1) as usize;
        if n as usize <= split {
            let zeros = "0".repeat(split - n as usize);
            format!("{sign}{digits}{zeros}.0")
        } else {
            format!("{sign}{}.{}", &digits[..split], &digits[split..])
        }
    } else if (-5..0).contains(&exp10) {
        let zeros = "0".repeat((-exp10 - 1) as usize);
        format!("{sign}0.{zeros}{digits}")
    } else {
        let frac = if digits.len() > 1 { &digits[1..] } else { "0" };
        format!("{sign}{}.{}e{:+}", &digits[..1], frac, exp10)
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.signum(), other.signum());
        if sa != sb || sa == 0 {
            return sa.cmp(&sb);
        }
        let mag = match self.top().cmp(&other.top()) {
            Ordering::Equal => {
                let e = self.exp.min(other.exp);
                let a = &self.man << (self.exp - e) as u64;
                let b = &other.man << (other.exp - e) as u64;
                a.cmp(&b)
            }
            ord => ord,
        };
        if self.neg {
            mag.reverse()
        } else {
            mag
        }
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(15);
        write!(f, "{}", self.to_string_digits(digits))
    }
}

impl From<i64> for BigFloat {
    fn from(v: i64) -> Self {
        Self::exact(v < 0, BigUint::from(v.unsigned_abs()), 0)
    }
}

impl From<i32> for BigFloat {
    fn from(v: i32) -> Self {
        Self::from(i64::from(v))
    }
}

impl From<u64> for BigFloat {
    fn from(v: u64) -> Self {
        Self::exact(false, BigUint::from(v), 0)
    }
}

impl From<u32> for BigFloat {
    fn from(v: u32) -> Self {
        Self::from(u64::from(v))
    }
}

impl From<usize> for BigFloat {
    fn from(v: usize) -> Self {
        Self::exact(false, BigUint::from(v), 0)
    }
}

impl RealT for BigFloat {
    fn zero() -> Self {
        BigFloat::zero()
    }
    fn one() -> Self {
        BigFloat::one()
    }
    fn is_zero(&self) -> bool {
        BigFloat::is_zero(self)
    }
    fn add(&self, rhs: &Self, prec: u32) -> Self {
        BigFloat::add(self, rhs, prec, Round::Nearest)
    }
    fn sub(&self, rhs: &Self, prec: u32) -> Self {
        BigFloat::sub(self, rhs, prec, Round::Nearest)
    }
    fn mul(&self, rhs: &Self, prec: u32) -> Self {
        BigFloat::mul(self, rhs, prec, Round::Nearest)
    }
    fn div(&self, rhs: &Self, prec: u32) -> Result<Self, ScalarError> {
        BigFloat::div(self, rhs, prec, Round::Nearest)
    }
    fn neg(&self) -> Self {
        BigFloat::neg(self)
    }
    fn abs(&self) -> Self {
        BigFloat::abs(self)
    }
    fn sqrt(&self, prec: u32) -> Result<Self, ScalarError> {
        BigFloat::sqrt(self, prec, Round::Nearest)
    }
    fn powi(&self, n: u32, prec: u32) -> Self {
        BigFloat::powi(self, n, prec, Round::Nearest)
    }
    fn root(&self, n: u32, prec: u32) -> Result<Self, ScalarError> {
        BigFloat::root(self, n, prec, Round::Nearest)
    }
    fn max(&self, rhs: &Self) -> Self {
        Ord::max(self, rhs).clone()
    }
    fn from_f64(x: f64, prec: u32) -> Result<Self, ScalarError> {
        Ok(BigFloat::from_f64(x)?.round(prec, Round::Nearest))
    }
    fn from_bigfloat(x: &BigFloat, prec: u32) -> Self {
        x.round(prec, Round::Nearest)
    }
    fn parse(s: &str, prec: u32) -> Result<Self, ScalarError> {
        BigFloat::parse(s, prec, Round::Nearest)
    }
    fn round(&self, prec: u32) -> Self {
        BigFloat::round(self, prec, Round::Nearest)
    }
    fn to_f64(&self) -> f64 {
        BigFloat::to_f64(self)
    }
    fn magnitude(&self) -> f64 {
        BigFloat::to_f64(self).abs()
    }
    fn to_string_digits(&self, digits: usize) -> String {
        BigFloat::to_string_digits(self, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bf(s: &str) -> BigFloat {
        BigFloat::parse(s, 200, Round::Nearest).unwrap()
    }

    #[test]
    fn test_normalized_parts() {
        // 12 = 3 * 2^2, stored with an odd mantissa
        let x = BigFloat::from(12);
        assert_eq!(x.mantissa(), &BigUint::from(3u32));
        assert_eq!(x.exponent(), 2);
        assert_eq!(x.bits(), 2);

        let h = BigFloat::from(-1).mul_pow2(-3);
        assert_eq!(h.mantissa(), &BigUint::one());
        assert_eq!(h.exponent(), -3);
        assert!(h.is_negative());
    }

    #[test]
    fn test_exact_small_values() {
        let a = BigFloat::from(6);
        let b = BigFloat::from(-4);
        assert_eq!(a.add(&b, 53, Round::Nearest), BigFloat::from(2));
        assert_eq!(a.mul(&b, 53, Round::Nearest), BigFloat::from(-24));
        assert_eq!(b.div(&a.mul_pow2(-1), 53, Round::Nearest), Ok(bf("-1.3333333333333332593184650249895639717578887939453125")));
        assert_eq!(BigFloat::from(20).sqrt(200, Round::Nearest).unwrap().to_f64(), 20f64.sqrt());
    }

    #[test]
    fn test_directed_rounding_brackets() {
        let one = BigFloat::one();
        let three = BigFloat::from(3);
        let lo = one.div(&three, 53, Round::Floor).unwrap();
        let hi = one.div(&three, 53, Round::Ceiling).unwrap();
        assert!(lo < hi);
        assert_eq!(hi.add_exact(&lo.neg()), BigFloat::one().mul_pow2(-54));
        assert_eq!(lo.to_f64(), 1.0 / 3.0);

        // negative values round the other way in magnitude
        let nlo = one.neg().div(&three, 53, Round::Floor).unwrap();
        assert_eq!(nlo, hi.neg());
    }

    #[test]
    fn test_parse_round_trip_f64() {
        for s in ["0.1", "-2.5e-3", "1.00000000000001", "123456789.125", "7e22"] {
            let x = BigFloat::parse(s, 53, Round::Nearest).unwrap();
            assert_eq!(x.to_f64(), s.parse::<f64>().unwrap(), "{s}");
        }
        assert!(BigFloat::parse("1.2.3", 53, Round::Nearest).is_err());
        assert!(BigFloat::parse("", 53, Round::Nearest).is_err());
        assert!(BigFloat::parse("abc", 53, Round::Nearest).is_err());
    }

    #[test]
    fn test_from_f64_is_exact() {
        let x = BigFloat::from_f64(0.1).unwrap();
        assert_eq!(x.to_f64(), 0.1);
        assert_eq!(x.bits(), 52);
        assert!(BigFloat::from_f64(f64::NAN).is_err());
        assert!(BigFloat::from_f64(0.0).unwrap().is_zero());
    }

    #[test]
    fn test_add_far_apart() {
        let big = BigFloat::one().mul_pow2(4000);
        let tiny = BigFloat::one().mul_pow2(-4000);
        assert_eq!(big.add(&tiny, 53, Round::Nearest), big);
        assert!(big.add(&tiny, 53, Round::Ceiling) > big);
        assert_eq!(big.sub(&tiny, 53, Round::Ceiling), big);
        assert!(big.sub(&tiny, 53, Round::Floor) < big);
    }

    #[test]
    fn test_roots_and_powers() {
        let x = BigFloat::from(62199840498u64);
        let r = x.root(10, 53, Round::Nearest).unwrap();
        assert!((r.to_f64() - 12.0054633727).abs() < 1e-10);

        let two = BigFloat::from(2);
        assert_eq!(two.powi(10, 53, Round::Nearest), BigFloat::from(1024));
        assert_eq!(BigFloat::from(81).root(4, 53, Round::Nearest), Ok(BigFloat::from(3)));
        assert_eq!(two.neg().sqrt(53, Round::Nearest), Err(ScalarError::Domain));
    }

    #[test]
    fn test_ordering() {
        let mut v = vec![bf("2.5"), bf("-3"), bf("0"), bf("0.001"), bf("-0.5")];
        v.sort();
        let f: Vec<f64> = v.iter().map(|x| x.to_f64()).collect();
        assert_eq!(f, vec![-3.0, -0.5, 0.0, 0.001, 2.5]);
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(BigFloat::from(1).to_string_digits(15), "1.0");
        assert_eq!(BigFloat::from(-120).to_string_digits(15), "-120.0");
        assert_eq!(bf("0.5").to_string_digits(15), "0.5");
        assert_eq!(bf("0.001").to_string_digits(6), "0.001");
        assert_eq!(bf("1234567").to_string_digits(6), "1.23457e+6");
        assert_eq!(bf("1e-20").to_string_digits(6), "1.0e-20");
        assert_eq!(bf("9.9999999").to_string_digits(3), "10.0");
    }
}
