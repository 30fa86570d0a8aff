//! Exact rational multiples of π, held modulo 2π.
//!
//! Every rewrite rule's correctness hinges on exact phase equality (e.g.
//! "phase is a multiple of π"), so phases are kept as exact rationals;
//! floating-point reconstitution only happens at the boundary ([`Phase::from_float`]
//! and [`Phase::parse`]).

use crate::error::{CoreError, Result};
use num_traits::{Float, FloatConst, NumCast};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

fn lcm(a: i64, b: i64) -> i64 {
    a / gcd(a, b) * b
}

/// A plain rational number, not reduced modulo anything — the result of
/// dividing two [`Phase`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    fn new(n: i64, d: i64) -> Self {
        let mut r = Rational {
            numerator: n,
            denominator: d,
        };
        r.normalize();
        r
    }

    fn normalize(&mut self) {
        if self.denominator < 0 {
            self.denominator = -self.denominator;
            self.numerator = -self.numerator;
        }
        let g = gcd(self.numerator, self.denominator);
        self.numerator /= g;
        self.denominator /= g;
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }
}

/// A rational multiple of π, always held in canonical form: `denominator > 0`,
/// `gcd(|numerator|, denominator) == 1`, and `numerator` in `[0, 2 * denominator)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    numerator: i64,
    denominator: i64,
}

impl Phase {
    /// The zero phase.
    pub const ZERO: Phase = Phase {
        numerator: 0,
        denominator: 1,
    };

    /// The phase π.
    pub const PI: Phase = Phase {
        numerator: 1,
        denominator: 1,
    };

    /// Constructs `n/d · π` in canonical form.
    ///
    /// Panics if `d == 0`; use [`Phase::try_new`] for a fallible version.
    pub fn new(n: i64, d: i64) -> Self {
        Self::try_new(n, d).expect("phase denominator must be nonzero")
    }

    /// Fallible constructor.
    pub fn try_new(n: i64, d: i64) -> Result<Self> {
        if d == 0 {
            return Err(CoreError::PhaseZeroDenominator);
        }
        let mut p = Phase {
            numerator: n,
            denominator: d,
        };
        p.normalize();
        Ok(p)
    }

    fn normalize(&mut self) {
        if self.denominator < 0 {
            self.denominator = -self.denominator;
            self.numerator = -self.numerator;
        }
        let g = gcd(self.numerator, self.denominator);
        self.numerator /= g;
        self.denominator /= g;
        let period = 2 * self.denominator;
        self.numerator = self.numerator.rem_euclid(period);
    }

    /// The normalized numerator, in `[0, 2 * denominator)`.
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// The normalized denominator, always positive.
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// True iff this phase is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// True iff this phase is an integer multiple of π (0 or π).
    pub fn is_multiple_of_pi(&self) -> bool {
        self.denominator == 1
    }

    /// True iff this phase is a multiple of π/2 — a Clifford phase.
    pub fn is_clifford(&self) -> bool {
        self.denominator == 1 || self.denominator == 2
    }

    /// Builds a phase whose value is within `eps * π` of `f * π`, by
    /// continued-fraction truncation of `f`: the first convergent whose
    /// error is at most `eps` is selected.
    pub fn from_float(f: f64, eps: f64) -> Self {
        let (n, d) = rationalize(f, eps);
        Self::new(n, d)
    }

    /// Returns this phase's value as a floating point number of radians.
    pub fn to_float<T: Float + FloatConst + NumCast>(&self) -> T {
        T::PI() * T::from(self.numerator).unwrap() / T::from(self.denominator).unwrap()
    }

    /// Multiplies by a nonzero integer, re-normalizing. Panics if `k == 0`
    /// is passed to [`Phase::checked_div_int`] instead; multiplication by
    /// zero is well defined (it yields [`Phase::ZERO`]).
    pub fn checked_div_int(self, k: i64) -> Result<Phase> {
        if k == 0 {
            return Err(CoreError::PhaseDivisionByZero);
        }
        Phase::try_new(self.numerator, self.denominator * k)
    }

    /// Divides two phases, yielding the rational ratio of their normalized
    /// representations. Fails if `rhs` is the zero phase.
    pub fn checked_div_phase(self, rhs: Phase) -> Result<Rational> {
        if rhs.numerator == 0 {
            return Err(CoreError::PhaseDivisionByZero);
        }
        Ok(Rational::new(
            self.numerator * rhs.denominator,
            self.denominator * rhs.numerator,
        ))
    }

    fn scale_by_rational(self, r: Rational) -> Phase {
        Phase::new(self.numerator * r.numerator(), self.denominator * r.denominator())
    }

    /// Parses the grammar `[n][*|/]...pi...[*|/][d]` (case-insensitive `pi`):
    /// any finite mix of integer/float factors and at most one `pi` factor,
    /// with the sign attachable to any factor. Returns an error on malformed
    /// input.
    pub fn parse(s: &str) -> Result<Phase> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::PhaseParse(s.to_string()));
        }

        let mut tokens: Vec<(&str, Option<char>)> = Vec::new();
        let mut op_before: Option<char> = None;
        let mut start = 0usize;
        for (i, c) in trimmed.char_indices() {
            if c == '*' || c == '/' {
                tokens.push((&trimmed[start..i], op_before));
                op_before = Some(c);
                start = i + c.len_utf8();
            }
        }
        tokens.push((&trimmed[start..], op_before));

        let mut num_pis: i32 = 0;
        let mut numerator: i64 = 1;
        let mut denominator: i64 = 1;
        let mut float_factor: f64 = 1.0;

        for (tok, op) in tokens {
            let tok = tok.trim();
            if tok.is_empty() {
                return Err(CoreError::PhaseParse(s.to_string()));
            }
            let dividing = op == Some('/');
            let lower = tok.to_lowercase();
            if let Some(prefix) = lower.strip_suffix("pi") {
                let coeff: i64 = match prefix {
                    "" => 1,
                    "-" => -1,
                    other => other.parse().map_err(|_| CoreError::PhaseParse(s.to_string()))?,
                };
                if dividing {
                    num_pis -= 1;
                    denominator *= coeff;
                } else {
                    num_pis += 1;
                    numerator *= coeff;
                }
            } else if let Ok(i) = tok.parse::<i64>() {
                if dividing {
                    denominator *= i;
                } else {
                    numerator *= i;
                }
            } else if let Ok(f) = tok.parse::<f64>() {
                if dividing {
                    float_factor /= f;
                } else {
                    float_factor *= f;
                }
            } else {
                return Err(CoreError::PhaseParse(s.to_string()));
            }
        }

        let pi_adjust = float_factor * std::f64::consts::PI.powi(num_pis - 1);
        let (rn, rd) = rationalize(pi_adjust, 1e-4 / std::f64::consts::PI);
        let base = Phase::try_new(numerator, denominator)?;
        Ok(base.scale_by_rational(Rational::new(rn, rd)))
    }
}

/// Continued-fraction rationalization of `x`, returning the first convergent
/// whose error is at most `eps`.
fn rationalize(x: f64, eps: f64) -> (i64, i64) {
    let sign: i64 = if x < 0.0 { -1 } else { 1 };
    let mut remainder = x.abs();

    let (mut h_prev, mut h_curr) = (1i64, 0i64);
    let (mut k_prev, mut k_curr) = (0i64, 1i64);

    loop {
        let a = remainder.floor() as i64;
        let h_next = a * h_curr + h_prev;
        let k_next = a * k_curr + k_prev;

        let approx = h_next as f64 / k_next as f64;
        if (approx - x.abs()).abs() <= eps || k_next > 1_000_000 {
            return (sign * h_next, k_next);
        }

        let frac = remainder - a as f64;
        if frac.abs() < 1e-12 {
            return (sign * h_next, k_next);
        }
        remainder = 1.0 / frac;
        h_prev = h_curr;
        h_curr = h_next;
        k_prev = k_curr;
        k_curr = k_next;
    }
}

impl Add for Phase {
    type Output = Phase;
    fn add(self, rhs: Phase) -> Phase {
        let d = lcm(self.denominator, rhs.denominator);
        let n = self.numerator * (d / self.denominator) + rhs.numerator * (d / rhs.denominator);
        Phase::new(n, d)
    }
}

impl Sub for Phase {
    type Output = Phase;
    fn sub(self, rhs: Phase) -> Phase {
        let d = lcm(self.denominator, rhs.denominator);
        let n = self.numerator * (d / self.denominator) - rhs.numerator * (d / rhs.denominator);
        Phase::new(n, d)
    }
}

impl Neg for Phase {
    type Output = Phase;
    fn neg(self) -> Phase {
        Phase::new(-self.numerator, self.denominator)
    }
}

impl Mul<i64> for Phase {
    type Output = Phase;
    fn mul(self, k: i64) -> Phase {
        Phase::new(self.numerator * k, self.denominator)
    }
}

impl Div<i64> for Phase {
    type Output = Phase;
    fn div(self, k: i64) -> Phase {
        self.checked_div_int(k).expect("phase division by zero")
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator == 0 {
            return write!(f, "0");
        }
        let coeff = if self.numerator == 1 {
            String::new()
        } else {
            self.numerator.to_string()
        };
        if self.denominator == 1 {
            write!(f, "{coeff}pi")
        } else {
            write!(f, "{coeff}pi/{}", self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_phase_parse() {
        let p = Phase::parse("-3/4*pi").unwrap();
        assert_eq!(p, Phase::new(5, 4));
    }

    #[test]
    fn parse_bare_pi() {
        assert_eq!(Phase::parse("pi").unwrap(), Phase::PI);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Phase::parse("PI").unwrap(), Phase::PI);
        assert_eq!(Phase::parse("2*Pi").unwrap(), Phase::ZERO);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Phase::parse("pi*").is_err());
        assert!(Phase::parse("").is_err());
        assert!(Phase::parse("banana").is_err());
    }

    #[test]
    fn normalization_invariant() {
        for (n, d) in [(7, 4), (-1, 2), (9, 3), (-9, 3), (0, 5)] {
            let p = Phase::new(n, d);
            assert!(p.numerator() >= 0 && p.numerator() < 2 * p.denominator());
            assert_eq!(gcd(p.numerator(), p.denominator()), if p.numerator() == 0 { 1 } else { 1 });
        }
    }

    #[test]
    fn arithmetic_identities() {
        let a = Phase::new(1, 3);
        let b = Phase::new(1, 6);
        assert_eq!((a + b) - b, a);
        let k = 5;
        assert_eq!((a * k) / k, a);
    }

    #[test]
    fn spider_fusion_sum() {
        let a = Phase::new(1, 4);
        let b = Phase::new(1, 2);
        assert_eq!(a + b, Phase::new(3, 4));
    }

    #[test]
    fn division_by_zero_fails() {
        let a = Phase::new(1, 2);
        assert!(a.checked_div_int(0).is_err());
        assert!(a.checked_div_phase(Phase::ZERO).is_err());
    }

    #[test]
    fn clifford_and_multiple_of_pi() {
        assert!(Phase::PI.is_multiple_of_pi());
        assert!(Phase::new(1, 2).is_clifford());
        assert!(!Phase::new(1, 4).is_clifford());
    }

    #[test]
    fn from_float_round_trips_pi_over_four() {
        let p = Phase::from_float(std::f64::consts::FRAC_PI_4 / std::f64::consts::PI, 1e-6);
        assert_eq!(p, Phase::new(1, 4));
    }

    #[test]
    fn parse_round_trips_through_display() {
        for p in [Phase::ZERO, Phase::PI, Phase::new(1, 2), Phase::new(3, 4), Phase::new(5, 4)] {
            assert_eq!(Phase::parse(&p.to_string()).unwrap(), p);
        }
    }

    #[test]
    fn display_matches_expected_forms() {
        assert_eq!(Phase::ZERO.to_string(), "0");
        assert_eq!(Phase::PI.to_string(), "pi");
        assert_eq!(Phase::new(1, 2).to_string(), "pi/2");
        assert_eq!(Phase::new(3, 4).to_string(), "3pi/4");
    }
}
