//! SI dimension vectors.
//!
//! A [`Dimension`] is the canonical fingerprint of a quantity kind: nine
//! signed exponents, one per SI base dimension plus the two angular
//! pseudo-dimensions (radian and steradian). Two kinds are compatible iff
//! their vectors are equal — equality is exact integer comparison, never a
//! floating-point tolerance.
//!
//! Arithmetic mirrors the quantity algebra:
//!
//! * multiplying quantities adds their vectors ([`Mul`]),
//! * dividing subtracts them ([`Div`]),
//! * inverting negates every exponent ([`Neg`]),
//! * raising to a power scales every exponent ([`Dimension::pow`],
//!   [`Dimension::root`]).
//!
//! # Textual signatures
//!
//! Vectors parse from and print to a compact signature: a sequence of base
//! symbols (`rad`, `sr`, `kg`, `m`, `s`, `A`, `K`, `mol`, `cd`), each with an
//! optional integer exponent, and an optional `/` that negates everything
//! after it.
//!
//! ```rust
//! use qdim_core::Dimension;
//!
//! let force: Dimension = "kgm/s2".parse().unwrap();
//! assert_eq!(force, Dimension::FORCE);
//! assert_eq!(force.to_string(), "kgm/s2");
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The nine-exponent SI dimension vector.
///
/// Exponent order follows the conventional tuple (rad, sr, kg, m, s, A, K,
/// mol, cd). The vector is immutable; all operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimension {
    /// Plane angle exponent (rad).
    pub angle: i8,
    /// Solid angle exponent (sr).
    pub solid_angle: i8,
    /// Mass exponent (kg).
    pub mass: i8,
    /// Length exponent (m).
    pub length: i8,
    /// Time exponent (s).
    pub time: i8,
    /// Electric current exponent (A).
    pub current: i8,
    /// Thermodynamic temperature exponent (K).
    pub temperature: i8,
    /// Amount of substance exponent (mol).
    pub amount: i8,
    /// Luminous intensity exponent (cd).
    pub luminous: i8,
}

/// Base symbols in canonical emission order, paired with field accessors.
/// Tokenization below relies on multi-letter symbols being tried first.
const SYMBOLS: [(&str, fn(&Dimension) -> i8); 9] = [
    ("rad", |d| d.angle),
    ("sr", |d| d.solid_angle),
    ("kg", |d| d.mass),
    ("m", |d| d.length),
    ("s", |d| d.time),
    ("A", |d| d.current),
    ("K", |d| d.temperature),
    ("mol", |d| d.amount),
    ("cd", |d| d.luminous),
];

/// Longest-match order for the tokenizer (`mol` before `m`, `sr` before `s`).
const TOKENS: [&str; 9] = ["rad", "mol", "sr", "kg", "cd", "m", "s", "A", "K"];

impl Dimension {
    /// Creates a vector from the nine exponents in tuple order
    /// (rad, sr, kg, m, s, A, K, mol, cd).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        angle: i8,
        solid_angle: i8,
        mass: i8,
        length: i8,
        time: i8,
        current: i8,
        temperature: i8,
        amount: i8,
        luminous: i8,
    ) -> Self {
        Self {
            angle,
            solid_angle,
            mass,
            length,
            time,
            current,
            temperature,
            amount,
            luminous,
        }
    }

    /// The zero vector (dimensionless).
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0, 0, 0);

    /// Plane angle (rad¹).
    pub const ANGLE: Self = Self::new(1, 0, 0, 0, 0, 0, 0, 0, 0);
    /// Solid angle (sr¹).
    pub const SOLID_ANGLE: Self = Self::new(0, 1, 0, 0, 0, 0, 0, 0, 0);
    /// Mass (kg¹).
    pub const MASS: Self = Self::new(0, 0, 1, 0, 0, 0, 0, 0, 0);
    /// Length (m¹).
    pub const LENGTH: Self = Self::new(0, 0, 0, 1, 0, 0, 0, 0, 0);
    /// Time (s¹).
    pub const TIME: Self = Self::new(0, 0, 0, 0, 1, 0, 0, 0, 0);
    /// Electric current (A¹).
    pub const CURRENT: Self = Self::new(0, 0, 0, 0, 0, 1, 0, 0, 0);
    /// Thermodynamic temperature (K¹).
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 0, 0, 1, 0, 0);
    /// Amount of substance (mol¹).
    pub const AMOUNT: Self = Self::new(0, 0, 0, 0, 0, 0, 0, 1, 0);
    /// Luminous intensity (cd¹).
    pub const LUMINOUS_INTENSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 0, 0, 1);

    /// Area (m²).
    pub const AREA: Self = Self::new(0, 0, 0, 2, 0, 0, 0, 0, 0);
    /// Volume (m³).
    pub const VOLUME: Self = Self::new(0, 0, 0, 3, 0, 0, 0, 0, 0);
    /// Velocity (m·s⁻¹).
    pub const VELOCITY: Self = Self::new(0, 0, 0, 1, -1, 0, 0, 0, 0);
    /// Acceleration (m·s⁻²).
    pub const ACCELERATION: Self = Self::new(0, 0, 0, 1, -2, 0, 0, 0, 0);
    /// Force (kg·m·s⁻²).
    pub const FORCE: Self = Self::new(0, 0, 1, 1, -2, 0, 0, 0, 0);
    /// Energy (kg·m²·s⁻²).
    pub const ENERGY: Self = Self::new(0, 0, 1, 2, -2, 0, 0, 0, 0);
    /// Power (kg·m²·s⁻³).
    pub const POWER: Self = Self::new(0, 0, 1, 2, -3, 0, 0, 0, 0);
    /// Pressure (kg·m⁻¹·s⁻²).
    pub const PRESSURE: Self = Self::new(0, 0, 1, -1, -2, 0, 0, 0, 0);
    /// Frequency (s⁻¹).
    pub const FREQUENCY: Self = Self::new(0, 0, 0, 0, -1, 0, 0, 0, 0);
    /// Angular velocity (rad·s⁻¹).
    pub const ANGULAR_VELOCITY: Self = Self::new(1, 0, 0, 0, -1, 0, 0, 0, 0);
    /// Electric charge (A·s).
    pub const CHARGE: Self = Self::new(0, 0, 0, 0, 1, 1, 0, 0, 0);
    /// Electric potential (kg·m²·s⁻³·A⁻¹).
    pub const VOLTAGE: Self = Self::new(0, 0, 1, 2, -3, -1, 0, 0, 0);
    /// Electric resistance (kg·m²·s⁻³·A⁻²).
    pub const RESISTANCE: Self = Self::new(0, 0, 1, 2, -3, -2, 0, 0, 0);
    /// Capacitance (kg⁻¹·m⁻²·s⁴·A²).
    pub const CAPACITANCE: Self = Self::new(0, 0, -1, -2, 4, 2, 0, 0, 0);

    /// Returns true if every exponent is zero.
    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        self.angle == 0
            && self.solid_angle == 0
            && self.mass == 0
            && self.length == 0
            && self.time == 0
            && self.current == 0
            && self.temperature == 0
            && self.amount == 0
            && self.luminous == 0
    }

    /// Raises the vector to an integer power (scales every exponent).
    ///
    /// ```rust
    /// use qdim_core::Dimension;
    /// assert_eq!(Dimension::LENGTH.pow(2), Dimension::AREA);
    /// assert_eq!(Dimension::VELOCITY.pow(-1).to_string(), "s/m");
    /// ```
    #[must_use]
    pub const fn pow(self, n: i8) -> Self {
        Self {
            angle: self.angle * n,
            solid_angle: self.solid_angle * n,
            mass: self.mass * n,
            length: self.length * n,
            time: self.time * n,
            current: self.current * n,
            temperature: self.temperature * n,
            amount: self.amount * n,
            luminous: self.luminous * n,
        }
    }

    /// Takes the `n`-th root of the vector (divides every exponent).
    ///
    /// This is the "small rational" power used for square-root-of-dimension
    /// operations on variance-like quantities. Fails when any exponent is
    /// not divisible by `n`, since fractional exponents are not
    /// representable.
    ///
    /// ```rust
    /// use qdim_core::Dimension;
    /// assert_eq!(Dimension::AREA.root(2).unwrap(), Dimension::LENGTH);
    /// assert!(Dimension::LENGTH.root(2).is_err());
    /// ```
    pub fn root(self, n: i8) -> Result<Self> {
        let exps = [
            self.angle,
            self.solid_angle,
            self.mass,
            self.length,
            self.time,
            self.current,
            self.temperature,
            self.amount,
            self.luminous,
        ];
        if n == 0 || exps.iter().any(|e| e % n != 0) {
            return Err(Error::DimensionMismatch {
                expected: format!("a vector with exponents divisible by {n}"),
                found: self.to_string(),
            });
        }
        Ok(Self {
            angle: self.angle / n,
            solid_angle: self.solid_angle / n,
            mass: self.mass / n,
            length: self.length / n,
            time: self.time / n,
            current: self.current / n,
            temperature: self.temperature / n,
            amount: self.amount / n,
            luminous: self.luminous / n,
        })
    }

    /// Parses a textual SI signature.
    ///
    /// Equivalent to [`str::parse`]; provided so call sites read the way
    /// the rest of the API does.
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operators: Mul = add exponents, Div = subtract, Neg = invert
// ─────────────────────────────────────────────────────────────────────────────

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            angle: self.angle + rhs.angle,
            solid_angle: self.solid_angle + rhs.solid_angle,
            mass: self.mass + rhs.mass,
            length: self.length + rhs.length,
            time: self.time + rhs.time,
            current: self.current + rhs.current,
            temperature: self.temperature + rhs.temperature,
            amount: self.amount + rhs.amount,
            luminous: self.luminous + rhs.luminous,
        }
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self * -rhs
    }
}

impl Neg for Dimension {
    type Output = Self;

    /// Negating a vector is inversion: the dimension of `1/x`.
    fn neg(self) -> Self {
        self.pow(-1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Textual signature: Display and FromStr
// ─────────────────────────────────────────────────────────────────────────────

impl fmt::Display for Dimension {
    /// Emits the canonical signature: numerator symbols in tuple order, a
    /// single `/`, then denominator symbols with absolute exponents.
    /// Dimensionless vectors print as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut den = String::new();
        for (sym, get) in SYMBOLS {
            let e = get(self);
            if e > 0 {
                f.write_str(sym)?;
                if e > 1 {
                    write!(f, "{e}")?;
                }
            } else if e < 0 {
                den.push_str(sym);
                if e < -1 {
                    den.push_str(&(-e).to_string());
                }
            }
        }
        if !den.is_empty() {
            write!(f, "/{den}")?;
        }
        Ok(())
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedSignature {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut dim = Dimension::DIMENSIONLESS;
        let mut rest = input;
        let mut sign: i8 = 1;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('/') {
                if sign < 0 {
                    return Err(malformed("only one '/' is allowed"));
                }
                sign = -1;
                rest = after;
                continue;
            }

            let Some(sym) = TOKENS.iter().find(|t| rest.starts_with(**t)) else {
                return Err(malformed("unknown base symbol"));
            };
            rest = &rest[sym.len()..];

            // Optional signed integer exponent.
            let digits_end = {
                let bytes = rest.as_bytes();
                let mut i = 0;
                if bytes.first() == Some(&b'-') {
                    i = 1;
                }
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                // A bare '-' is not an exponent.
                if i == 1 && bytes.first() == Some(&b'-') {
                    0
                } else {
                    i
                }
            };
            let exp: i8 = if digits_end == 0 {
                1
            } else {
                rest[..digits_end]
                    .parse()
                    .map_err(|_| malformed("exponent out of range"))?
            };
            rest = &rest[digits_end..];

            let slot = match *sym {
                "rad" => &mut dim.angle,
                "sr" => &mut dim.solid_angle,
                "kg" => &mut dim.mass,
                "m" => &mut dim.length,
                "s" => &mut dim.time,
                "A" => &mut dim.current,
                "K" => &mut dim.temperature,
                "mol" => &mut dim.amount,
                "cd" => &mut dim.luminous,
                _ => unreachable!(),
            };
            // Exponents accumulate in i8; "/m-128" and repeated symbols can
            // step outside its range, which is a parse error rather than a
            // panic.
            *slot = sign
                .checked_mul(exp)
                .and_then(|signed| slot.checked_add(signed))
                .ok_or_else(|| malformed("exponent out of range"))?;
        }

        Ok(dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Algebra
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn multiply_adds_exponents() {
        assert_eq!(Dimension::LENGTH * Dimension::LENGTH, Dimension::AREA);
        assert_eq!(Dimension::AREA * Dimension::LENGTH, Dimension::VOLUME);
    }

    #[test]
    fn divide_subtracts_exponents() {
        assert_eq!(Dimension::LENGTH / Dimension::TIME, Dimension::VELOCITY);
        assert_eq!(Dimension::ENERGY / Dimension::TIME, Dimension::POWER);
        assert_eq!(Dimension::POWER / Dimension::AREA, "kg/s3".parse().unwrap());
    }

    #[test]
    fn force_from_base_vectors() {
        let force = Dimension::MASS * Dimension::LENGTH * Dimension::TIME.pow(-2);
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn invert_negates() {
        assert_eq!(-Dimension::TIME, Dimension::FREQUENCY);
        assert_eq!(-(-Dimension::ENERGY), Dimension::ENERGY);
    }

    #[test]
    fn root_of_variance_like_vector() {
        let variance = Dimension::VELOCITY.pow(2);
        assert_eq!(variance.root(2).unwrap(), Dimension::VELOCITY);
    }

    #[test]
    fn root_rejects_indivisible_exponents() {
        let err = Dimension::VOLUME.root(2).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signature parsing and printing
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn parse_force_signature() {
        assert_eq!("kgm/s2".parse::<Dimension>().unwrap(), Dimension::FORCE);
    }

    #[test]
    fn parse_bare_denominator() {
        assert_eq!("/s".parse::<Dimension>().unwrap(), Dimension::FREQUENCY);
    }

    #[test]
    fn parse_volume_rate() {
        let d: Dimension = "m3/s".parse().unwrap();
        assert_eq!(d, Dimension::VOLUME / Dimension::TIME);
    }

    #[test]
    fn parse_longest_match_tokens() {
        // `mol` must not be read as `m` + junk, nor `sr` as `s` + junk.
        assert_eq!("mol".parse::<Dimension>().unwrap(), Dimension::AMOUNT);
        assert_eq!("sr".parse::<Dimension>().unwrap(), Dimension::SOLID_ANGLE);
    }

    #[test]
    fn parse_empty_is_dimensionless() {
        assert_eq!("".parse::<Dimension>().unwrap(), Dimension::DIMENSIONLESS);
    }

    #[test]
    fn parse_rejects_unknown_symbol() {
        let err = "kgx".parse::<Dimension>().unwrap_err();
        assert!(matches!(err, Error::MalformedSignature { .. }));
    }

    #[test]
    fn parse_rejects_second_slash() {
        assert!("m/s/s".parse::<Dimension>().is_err());
    }

    #[test]
    fn parse_rejects_exponent_overflow() {
        // Negating i8::MIN and accumulating past i8::MAX must both come back
        // as parse errors, not arithmetic panics.
        for input in ["/m-128", "m127m1"] {
            let err = input.parse::<Dimension>().unwrap_err();
            assert!(
                matches!(err, Error::MalformedSignature { .. }),
                "input '{input}'"
            );
        }
    }

    #[test]
    fn display_round_trip_for_named_vectors() {
        for d in [
            Dimension::DIMENSIONLESS,
            Dimension::ANGLE,
            Dimension::SOLID_ANGLE,
            Dimension::MASS,
            Dimension::LENGTH,
            Dimension::TIME,
            Dimension::CURRENT,
            Dimension::TEMPERATURE,
            Dimension::AMOUNT,
            Dimension::LUMINOUS_INTENSITY,
            Dimension::AREA,
            Dimension::VOLUME,
            Dimension::VELOCITY,
            Dimension::ACCELERATION,
            Dimension::FORCE,
            Dimension::ENERGY,
            Dimension::POWER,
            Dimension::PRESSURE,
            Dimension::FREQUENCY,
            Dimension::ANGULAR_VELOCITY,
            Dimension::CHARGE,
            Dimension::VOLTAGE,
            Dimension::RESISTANCE,
            Dimension::CAPACITANCE,
        ] {
            let text = d.to_string();
            assert_eq!(text.parse::<Dimension>().unwrap(), d, "signature '{text}'");
        }
    }

    #[test]
    fn display_matches_algebraic_composition() {
        // "kgm/s2" must parse to the same vector as composing it.
        let parsed: Dimension = "kgm/s2".parse().unwrap();
        let composed = Dimension::MASS * Dimension::LENGTH / Dimension::TIME.pow(2);
        assert_eq!(parsed, composed);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Property-based tests
    // ─────────────────────────────────────────────────────────────────────────

    fn arb_dimension() -> impl Strategy<Value = Dimension> {
        let e = -4i8..=4i8;
        (
            (e.clone(), e.clone(), e.clone(), e.clone(), e.clone()),
            (e.clone(), e.clone(), e.clone(), e),
        )
            .prop_map(|((a, b, c, d, f), (g, h, i, j))| {
                Dimension::new(a, b, c, d, f, g, h, i, j)
            })
    }

    proptest! {
        #[test]
        fn prop_multiply_then_divide_is_identity(a in arb_dimension(), b in arb_dimension()) {
            prop_assert_eq!((a * b) / b, a);
        }

        #[test]
        fn prop_signature_round_trip(d in arb_dimension()) {
            let text = d.to_string();
            prop_assert_eq!(text.parse::<Dimension>().unwrap(), d);
        }

        #[test]
        fn prop_inversion_is_involutive(d in arb_dimension()) {
            prop_assert_eq!(-(-d), d);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_round_trip() {
        let json = serde_json::to_string(&Dimension::FORCE).unwrap();
        assert_eq!(serde_json::from_str::<Dimension>(&json).unwrap(), Dimension::FORCE);
    }
}
