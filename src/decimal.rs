use std::cmp::Ordering;
use std::fmt;
use std::io::{Read, Write};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::ErrorCode;

/// Largest exponent accepted in scientific notation, e.g. `1e400`.
const MAX_EXPONENT: i64 = 400;

/// Arbitrary-precision base-10 number: `mantissa * 10^-scale`.
///
/// Values are kept normalised (no trailing zeros after the decimal point),
/// so the derived equality is value equality: `1.50 == 1.5`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl Decimal {
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        let mut value = Decimal { mantissa, scale };
        value.normalize();
        value
    }

    pub fn zero() -> Self {
        Decimal { mantissa: BigInt::zero(), scale: 0 }
    }

    pub fn one() -> Self {
        Decimal { mantissa: BigInt::one(), scale: 0 }
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            self.scale = 0;
            return;
        }
        let ten = BigInt::from(10u32);
        while self.scale > 0 && (&self.mantissa % &ten).is_zero() {
            self.mantissa = &self.mantissa / &ten;
            self.scale -= 1;
        }
    }

    /// Both mantissas rescaled to the larger of the two scales.
    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        (
            &self.mantissa * pow10(scale - self.scale),
            &other.mantissa * pow10(scale - other.scale),
            scale,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    /// Divides by `10^places` exactly, e.g. converting integer units into
    /// a display amount.
    pub fn scaled_down(&self, places: u32) -> Decimal {
        Decimal::new(self.mantissa.clone(), self.scale + places)
    }

    /// Quotient rounded to `places` fractional digits, ties away from zero.
    pub fn checked_div(&self, rhs: &Decimal, places: u32) -> Result<Decimal, ErrorCode> {
        if rhs.is_zero() {
            return Err(ErrorCode::DivisionByZero);
        }
        // (m1 / 10^s1) / (m2 / 10^s2) * 10^places
        let numerator = &self.mantissa * pow10(places + rhs.scale);
        let denominator = &rhs.mantissa * pow10(self.scale);
        let mut quotient = &numerator / &denominator;
        let remainder = &numerator % &denominator;
        if remainder.abs() * 2u32 >= denominator.abs() {
            if numerator.is_negative() == denominator.is_negative() {
                quotient += BigInt::one();
            } else {
                quotient -= BigInt::one();
            }
        }
        Ok(Decimal::new(quotient, places))
    }

    /// Exact `floor(self / rhs)`.
    pub fn div_floor(&self, rhs: &Decimal) -> Result<Decimal, ErrorCode> {
        if rhs.is_zero() {
            return Err(ErrorCode::DivisionByZero);
        }
        let (a, b, _) = self.aligned(rhs);
        let mut quotient = &a / &b;
        let remainder = &a % &b;
        if !remainder.is_zero() && remainder.is_negative() != b.is_negative() {
            quotient -= BigInt::one();
        }
        Ok(Decimal::new(quotient, 0))
    }

    /// Truncated remainder: the result takes the sign of the dividend.
    pub fn checked_rem(&self, rhs: &Decimal) -> Result<Decimal, ErrorCode> {
        if rhs.is_zero() {
            return Err(ErrorCode::DivisionByZero);
        }
        let (a, b, scale) = self.aligned(rhs);
        Ok(Decimal::new(&a % &b, scale))
    }

    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> BigInt {
        let divisor = pow10(self.scale);
        let mut quotient = &self.mantissa / &divisor;
        if (&self.mantissa % &divisor).is_negative() {
            quotient -= BigInt::one();
        }
        quotient
    }

    /// Integer part, rounding toward zero.
    pub fn trunc(&self) -> BigInt {
        &self.mantissa / pow10(self.scale)
    }

    /// The integer value, if `self` has no fractional part.
    pub fn to_bigint(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.mantissa.clone())
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl<'a, 'b> Add<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'b Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a + b, scale)
    }
}

impl<'a, 'b> Sub<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'b Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a - b, scale)
    }
}

impl<'a, 'b> Mul<&'b Decimal> for &'a Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'b Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &'a Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl<'a> $imp<Decimal> for &'a Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal { mantissa: -self.mantissa, scale: self.scale }
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -self.clone()
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Decimal::new(BigInt::from(value), 0)
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}

impl FromStr for Decimal {
    type Err = ErrorCode;

    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`, with either side of
    /// the point allowed to be empty but not both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ErrorCode::MalformedNumericInput(s.to_string());
        let trimmed = s.trim();

        let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };

        let (number, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => {
                let exponent = unsigned[idx + 1..]
                    .parse::<i64>()
                    .map_err(|_| malformed())?;
                (&unsigned[..idx], exponent)
            }
            None => (unsigned, 0),
        };
        if exponent.unsigned_abs() > MAX_EXPONENT.unsigned_abs() {
            return Err(malformed());
        }

        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let digits = format!("{int_part}{frac_part}");
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(malformed)?;
        if negative {
            mantissa = -mantissa;
        }

        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| len.checked_sub(exponent))
            .ok_or_else(malformed)?;
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| malformed())?;
            Ok(Decimal::new(mantissa, scale))
        } else {
            Ok(Decimal::new(mantissa * pow10((-scale) as u32), 0))
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl BorshSerialize for Decimal {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.mantissa.to_signed_bytes_le().serialize(writer)?;
        self.scale.serialize(writer)
    }
}

impl BorshDeserialize for Decimal {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let bytes = Vec::<u8>::deserialize_reader(reader)?;
        let scale = u32::deserialize_reader(reader)?;
        Ok(Decimal::new(BigInt::from_signed_bytes_le(&bytes), scale))
    }
}
