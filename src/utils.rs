use num_bigint::BigInt;
use tracing::debug;

use crate::{AmmConfig, Decimal, ErrorCode};

/// Conversion of caller-supplied amounts into [`Decimal`].
///
/// Parsing failures surface as [`ErrorCode::MalformedNumericInput`] and are
/// turned into an absent quote by the public operations.
pub trait IntoDecimal {
    fn into_decimal(self) -> Result<Decimal, ErrorCode>;
}

impl IntoDecimal for Decimal {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        Ok(self)
    }
}

impl IntoDecimal for &Decimal {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        Ok(self.clone())
    }
}

impl IntoDecimal for &str {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        self.parse()
    }
}

impl IntoDecimal for String {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        self.parse()
    }
}

impl IntoDecimal for &String {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        self.parse()
    }
}

impl IntoDecimal for BigInt {
    fn into_decimal(self) -> Result<Decimal, ErrorCode> {
        Ok(Decimal::from(self))
    }
}

macro_rules! impl_into_decimal_for_int {
    ($($t:ty),*) => {
        $(
            impl IntoDecimal for $t {
                fn into_decimal(self) -> Result<Decimal, ErrorCode> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_decimal_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Adds the contract's liquidity subsidy to a raw base-asset pool balance.
pub fn credit_subsidy(base_pool: &Decimal) -> Decimal {
    credit_subsidy_with(&AmmConfig::default(), base_pool)
}

pub fn credit_subsidy_with(amm_config: &AmmConfig, base_pool: &Decimal) -> Decimal {
    base_pool + Decimal::from(amm_config.subsidy_credit)
}

/// `floor(x / y) + 1` whenever the truncated remainder is non-negative,
/// otherwise `floor(x / y)`. A zero remainder also rounds up, as the
/// contract quote does.
pub fn ceil_div(x: &Decimal, y: &Decimal) -> Result<Decimal, ErrorCode> {
    let quotient = x.div_floor(y)?;
    if x.checked_rem(y)? >= Decimal::zero() {
        Ok(quotient + Decimal::one())
    } else {
        Ok(quotient)
    }
}

pub fn ensure_positive(values: &[&Decimal]) -> Result<(), ErrorCode> {
    if values.iter().all(|value| value.is_positive()) {
        Ok(())
    } else {
        Err(ErrorCode::InvalidInput)
    }
}

/// Collapses an internal failure into the absent quote callers check for.
pub(crate) fn quote_or_none<T>(operation: &'static str, result: Result<T, ErrorCode>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(operation, error = %err, "quote rejected");
            None
        }
    }
}
