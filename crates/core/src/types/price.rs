//! Decimal price stored in a `NUMERIC(12, 2)` column.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when validating a [`Price`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    #[error("price must have at most {max} decimal places")]
    TooPrecise { max: u32 },
    #[error("price must be below 10^{digits} in magnitude")]
    OutOfRange { digits: u32 },
}

/// A monetary amount in the store currency.
///
/// Accepts JSON numbers or numeric strings on input and serializes as a
/// string (`"19.99"`). Deserialization rejects any amount the column cannot
/// hold exactly, so a stored price always reads back as submitted. The sign
/// is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Decimal places the column keeps.
    pub const SCALE: u32 = 2;
    /// Digits allowed before the decimal point.
    pub const INTEGER_DIGITS: u32 = 10;

    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Validate an amount against the column's precision and range.
    ///
    /// Trailing zeros do not count towards the scale: `24.500` is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the amount would be rounded or overflow.
    pub fn parse(amount: Decimal) -> Result<Self, PriceError> {
        if amount.normalize().scale() > Self::SCALE {
            return Err(PriceError::TooPrecise { max: Self::SCALE });
        }
        let limit = Decimal::from(10_i64.pow(Self::INTEGER_DIGITS));
        if amount.abs() >= limit {
            return Err(PriceError::OutOfRange {
                digits: Self::INTEGER_DIGITS,
            });
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::parse(amount).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
