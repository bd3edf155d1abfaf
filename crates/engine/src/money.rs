use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::EngineError;

/// Money amount represented as **integer cents**.
///
/// The database stores every monetary column in cents so sums stay exact;
/// the public API of the engine speaks [`Decimal`].
///
/// ```rust
/// use engine::MoneyCents;
/// use rust_decimal::Decimal;
///
/// let cents = MoneyCents::try_from(Decimal::new(10_080, 2)).unwrap();
/// assert_eq!(cents.cents(), 10_080);
/// assert_eq!(cents.to_decimal().to_string(), "100.8");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the amount as a decimal without trailing zeros (`215.80` → `215.8`).
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2).normalize()
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Checked negation (returns `None` on overflow).
    #[must_use]
    pub fn checked_neg(self) -> Option<MoneyCents> {
        self.0.checked_neg().map(MoneyCents)
    }
}

impl TryFrom<Decimal> for MoneyCents {
    type Error = EngineError;

    /// Converts a decimal amount into cents.
    ///
    /// Rejects amounts with more than 2 fractional digits and amounts that do
    /// not fit an `i64` number of cents.
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(overflow)?;
        if !scaled.fract().is_zero() {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }
        scaled.to_i64().map(MoneyCents).ok_or_else(overflow)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}
