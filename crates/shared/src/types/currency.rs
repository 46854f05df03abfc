//! Currency codes used on export and reverse-charge invoices.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts travel as `rust_decimal::Decimal`; this module only names them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the invoice forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// Australian Dollar
    Aud,
    /// Canadian Dollar
    Cad,
    /// Singapore Dollar
    Sgd,
    /// UAE Dirham
    Aed,
    /// Indian Rupee, the local currency of every invoice.
    Inr,
}

impl Currency {
    /// The local (functional) currency totals are converted into.
    pub const LOCAL: Self = Self::Inr;

    /// Symbol printed in front of amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Aud => "A$",
            Self::Cad => "C$",
            Self::Sgd => "S$",
            Self::Aed => "AED ",
            Self::Inr => "₹",
        }
    }

    /// Formats an amount with the currency symbol at 2 decimal places.
    #[must_use]
    pub fn format_amount(self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.symbol(), rounded)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Aud => write!(f, "AUD"),
            Self::Cad => write!(f, "CAD"),
            Self::Sgd => write!(f, "SGD"),
            Self::Aed => write!(f, "AED"),
            Self::Inr => write!(f, "INR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "AUD" => Ok(Self::Aud),
            "CAD" => Ok(Self::Cad),
            "SGD" => Ok(Self::Sgd),
            "AED" => Ok(Self::Aed),
            "INR" => Ok(Self::Inr),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
