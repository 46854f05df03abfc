//! Invoice domain types: line items and the parties on an invoice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvoiceError;

fn default_quantity() -> Decimal {
    Decimal::ONE
}

/// `quantity × rate`, rejecting negative factors before multiplying.
fn line_amount(quantity: Decimal, rate: Decimal) -> Result<Decimal, InvoiceError> {
    if quantity < Decimal::ZERO {
        return Err(InvoiceError::NegativeQuantity(quantity));
    }
    if rate < Decimal::ZERO {
        return Err(InvoiceError::NegativeRate(rate));
    }
    quantity
        .checked_mul(rate)
        .ok_or(InvoiceError::AmountOverflow)
}

/// One billed line, stated in the invoice's foreign currency.
///
/// `amount` is never converted in place; local-currency figures are derived
/// from it when totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description of the goods or service.
    pub description: String,
    /// HSN (goods) or SAC (services) classification code.
    pub hsn_sac: String,
    /// Billed quantity.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    /// Foreign-currency unit price.
    pub rate: Decimal,
    /// Foreign-currency line total.
    pub amount: Decimal,
}

impl LineItem {
    /// Creates a line whose amount is `quantity × rate`.
    ///
    /// # Errors
    ///
    /// Returns an error if quantity or rate is negative, or
    /// `AmountOverflow` when their product leaves the decimal range.
    pub fn priced(
        description: impl Into<String>,
        hsn_sac: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<Self, InvoiceError> {
        let item = Self {
            description: description.into(),
            hsn_sac: hsn_sac.into(),
            quantity,
            rate,
            amount: line_amount(quantity, rate)?,
        };
        item.validate()?;
        Ok(item)
    }

    /// Creates a single-quantity line billed at a fixed amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative.
    pub fn fixed(
        description: impl Into<String>,
        hsn_sac: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, InvoiceError> {
        if amount < Decimal::ZERO {
            return Err(InvoiceError::NegativeAmount(amount));
        }
        let item = Self {
            description: description.into(),
            hsn_sac: hsn_sac.into(),
            quantity: Decimal::ONE,
            rate: amount,
            amount,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks that quantity, rate and amount are all non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first negative field found.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        if self.quantity < Decimal::ZERO {
            return Err(InvoiceError::NegativeQuantity(self.quantity));
        }
        if self.rate < Decimal::ZERO {
            return Err(InvoiceError::NegativeRate(self.rate));
        }
        if self.amount < Decimal::ZERO {
            return Err(InvoiceError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Loosely filled line as it arrives from a form or API body.
///
/// Either `amount` is supplied directly, or it is derived from
/// `quantity × rate`. Quantity defaults to one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Description of the goods or service.
    #[serde(default)]
    pub description: String,
    /// HSN or SAC code.
    #[serde(default, alias = "hsn", alias = "sac")]
    pub hsn_sac: String,
    /// Billed quantity.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Unit price.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Line total.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl LineItemInput {
    /// Resolves the input into a validated [`LineItem`].
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when neither `amount` nor `rate` is present,
    /// a negative-value error from validation, or `AmountOverflow` when
    /// `quantity × rate` leaves the decimal range.
    pub fn resolve(self) -> Result<LineItem, InvoiceError> {
        let quantity = self.quantity.unwrap_or(Decimal::ONE);
        let item = match (self.amount, self.rate) {
            (Some(amount), _) if amount < Decimal::ZERO => {
                return Err(InvoiceError::NegativeAmount(amount));
            }
            (Some(amount), rate) => LineItem {
                description: self.description,
                hsn_sac: self.hsn_sac,
                quantity,
                rate: rate.unwrap_or(amount),
                amount,
            },
            (None, Some(rate)) => LineItem {
                description: self.description,
                hsn_sac: self.hsn_sac,
                quantity,
                rate,
                amount: line_amount(quantity, rate)?,
            },
            (None, None) => return Err(InvoiceError::MissingField("amount")),
        };
        item.validate()?;
        Ok(item)
    }
}

/// Party supplying the goods or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Legal name.
    pub name: String,
    /// Postal address, may span several lines.
    pub address: String,
    /// GSTIN, absent for foreign suppliers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
}

/// Party receiving the goods or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Legal name.
    pub name: String,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Postal address.
    pub address: String,
    /// Country of the recipient.
    pub country: String,
    /// GSTIN, or "URP" for an unregistered person.
    #[serde(default = "unregistered")]
    pub gstin: String,
    /// Place of supply as printed on the invoice.
    #[serde(default = "foreign_place_of_supply")]
    pub place_of_supply: String,
    /// Whether tax is payable on reverse charge.
    #[serde(default)]
    pub reverse_charge: bool,
}

fn unregistered() -> String {
    "URP".to_string()
}

fn foreign_place_of_supply() -> String {
    "96 – Foreign Country".to_string()
}
