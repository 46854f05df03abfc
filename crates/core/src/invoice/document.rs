//! Invoice documents: the two supported variants sharing one line-item core.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gst_invoice_shared::InvoiceDefaults;
use gst_invoice_shared::types::Currency;

use super::tax::TaxPolicy;
use super::totals::{InvoiceTotals, compute_totals};
use super::types::{LineItem, Recipient, Supplier};
use crate::currency::FxRate;
use crate::error::InvoiceError;

/// Which kind of GST document this is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Export of services, zero-rated under a Letter of Undertaking.
    Export {
        /// LUT reference number.
        lut_id: String,
    },
    /// Self-invoice raised by the recipient for an import of service.
    RcmSelfInvoice,
}

impl InvoiceKind {
    /// Heading printed at the top of the document.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Export { .. } => "Tax Invoice",
            Self::RcmSelfInvoice => "RCM Self-Invoice for Import of Service",
        }
    }

    /// Line printed under the heading.
    #[must_use]
    pub const fn subtitle(&self) -> Option<&'static str> {
        match self {
            Self::Export { .. } => Some("(Export of Services under LUT – IGST Not Payable)"),
            Self::RcmSelfInvoice => None,
        }
    }

    /// Footnote explaining the tax treatment.
    #[must_use]
    pub const fn declaration(&self) -> &'static str {
        match self {
            Self::Export { .. } => {
                "* This supply is zero-rated under Section 16 of the IGST Act 2017 under LUT without payment of tax."
            }
            Self::RcmSelfInvoice => {
                "* Tax on this import of service is payable by the recipient under reverse charge."
            }
        }
    }

    /// Tax policy used when the caller does not pick one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxRate` if the configured IGST rate is out of range.
    pub fn default_tax_policy(&self, igst_rate: Decimal) -> Result<TaxPolicy, InvoiceError> {
        match self {
            Self::Export { .. } => Ok(TaxPolicy::ZeroRated),
            Self::RcmSelfInvoice => TaxPolicy::percent_of_local(igst_rate),
        }
    }
}

/// A complete invoice as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, e.g. `INV-2025-001`.
    pub invoice_number: String,
    /// Invoice date; the FX rate is taken as of this date.
    pub invoice_date: NaiveDate,
    /// Variant and its variant-specific fields.
    pub kind: InvoiceKind,
    /// Supplying party.
    pub supplier: Supplier,
    /// Receiving party.
    pub recipient: Recipient,
    /// Currency every line amount is stated in.
    pub currency: Currency,
    /// Local units per one unit of `currency`.
    pub fx_rate: Decimal,
    /// Tax applied to the local subtotal.
    pub tax_policy: TaxPolicy,
    /// Billed lines.
    pub items: Vec<LineItem>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Totals and words derived from an [`Invoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedInvoice {
    /// Full-precision totals.
    pub totals: InvoiceTotals,
    /// `round(total_local)` in words.
    pub amount_in_words: String,
}

impl Invoice {
    /// Checks required text fields.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        if self.invoice_number.trim().is_empty() {
            return Err(InvoiceError::MissingField("invoice_number"));
        }
        if self.supplier.name.trim().is_empty() {
            return Err(InvoiceError::MissingField("supplier.name"));
        }
        if self.recipient.name.trim().is_empty() {
            return Err(InvoiceError::MissingField("recipient.name"));
        }
        if let InvoiceKind::Export { lut_id } = &self.kind {
            if lut_id.trim().is_empty() {
                return Err(InvoiceError::MissingField("lut_id"));
            }
        }
        Ok(())
    }

    /// The invoice's exchange rate as a validated [`FxRate`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidExchangeRate` when the rate is not positive.
    pub fn fx(&self) -> Result<FxRate, InvoiceError> {
        FxRate::new(self.currency, self.fx_rate, self.invoice_date)
    }

    /// Computes totals from the current items, rate and policy.
    ///
    /// # Errors
    ///
    /// See [`compute_totals`].
    pub fn totals(&self) -> Result<InvoiceTotals, InvoiceError> {
        let fx = self.fx()?;
        compute_totals(&self.items, fx.rate, &self.tax_policy)
    }

    /// Validates the invoice and derives totals plus amount in words.
    ///
    /// # Errors
    ///
    /// Any validation, computation or words-range error.
    pub fn compute(&self) -> Result<ComputedInvoice, InvoiceError> {
        self.validate()?;
        let totals = self.totals()?;
        let amount_in_words = totals.amount_in_words()?;
        Ok(ComputedInvoice {
            totals,
            amount_in_words,
        })
    }

    /// Prefilled export invoice used for new drafts.
    #[must_use]
    pub fn sample_export(defaults: &InvoiceDefaults, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_number: "INV-2025-001".to_string(),
            invoice_date,
            kind: InvoiceKind::Export {
                lut_id: defaults.lut_id.clone(),
            },
            supplier: Supplier {
                name: "XYZ Technologies Pvt Ltd".to_string(),
                address: "123 Tech Park, Sector 18\nGurgaon, Haryana 122018\nIndia".to_string(),
                gstin: Some("07AAACX1234F1Z5".to_string()),
            },
            recipient: Recipient {
                name: "ABC Solutions Ltd".to_string(),
                email: None,
                address: "456 Business Center\nRua das Flores, 789\nSão Paulo, SP 01234-567\nBrazil"
                    .to_string(),
                country: "Brazil".to_string(),
                gstin: "URP".to_string(),
                place_of_supply: "96 – Foreign Country".to_string(),
                reverse_charge: false,
            },
            currency: Currency::Usd,
            fx_rate: defaults.default_fx_rate,
            tax_policy: TaxPolicy::ZeroRated,
            items: vec![LineItem {
                description: "Information technology (IT) design and development services."
                    .to_string(),
                hsn_sac: "998314".to_string(),
                quantity: Decimal::ONE,
                rate: Decimal::new(299_250, 2),
                amount: Decimal::new(299_250, 2),
            }],
            notes: None,
        }
    }

    /// Prefilled RCM self-invoice used for new drafts.
    #[must_use]
    pub fn sample_rcm(defaults: &InvoiceDefaults, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_number: "SI/RCM/2025/001".to_string(),
            invoice_date,
            kind: InvoiceKind::RcmSelfInvoice,
            supplier: Supplier {
                name: "Deel Inc.".to_string(),
                address: "123 Market Street, San Francisco, CA, USA".to_string(),
                gstin: None,
            },
            recipient: Recipient {
                name: "XYZ Technologies Pvt Ltd".to_string(),
                email: None,
                address: "123 Tech Park, Sector 18\nGurgaon, Haryana 122018\nIndia".to_string(),
                country: "India".to_string(),
                gstin: "07AAACX1234F1Z5".to_string(),
                place_of_supply: "07 – Delhi".to_string(),
                reverse_charge: true,
            },
            currency: Currency::Usd,
            fx_rate: defaults.default_fx_rate,
            tax_policy: TaxPolicy::PercentOfLocal {
                rate: defaults.igst_rate,
            },
            items: vec![LineItem {
                description: "Provider fee charged by Deel Inc. for June 2025".to_string(),
                hsn_sac: "998599".to_string(),
                quantity: Decimal::ONE,
                rate: Decimal::new(8910, 2),
                amount: Decimal::new(8910, 2),
            }],
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn test_sample_export_computes() {
        let invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        let computed = invoice.compute().unwrap();

        // 2992.50 USD at 86.50
        assert_eq!(computed.totals.subtotal_local, dec!(258851.25));
        assert_eq!(computed.totals.tax_local, Decimal::ZERO);
        assert_eq!(
            computed.amount_in_words,
            "Two Lakh Fifty Eight Thousand Eight Hundred and Fifty One"
        );
    }

    #[test]
    fn test_sample_rcm_charges_igst() {
        let mut invoice = Invoice::sample_rcm(&InvoiceDefaults::default(), date());
        invoice.fx_rate = dec!(83.10);
        let computed = invoice.compute().unwrap();

        assert_eq!(computed.totals.rounded().tax_local, dec!(1332.76));
        assert_eq!(computed.totals.rounded().total_local, dec!(8736.97));
    }

    #[test]
    fn test_policy_is_carried_not_derived_from_kind() {
        // An export invoice with an explicit percentage policy is taxed.
        let mut invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        invoice.tax_policy = TaxPolicy::percent_of_local(dec!(0.10)).unwrap();
        let totals = invoice.totals().unwrap();
        assert_eq!(totals.tax_local, dec!(25885.125));
    }

    #[test]
    fn test_default_tax_policy_per_kind() {
        let export = InvoiceKind::Export {
            lut_id: "LUT".into(),
        };
        assert_eq!(
            export.default_tax_policy(dec!(0.18)).unwrap(),
            TaxPolicy::ZeroRated
        );
        assert_eq!(
            InvoiceKind::RcmSelfInvoice
                .default_tax_policy(dec!(0.18))
                .unwrap(),
            TaxPolicy::PercentOfLocal { rate: dec!(0.18) }
        );
        assert!(
            InvoiceKind::RcmSelfInvoice
                .default_tax_policy(dec!(18))
                .is_err()
        );
    }

    #[test]
    fn test_validate_required_fields() {
        let mut invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        invoice.invoice_number = "  ".into();
        assert_eq!(
            invoice.compute(),
            Err(InvoiceError::MissingField("invoice_number"))
        );

        let mut invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        invoice.kind = InvoiceKind::Export {
            lut_id: String::new(),
        };
        assert_eq!(invoice.validate(), Err(InvoiceError::MissingField("lut_id")));
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut invoice = Invoice::sample_rcm(&InvoiceDefaults::default(), date());
        invoice.items.clear();
        assert_eq!(invoice.compute(), Err(InvoiceError::EmptyLineItems));
    }

    #[test]
    fn test_fx_rate_view() {
        let invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        let fx = invoice.fx().unwrap();
        assert_eq!(fx.foreign_currency, Currency::Usd);
        assert_eq!(fx.as_of, date());
    }

    #[test]
    fn test_serde_round_trip_keeps_variant() {
        let invoice = Invoice::sample_export(&InvoiceDefaults::default(), date());
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["kind"]["type"], "export");
        assert_eq!(json["kind"]["lut_id"], "LUT-2025-001");
        assert_eq!(json["invoice_date"], "2025-06-30");

        let back: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, invoice);
    }
}
