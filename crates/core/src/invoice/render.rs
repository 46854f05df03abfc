//! Plain-text invoice layout.

use std::fmt;

use rust_decimal::Decimal;

use gst_invoice_shared::types::Currency;

use super::document::{ComputedInvoice, Invoice, InvoiceKind};
use super::tax::TaxPolicy;
use crate::currency::{convert_amount, round_for_display};

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Borrowed view that formats an invoice and its computed figures.
pub struct InvoiceLayout<'a> {
    invoice: &'a Invoice,
    computed: &'a ComputedInvoice,
}

impl<'a> InvoiceLayout<'a> {
    /// Pairs an invoice with figures computed from it.
    #[must_use]
    pub const fn new(invoice: &'a Invoice, computed: &'a ComputedInvoice) -> Self {
        Self { invoice, computed }
    }
}

/// Renders the printable text of an invoice.
#[must_use]
pub fn render_invoice(invoice: &Invoice, computed: &ComputedInvoice) -> String {
    InvoiceLayout::new(invoice, computed).to_string()
}

/// Formats a local amount with Indian digit grouping, e.g. `₹2,58,851.25`.
#[must_use]
pub fn format_local(amount: Decimal) -> String {
    let shown = format!("{:.2}", round_for_display(amount));
    let (sign, unsigned) = shown
        .strip_prefix('-')
        .map_or(("", shown.as_str()), |rest| ("-", rest));
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, last_three) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{last_three}", groups.join(","))
    };

    format!("{sign}{}{grouped}.{fraction}", Currency::LOCAL.symbol())
}

/// Local value of one line; lines that cannot be converted print as `-`.
fn line_local(amount_foreign: Decimal, fx_rate: Decimal) -> String {
    convert_amount(amount_foreign, fx_rate).map_or_else(|_| "-".to_string(), format_local)
}

impl fmt::Display for InvoiceLayout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        let totals = self.computed.totals.rounded();
        let currency = invoice.currency;

        writeln!(f, "{}", invoice.kind.title().to_uppercase())?;
        if let Some(subtitle) = invoice.kind.subtitle() {
            writeln!(f, "{subtitle}")?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "Invoice No.: {}", invoice.invoice_number)?;
        writeln!(f, "Date: {}", invoice.invoice_date.format("%d/%m/%Y"))?;
        writeln!(f, "Place of Supply: {}", invoice.recipient.place_of_supply)?;
        writeln!(
            f,
            "Reverse Charge: {}",
            if invoice.recipient.reverse_charge { "Yes" } else { "No" }
        )?;
        if let InvoiceKind::Export { lut_id } = &invoice.kind {
            writeln!(f, "Letter of Undertaking (LUT) No.: {lut_id}")?;
        }
        writeln!(f)?;

        writeln!(f, "Supplier")?;
        writeln!(f, "  {}", invoice.supplier.name)?;
        for line in invoice.supplier.address.lines() {
            writeln!(f, "  {line}")?;
        }
        if let Some(gstin) = &invoice.supplier.gstin {
            writeln!(f, "  GSTIN: {gstin}")?;
        }
        writeln!(f)?;

        writeln!(f, "Recipient")?;
        writeln!(f, "  {}", invoice.recipient.name)?;
        for line in invoice.recipient.address.lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "  Country: {}", invoice.recipient.country)?;
        writeln!(f, "  GSTIN: {}", invoice.recipient.gstin)?;
        if let Some(email) = &invoice.recipient.email {
            writeln!(f, "  Email: {email}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Conversion Rate: 1 {currency} = {} ({})",
            format_local(invoice.fx_rate),
            invoice.invoice_date.format("%d/%m/%Y")
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "{:<4} {:<36} {:<8} {:>14} {:>14}",
            "S No",
            "Description",
            "HSN/SAC",
            format!("Amount ({currency})"),
            format!("Amount ({})", Currency::LOCAL)
        )?;
        for (index, item) in invoice.items.iter().enumerate() {
            writeln!(
                f,
                "{:<4} {:<36} {:<8} {:>14} {:>14}",
                index + 1,
                item.description,
                item.hsn_sac,
                currency.format_amount(item.amount),
                line_local(item.amount, invoice.fx_rate)
            )?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(
            f,
            "{:<40} {:>39}",
            format!("Subtotal ({currency})"),
            currency.format_amount(totals.subtotal_foreign)
        )?;
        writeln!(
            f,
            "{:<40} {:>39}",
            format!("Subtotal ({})", Currency::LOCAL),
            format_local(totals.subtotal_local)
        )?;
        match invoice.tax_policy {
            TaxPolicy::ZeroRated => {
                writeln!(f, "{:<40} {:>39}", "IGST (zero-rated)", format_local(totals.tax_local))?;
            }
            TaxPolicy::PercentOfLocal { .. } => {
                let label = match invoice.kind {
                    InvoiceKind::RcmSelfInvoice => {
                        format!("IGST @{}% payable under RCM", invoice.tax_policy.percent())
                    }
                    InvoiceKind::Export { .. } => format!("IGST @{}%", invoice.tax_policy.percent()),
                };
                writeln!(f, "{label:<40} {:>39}", format_local(totals.tax_local))?;
            }
        }
        writeln!(
            f,
            "{:<40} {:>39}",
            format!("Invoice Total ({})", Currency::LOCAL),
            format_local(totals.total_local)
        )?;
        writeln!(f)?;

        writeln!(f, "Amount in words: {} Only", self.computed.amount_in_words)?;
        if let Some(notes) = &invoice.notes {
            writeln!(f, "Notes: {notes}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", invoice.kind.declaration())?;
        writeln!(f)?;

        let signatory = match invoice.kind {
            InvoiceKind::Export { .. } => &invoice.supplier.name,
            InvoiceKind::RcmSelfInvoice => &invoice.recipient.name,
        };
        writeln!(f, "For {signatory}")?;
        write!(f, "Authorised Signatory")
    }
}
