//! Stateless invoice preview.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;

use gst_invoice_core::invoice::{Invoice, InvoiceTotals, render_invoice};

use super::invoices::{InvoiceRequest, json_body};
use crate::AppState;
use crate::error::ApiResult;

/// Creates the preview route. Public: nothing is stored.
pub fn routes() -> Router<AppState> {
    Router::new().route("/invoices/preview", post(preview_invoice))
}

/// Computed view of an unsaved invoice.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// The invoice after defaults were applied.
    pub invoice: Invoice,
    /// Totals rounded to 2 decimal places.
    pub totals: InvoiceTotals,
    /// Full-precision totals.
    pub exact_totals: InvoiceTotals,
    /// Rounded total in words.
    pub amount_in_words: String,
    /// Printable text layout.
    pub rendered: String,
}

/// POST `/invoices/preview` - Compute totals and words without saving.
async fn preview_invoice(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<Json<PreviewResponse>> {
    let request = json_body(payload)?;
    let invoice = request.into_invoice(&state.defaults, Utc::now().date_naive())?;
    let computed = invoice.compute()?;
    let rendered = render_invoice(&invoice, &computed);

    Ok(Json(PreviewResponse {
        totals: computed.totals.rounded(),
        exact_totals: computed.totals,
        amount_in_words: computed.amount_in_words,
        rendered,
        invoice,
    }))
}
