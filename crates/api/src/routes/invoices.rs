//! Saved invoice routes, scoped to the calling user.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use gst_invoice_core::InvoiceError;
use gst_invoice_core::invoice::{
    Invoice, InvoiceKind, InvoiceTotals, LineItemInput, Recipient, Supplier, TaxPolicy,
};
use gst_invoice_shared::InvoiceDefaults;
use gst_invoice_shared::types::{Currency, InvoiceId};
use gst_invoice_store::InvoiceRecord;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Creates the invoice routes (requires the user middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}

/// Invoice variant as submitted; the LUT reference falls back to config.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvoiceKindRequest {
    /// Export of services under LUT.
    Export {
        /// LUT reference.
        #[serde(default)]
        lut_id: Option<String>,
    },
    /// RCM self-invoice.
    RcmSelfInvoice,
}

/// Request body for previewing, creating or replacing an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRequest {
    /// Invoice number.
    pub invoice_number: String,
    /// Invoice date (defaults to today).
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    /// Variant.
    pub kind: InvoiceKindRequest,
    /// Supplying party.
    pub supplier: Supplier,
    /// Receiving party.
    pub recipient: Recipient,
    /// Currency of the line amounts (defaults to USD).
    #[serde(default)]
    pub currency: Currency,
    /// Local units per unit of `currency`.
    pub fx_rate: Decimal,
    /// Tax policy (defaults per variant).
    #[serde(default)]
    pub tax_policy: Option<TaxPolicy>,
    /// Lines, each with `amount` or `quantity`/`rate`.
    pub items: Vec<LineItemInput>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl InvoiceRequest {
    /// Resolves defaults and line items into an [`Invoice`].
    ///
    /// # Errors
    ///
    /// Returns the first line-item or tax-rate error.
    pub fn into_invoice(
        self,
        defaults: &InvoiceDefaults,
        today: NaiveDate,
    ) -> Result<Invoice, InvoiceError> {
        let kind = match self.kind {
            InvoiceKindRequest::Export { lut_id } => InvoiceKind::Export {
                lut_id: lut_id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| defaults.lut_id.clone()),
            },
            InvoiceKindRequest::RcmSelfInvoice => InvoiceKind::RcmSelfInvoice,
        };

        let tax_policy = match self.tax_policy {
            Some(policy) => {
                policy.validate()?;
                policy
            }
            None => kind.default_tax_policy(defaults.igst_rate)?,
        };

        let items = self
            .items
            .into_iter()
            .map(LineItemInput::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Invoice {
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date.unwrap_or(today),
            kind,
            supplier: self.supplier,
            recipient: self.recipient,
            currency: self.currency,
            fx_rate: self.fx_rate,
            tax_policy,
            items,
            notes: self.notes,
        })
    }
}

/// Saved invoice as returned by the API.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Record identifier.
    pub id: InvoiceId,
    /// The invoice as saved.
    pub invoice: Invoice,
    /// Totals rounded to 2 decimal places.
    pub totals: InvoiceTotals,
    /// Full-precision totals.
    pub exact_totals: InvoiceTotals,
    /// Rounded total in words.
    pub amount_in_words: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceRecord> for InvoiceResponse {
    fn from(record: InvoiceRecord) -> Self {
        Self {
            id: record.id,
            totals: record.totals.rounded(),
            exact_totals: record.totals,
            amount_in_words: record.amount_in_words,
            invoice: record.invoice,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Unwraps a JSON body, turning malformed input into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected request body");
            Err(ApiError::validation(rejection.body_text()))
        }
    }
}

fn parse_id(raw: &str) -> ApiResult<InvoiceId> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid invoice id: {raw}")))
}

/// GET `/invoices` - List the caller's invoices, newest first.
async fn list_invoices(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let records = state.repository.list_for_user(auth.user_id()).await;
    let invoices: Vec<InvoiceResponse> = records.into_iter().map(Into::into).collect();
    Json(invoices)
}

/// POST `/invoices` - Save a new invoice.
async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = json_body(payload)?;
    let invoice = request.into_invoice(&state.defaults, Utc::now().date_naive())?;
    let record = state.repository.create(auth.user_id(), invoice).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(record))))
}

/// GET `/invoices/{id}` - Fetch one of the caller's invoices.
async fn get_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<InvoiceResponse>> {
    let id = parse_id(&id)?;
    let record = state.repository.get(auth.user_id(), id).await?;
    Ok(Json(record.into()))
}

/// PUT `/invoices/{id}` - Replace one of the caller's invoices.
async fn update_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> ApiResult<Json<InvoiceResponse>> {
    let id = parse_id(&id)?;
    let request = json_body(payload)?;
    let invoice = request.into_invoice(&state.defaults, Utc::now().date_naive())?;
    let record = state.repository.update(auth.user_id(), id, invoice).await?;
    Ok(Json(record.into()))
}

/// DELETE `/invoices/{id}` - Delete one of the caller's invoices.
async fn delete_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.repository.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
