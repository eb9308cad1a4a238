//! The payment API client.

use std::time::Duration;

use paysign_auth::Credentials;
use paysign_core::PaySignConfig;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::HttpError;
use crate::operation::{ListParams, Operation};
use crate::request::build_signed_request;

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Status and decoded JSON body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body; `Value::Null` when the body is empty.
    pub body: Value,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends signed requests to the payment API.
///
/// Credentials are resolved once when the client is built; every call signs
/// with the same immutable [`Credentials`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl ApiClient {
    /// Create a client that sends requests to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            credentials,
            base_url: base_url.into(),
        })
    }

    /// Create a client from process configuration, targeting
    /// `https://<request host>`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (see [`HttpError::is_configuration`]) if
    /// a credential is missing or malformed. No network I/O happens first.
    pub fn from_config(config: &PaySignConfig) -> Result<Self, HttpError> {
        let credentials = Credentials::from_config(config)?;
        let base_url = format!("https://{}", credentials.request_host());
        Self::new(credentials, base_url)
    }

    /// The credentials requests are signed with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign and send an operation.
    ///
    /// Non-2xx responses are returned as an [`ApiResponse`], not an error.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if signing fails, the request cannot be sent,
    /// or a non-empty response body is not JSON.
    pub async fn execute(
        &self,
        operation: &Operation,
        body: Option<&Value>,
    ) -> Result<ApiResponse, HttpError> {
        let request = build_signed_request(&self.credentials, &self.base_url, operation, body)?;
        let request = reqwest::Request::try_from(request)?;

        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(HttpError::Decode)?
        };

        if (200..300).contains(&status) {
            debug!(operation = operation.name(), status, "Request succeeded");
        } else {
            warn!(operation = operation.name(), status, "Request rejected");
        }

        Ok(ApiResponse { status, body })
    }

    /// Create a payment link.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn create_payment_link(&self, body: &Value) -> Result<ApiResponse, HttpError> {
        self.execute(&Operation::CreatePaymentLink, Some(body)).await
    }

    /// List payment links.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_payment_links(&self, params: ListParams) -> Result<ApiResponse, HttpError> {
        self.execute(&Operation::ListPaymentLinks(params), None).await
    }

    /// Retrieve a payment link.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get_payment_link(&self, id: &str) -> Result<ApiResponse, HttpError> {
        let op = Operation::GetPaymentLink { id: id.to_owned() };
        self.execute(&op, None).await
    }

    /// Update a payment link.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn update_payment_link(
        &self,
        id: &str,
        body: &Value,
    ) -> Result<ApiResponse, HttpError> {
        let op = Operation::UpdatePaymentLink { id: id.to_owned() };
        self.execute(&op, Some(body)).await
    }

    /// Create an invoice.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn create_invoice(&self, body: &Value) -> Result<ApiResponse, HttpError> {
        self.execute(&Operation::CreateInvoice, Some(body)).await
    }

    /// List invoices.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn list_invoices(&self, params: ListParams) -> Result<ApiResponse, HttpError> {
        self.execute(&Operation::ListInvoices(params), None).await
    }

    /// Retrieve an invoice.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get_invoice(&self, id: &str) -> Result<ApiResponse, HttpError> {
        let op = Operation::GetInvoice { id: id.to_owned() };
        self.execute(&op, None).await
    }

    /// Send an invoice to the customer.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn send_invoice(&self, id: &str) -> Result<ApiResponse, HttpError> {
        let op = Operation::SendInvoice { id: id.to_owned() };
        self.execute(&op, None).await
    }

    /// Cancel an invoice.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn cancel_invoice(&self, id: &str) -> Result<ApiResponse, HttpError> {
        let op = Operation::CancelInvoice { id: id.to_owned() };
        self.execute(&op, None).await
    }
}
