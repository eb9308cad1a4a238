//! The catalogue of payment API operations.
//!
//! Each operation maps to one HTTP method and one request target. The request
//! target, query string included, is exactly what goes into the
//! `request-target` line of the signature string, so it is built here once and
//! reused both for signing and for the request URI.

use std::fmt::Write as _;

use paysign_auth::HttpMethod;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Base path of the pay-by-link API.
pub const PAYMENT_LINKS_PATH: &str = "/ipl/v2/payment-links";
/// Base path of the invoicing API.
pub const INVOICES_PATH: &str = "/invoicing/v2/invoices";

/// Characters that must be percent-encoded in identifiers and query values.
///
/// Everything except the unreserved characters `A-Z a-z 0-9 - _ . ~`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Pagination and filtering for list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Index of the first record to return.
    pub offset: u32,
    /// Maximum number of records to return.
    pub limit: u32,
    /// Optional status filter; empty strings are dropped.
    pub status: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
            status: None,
        }
    }
}

impl ListParams {
    /// Render the query string, without the leading `?`.
    fn query(&self) -> String {
        let mut query = format!("offset={}&limit={}", self.offset, self.limit);
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(query, "&status={}", encode_component(status));
        }
        query
    }
}

/// A payment API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `POST /ipl/v2/payment-links`
    CreatePaymentLink,
    /// `GET /ipl/v2/payment-links?offset&limit[&status]`
    ListPaymentLinks(ListParams),
    /// `GET /ipl/v2/payment-links/{id}`
    GetPaymentLink {
        /// Payment link id.
        id: String,
    },
    /// `PATCH /ipl/v2/payment-links/{id}`
    UpdatePaymentLink {
        /// Payment link id.
        id: String,
    },
    /// `POST /invoicing/v2/invoices`
    CreateInvoice,
    /// `GET /invoicing/v2/invoices?offset&limit[&status]`
    ListInvoices(ListParams),
    /// `GET /invoicing/v2/invoices/{id}`
    GetInvoice {
        /// Invoice id.
        id: String,
    },
    /// `POST /invoicing/v2/invoices/{id}/delivery`
    SendInvoice {
        /// Invoice id.
        id: String,
    },
    /// `POST /invoicing/v2/invoices/{id}/cancelation`
    CancelInvoice {
        /// Invoice id.
        id: String,
    },
}

impl Operation {
    /// Short, stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePaymentLink => "create_payment_link",
            Self::ListPaymentLinks(_) => "list_payment_links",
            Self::GetPaymentLink { .. } => "get_payment_link",
            Self::UpdatePaymentLink { .. } => "update_payment_link",
            Self::CreateInvoice => "create_invoice",
            Self::ListInvoices(_) => "list_invoices",
            Self::GetInvoice { .. } => "get_invoice",
            Self::SendInvoice { .. } => "send_invoice",
            Self::CancelInvoice { .. } => "cancel_invoice",
        }
    }

    /// The HTTP method of this call.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::ListPaymentLinks(_)
            | Self::GetPaymentLink { .. }
            | Self::ListInvoices(_)
            | Self::GetInvoice { .. } => HttpMethod::Get,
            Self::UpdatePaymentLink { .. } => HttpMethod::Patch,
            Self::CreatePaymentLink
            | Self::CreateInvoice
            | Self::SendInvoice { .. }
            | Self::CancelInvoice { .. } => HttpMethod::Post,
        }
    }

    /// Whether the caller must supply a JSON body.
    ///
    /// Send and cancel are POSTs whose body is empty when none is given.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(
            self,
            Self::CreatePaymentLink | Self::UpdatePaymentLink { .. } | Self::CreateInvoice
        )
    }

    /// The request target: percent-encoded path plus query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use paysign_http::{ListParams, Operation};
    ///
    /// let op = Operation::ListInvoices(ListParams::default());
    /// assert_eq!(op.resource(), "/invoicing/v2/invoices?offset=0&limit=10");
    ///
    /// let op = Operation::GetPaymentLink { id: "a b".to_owned() };
    /// assert_eq!(op.resource(), "/ipl/v2/payment-links/a%20b");
    /// ```
    #[must_use]
    pub fn resource(&self) -> String {
        match self {
            Self::CreatePaymentLink => PAYMENT_LINKS_PATH.to_owned(),
            Self::ListPaymentLinks(params) => format!("{PAYMENT_LINKS_PATH}?{}", params.query()),
            Self::GetPaymentLink { id } | Self::UpdatePaymentLink { id } => {
                format!("{PAYMENT_LINKS_PATH}/{}", encode_component(id))
            }
            Self::CreateInvoice => INVOICES_PATH.to_owned(),
            Self::ListInvoices(params) => format!("{INVOICES_PATH}?{}", params.query()),
            Self::GetInvoice { id } => format!("{INVOICES_PATH}/{}", encode_component(id)),
            Self::SendInvoice { id } => {
                format!("{INVOICES_PATH}/{}/delivery", encode_component(id))
            }
            Self::CancelInvoice { id } => {
                format!("{INVOICES_PATH}/{}/cancelation", encode_component(id))
            }
        }
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}
