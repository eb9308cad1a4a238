//! Signed payment API requests for PaySign.
//!
//! [`Operation`] names each supported call and knows its method and request
//! target. [`build_signed_request`] turns an operation and an optional JSON
//! body into an `http::Request` carrying every signed header, and
//! [`ApiClient`] sends such requests with `reqwest`.
//!
//! # Usage
//!
//! ```no_run
//! use paysign_core::PaySignConfig;
//! use paysign_http::{ApiClient, ListParams};
//!
//! # tokio_test::block_on(async {
//! let config = PaySignConfig::from_env().unwrap();
//! let client = ApiClient::from_config(&config).unwrap();
//! let response = client.list_payment_links(ListParams::default()).await.unwrap();
//! println!("{} {}", response.status, response.body);
//! # });
//! ```

pub mod client;
pub mod error;
pub mod operation;
pub mod request;

pub use client::{ApiClient, ApiResponse, REQUEST_TIMEOUT};
pub use error::HttpError;
pub use operation::{INVOICES_PATH, ListParams, Operation, PAYMENT_LINKS_PATH};
pub use request::build_signed_request;
