//! HTTP signature request signing and verification for PaySign.
//!
//! Every call to the payment API carries a `signature` header computed with
//! HMAC-SHA256 over a canonical "signature string" built from selected request
//! metadata. This crate implements both sides of that scheme: the signing side
//! used by outbound API clients, and the verification side used by the local
//! sandbox.
//!
//! # Overview
//!
//! The canonical signature string is a newline-joined list of lines in a
//! fixed order:
//!
//! ```text
//! host: apitest.cybersource.com
//! v-c-date: Wed, 01 Jan 2025 00:00:00 GMT
//! request-target: post /ipl/v2/payment-links
//! digest: SHA-256=<base64(sha256(body))>      (POST and PATCH only)
//! v-c-merchant-id: visa_acceptance_llm_01
//! ```
//!
//! The HMAC of that string, keyed by the base64-decoded shared secret, is
//! transmitted as:
//!
//! ```text
//! keyid="<key id>", algorithm="HmacSHA256", headers="host v-c-date request-target digest v-c-merchant-id", signature="<base64 hmac>"
//! ```
//!
//! # Usage
//!
//! ```rust
//! use paysign_auth::{Credentials, HttpMethod, SecretKey, compute_auth_signature};
//!
//! let credentials = Credentials::new(
//!     "9809ebfb-e5ce-43af-8f2d-90f65770c4bc",
//!     SecretKey::from_base64("K3UY4P0qRlca7fdjzRmVl0yBSefaXZ8OcDhMag9WDtk=").unwrap(),
//!     "visa_acceptance_llm_01",
//!     "apitest.cybersource.com",
//! )
//! .unwrap();
//!
//! let body: &[u8] = br#"{"processingInformation":{"linkType":"PURCHASE"}}"#;
//! let headers =
//!     compute_auth_signature(&credentials, HttpMethod::Post, "/ipl/v2/payment-links", Some(body))
//!         .unwrap();
//! assert!(headers.digest.is_some());
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical signature string construction
//! - [`credentials`] - Signing credentials and the verification key store
//! - [`digest`] - SHA-256 body digests
//! - [`error`] - Authentication error types
//! - [`method`] - The closed set of signable HTTP methods
//! - [`sign`] - Signing orchestration and the headers it produces
//! - [`signer`] - HMAC signing and `signature` header assembly
//! - [`verify`] - Inbound signature verification

pub mod canonical;
pub mod credentials;
pub mod digest;
pub mod error;
pub mod method;
pub mod sign;
pub mod signer;
pub mod verify;

pub use credentials::{
    CredentialOverrides, CredentialProvider, Credentials, SecretKey, StaticCredentialProvider,
};
pub use digest::{EMPTY_BODY_DIGEST, compute_digest, digest_header_value};
pub use error::AuthError;
pub use method::HttpMethod;
pub use sign::{SignedHeaders, compute_auth_signature, compute_auth_signature_at, http_date};
pub use signer::{SIGNATURE_ALGORITHM, assemble_signature_header, sign, sign_with_key};
pub use verify::{VerifiedRequest, parse_signature_header, verify_request};
