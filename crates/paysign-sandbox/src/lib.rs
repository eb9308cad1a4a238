//! Local HTTP sandbox that verifies PaySign request signatures.
//!
//! The sandbox accepts any path. A request whose `signature` header verifies
//! against a configured key is answered `200` with a JSON summary of what was
//! verified; anything else is answered `401` with the reason. It exists to
//! exercise signing clients end to end without touching the real payment API.

pub mod response;
pub mod server;
pub mod service;

pub use response::{CONTENT_TYPE, CORRELATION_ID_HEADER};
pub use server::serve;
pub use service::{HEALTH_PATH, SandboxConfig, SandboxService, process_request};
