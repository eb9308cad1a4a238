//! The closed set of HTTP methods the payment API signs.
//!
//! There is deliberately no catch-all variant: a method outside this set is
//! rejected with [`AuthError::InvalidMethod`] instead of being signed with the
//! GET header list.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Header list signed for methods without a body.
const HEADERS_WITHOUT_DIGEST: &str = "host v-c-date request-target v-c-merchant-id";

/// Header list signed for methods with a body.
const HEADERS_WITH_DIGEST: &str = "host v-c-date request-target digest v-c-merchant-id";

/// An HTTP method that can be signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`, signed without a digest line.
    Get,
    /// `POST`, signed with a digest of the body.
    Post,
    /// `PATCH`, signed with a digest of the body.
    Patch,
}

impl HttpMethod {
    /// Lower-case method name as it appears in `request-target`.
    #[must_use]
    pub const fn as_lower(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
        }
    }

    /// Upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_upper(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a body and therefore a digest.
    #[must_use]
    pub const fn has_body(self) -> bool {
        match self {
            Self::Get => false,
            Self::Post | Self::Patch => true,
        }
    }

    /// The space-separated list of headers covered by the signature.
    ///
    /// ```
    /// use paysign_auth::HttpMethod;
    ///
    /// assert_eq!(
    ///     HttpMethod::Get.signed_header_list(),
    ///     "host v-c-date request-target v-c-merchant-id"
    /// );
    /// ```
    #[must_use]
    pub const fn signed_header_list(self) -> &'static str {
        if self.has_body() {
            HEADERS_WITH_DIGEST
        } else {
            HEADERS_WITHOUT_DIGEST
        }
    }
}

impl FromStr for HttpMethod {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("get") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else if s.eq_ignore_ascii_case("patch") {
            Ok(Self::Patch)
        } else {
            Err(AuthError::InvalidMethod(s.to_owned()))
        }
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = AuthError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        match *method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PATCH => Ok(Self::Patch),
            _ => Err(AuthError::InvalidMethod(method.as_str().to_owned())),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}
