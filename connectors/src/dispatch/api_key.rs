use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use super::error::DispatchError;

/// Where an API key is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiKeyPlacement {
    #[serde(rename = "Query Parameter")]
    QueryParameter,
    #[serde(rename = "Header")]
    Header,
    #[serde(rename = "Body data (urlencoded form)")]
    FormBody,
    #[serde(rename = "Body JSON payload")]
    JsonBody,
}

impl ApiKeyPlacement {
    pub const ALL: [ApiKeyPlacement; 4] = [
        ApiKeyPlacement::QueryParameter,
        ApiKeyPlacement::Header,
        ApiKeyPlacement::FormBody,
        ApiKeyPlacement::JsonBody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyPlacement::QueryParameter => "Query Parameter",
            ApiKeyPlacement::Header => "Header",
            ApiKeyPlacement::FormBody => "Body data (urlencoded form)",
            ApiKeyPlacement::JsonBody => "Body JSON payload",
        }
    }

    /// Body placements are sent as POST, everything else as GET.
    pub fn uses_body(&self) -> bool {
        matches!(self, ApiKeyPlacement::FormBody | ApiKeyPlacement::JsonBody)
    }
}

impl fmt::Display for ApiKeyPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiKeyPlacement {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|placement| placement.as_str() == s)
            .ok_or_else(|| DispatchError::UnsupportedInjectionMethod(s.to_string()))
    }
}

/// Append `name=value` (form-urlencoded) to the query of `url`.
///
/// The existing query is kept byte-for-byte and joined with `&`; scheme,
/// userinfo, host, port, path and fragment are untouched.
pub fn append_query_pair(url: &mut Url, name: &str, value: &str) {
    url.query_pairs_mut().append_pair(name, value);
}
