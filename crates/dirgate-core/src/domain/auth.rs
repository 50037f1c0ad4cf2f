//! Authentication outcome types.
//!
//! A request is authenticated either by CAS ticket validation or by the
//! trusted-internal pre-shared token. The proxy chain returned by ticket
//! validation is created once per request and read-only thereafter.

/// Ordered list of intermediate services a ticket was forwarded through,
/// nearest-proxy-first.
///
/// Only the first (nearest) entry drives authorization; the rest are retained
/// for potential future policy extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyChain(Vec<String>);

impl ProxyChain {
    pub fn new(proxies: Vec<String>) -> Self {
        Self(proxies)
    }

    /// The most recent proxy in the request chain, if any.
    pub fn nearest(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Result of successful CAS ticket validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasAssertion {
    /// The authenticated principal.
    pub principal: String,

    /// Proxy chain from the validation response, nearest-first. Empty for a
    /// direct, non-proxied request.
    pub proxies: ProxyChain,
}

/// How the current request was authenticated.
///
/// `TrustedInternal` is the explicit admin-bypass variant: a pre-shared token
/// presented as a query parameter skips ticket validation entirely. It exists
/// so internal updater scripts can use the directory as a data source; it is
/// an operational escape hatch, not a security boundary, and it never enters
/// the proxy-scoped authorization path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// Authenticated via CAS ticket validation.
    Cas(CasAssertion),
    /// Authenticated via the pre-shared admin token.
    TrustedInternal,
}

impl Authentication {
    /// The nearest proxy in the chain, if this request was proxied.
    pub fn nearest_proxy(&self) -> Option<&str> {
        match self {
            Self::Cas(assertion) => assertion.proxies.nearest(),
            Self::TrustedInternal => None,
        }
    }

    pub fn is_trusted_internal(&self) -> bool {
        matches!(self, Self::TrustedInternal)
    }
}
