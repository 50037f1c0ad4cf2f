//! CAS proxy-ticket validation.
//!
//! The gateway never issues tickets; it forwards each incoming ticket to the
//! CAS server's `proxyValidate` endpoint and parses the assertion out of the
//! XML response. Validation failures are authentication errors; transport
//! failures and unparseable responses are internal errors so a flaky CAS
//! server cannot be mistaken for a bad ticket.

use async_trait::async_trait;
use dirgate_core::{CasAssertion, DirectoryError, ProxyChain, TicketValidator};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

lazy_static! {
    static ref USER_RE: Regex = Regex::new(r"<cas:user>([^<]*)</cas:user>").unwrap();
    static ref PROXY_RE: Regex = Regex::new(r"<cas:proxy>([^<]*)</cas:proxy>").unwrap();
    static ref FAILURE_RE: Regex =
        Regex::new(r#"<cas:authenticationFailure[^>]*code="([^"]*)""#).unwrap();
}

/// Ticket validator backed by a CAS server's `proxyValidate` endpoint.
pub struct CasClient {
    http: reqwest::Client,
    validate_url: String,
    service: String,
}

impl CasClient {
    /// `validate_url` is the full `proxyValidate` URL; `service` is the
    /// service identifier this gateway registered with the CAS server.
    pub fn new(validate_url: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            validate_url: validate_url.into(),
            service: service.into(),
        }
    }
}

#[async_trait]
impl TicketValidator for CasClient {
    async fn validate(&self, ticket: &str) -> Result<CasAssertion, DirectoryError> {
        let response = self
            .http
            .get(&self.validate_url)
            .query(&[("service", self.service.as_str()), ("ticket", ticket)])
            .send()
            .await
            .map_err(|e| {
                DirectoryError::Unclassified(anyhow::anyhow!("CAS server unreachable: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DirectoryError::Unclassified(anyhow::anyhow!("CAS response read failed: {e}"))
        })?;

        if !status.is_success() {
            return Err(DirectoryError::Unclassified(anyhow::anyhow!(
                "CAS server returned {status}"
            )));
        }

        extract_assertion(&body)
    }
}

/// Parse a `proxyValidate` response body into an assertion.
///
/// Proxies appear in the response nearest-first, and that order is kept.
pub fn extract_assertion(body: &str) -> Result<CasAssertion, DirectoryError> {
    if let Some(captures) = FAILURE_RE.captures(body) {
        let code = captures.get(1).map(|m| m.as_str()).unwrap_or("UNKNOWN");
        warn!("[Cas] ticket validation failed: {code}");
        return Err(DirectoryError::AuthenticationFailed(format!(
            "ticket rejected ({code})"
        )));
    }

    let Some(user) = USER_RE.captures(body).and_then(|c| c.get(1)) else {
        return Err(DirectoryError::Unclassified(anyhow::anyhow!(
            "malformed CAS response: no user and no failure element"
        )));
    };

    let proxies: Vec<String> = PROXY_RE
        .captures_iter(body)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    debug!(
        "[Cas] validated {} ({} proxies in chain)",
        user.as_str(),
        proxies.len()
    );

    Ok(CasAssertion {
        principal: user.as_str().trim().to_string(),
        proxies: ProxyChain::new(proxies),
    })
}
