use anyhow::{Context, Result};
use std::time::Duration;

use crate::models::CheckResult;

/// Sent so that trivially bot-blocked sites still answer the probe.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const ERROR_DETAIL_MAX_CHARS: usize = 100;

pub struct Checker {
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl Checker {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            timeout_seconds,
        })
    }

    /// Performs exactly one GET against the target (redirects followed) and
    /// classifies the outcome. Every failure path terminates in a down
    /// classification; this never returns an error.
    pub async fn check(&self, url: &str) -> CheckResult {
        match self.client.get(url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                if code == 200 {
                    CheckResult {
                        url: url.to_string(),
                        is_up: true,
                        detail: "OK".to_string(),
                        status_code: Some(code),
                    }
                } else {
                    CheckResult {
                        url: url.to_string(),
                        is_up: false,
                        detail: format!("HTTP {}", code),
                        status_code: Some(code),
                    }
                }
            }
            Err(e) => CheckResult {
                url: url.to_string(),
                is_up: false,
                detail: self.classify_error(&e),
                status_code: None,
            },
        }
    }

    // TLS is checked before is_connect() because reqwest reports handshake
    // failures as connect errors too.
    fn classify_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("Timeout after {}s", self.timeout_seconds)
        } else if is_tls_error(err) {
            "SSL error".to_string()
        } else if err.is_connect() {
            "Connection failed".to_string()
        } else {
            format!("Error: {}", truncate(&err.to_string(), ERROR_DETAIL_MAX_CHARS))
        }
    }
}

fn is_tls_error(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        let text = inner.to_string().to_ascii_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            return true;
        }
        source = inner.source();
    }
    false
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_limits_long_error_text() {
        let long = "x".repeat(250);
        assert_eq!(truncate(&long, 100).len(), 100);
    }

    #[test]
    fn truncate_keeps_short_text_intact() {
        assert_eq!(truncate("connection reset", 100), "connection reset");
    }
}
