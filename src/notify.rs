use anyhow::{Context, Result};
use chrono::Local;
use std::time::Duration;
use tracing::{error, info};

use crate::config::TelegramConfig;
use crate::models::{CheckResult, StatusMap};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Notification sink backed by the Telegram Bot API.
pub struct Notifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl Notifier {
    pub fn new(telegram: TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Failed to create Telegram client")?;
        Ok(Self {
            client,
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: telegram.bot_token,
            chat_id: telegram.chat_id,
        })
    }

    /// Points the sink at a different API host. Used to exercise the sink
    /// against a local server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Posts one pre-formatted HTML message. Returns whether the send
    /// succeeded; failures are logged, never raised, never retried.
    pub async fn send(&self, text: &str) -> bool {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Telegram message sent successfully");
                true
            }
            Ok(response) => {
                let status = response.status();
                let detail = response.text().await.unwrap_or_default();
                error!("Failed to send Telegram message: {} - {}", status, detail);
                false
            }
            Err(e) => {
                error!("Error sending Telegram message: {}", e);
                false
            }
        }
    }
}

/// Per-site change message: icon, bold URL, bold UP/DOWN line, the status
/// code (up) or error detail (down), and a local timestamp.
pub fn format_status_message(result: &CheckResult) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let (emoji, status, details) = if result.is_up {
        (
            "\u{2705}",
            "UP",
            format!(
                "Status code: {}",
                result.status_code.map_or_else(String::new, |c| c.to_string())
            ),
        )
    } else {
        ("\u{1F534}", "DOWN", format!("Error: {}", result.detail))
    };

    format!(
        "{emoji} <b>{url}</b>\nStatus: <b>{status}</b>\n{details}\nTime: {timestamp}",
        url = result.url,
    )
}

/// Aggregate message listing every currently-up and currently-down target in
/// configured order. Sections are omitted when empty.
pub fn format_summary_message(websites: &[String], state: &StatusMap) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut message = String::from("\u{1F4CA} <b>Current Status Summary</b>\n\n");

    let up_sites: Vec<&String> = websites
        .iter()
        .filter(|url| state.get(*url).copied().unwrap_or(false))
        .collect();
    let down_sites: Vec<&String> = websites
        .iter()
        .filter(|url| !state.get(*url).copied().unwrap_or(false))
        .collect();

    if !up_sites.is_empty() {
        message.push_str("\u{2705} <b>UP:</b>\n");
        for site in up_sites {
            message.push_str(&format!("  \u{2022} {}\n", site));
        }
        message.push('\n');
    }

    if !down_sites.is_empty() {
        message.push_str("\u{1F534} <b>DOWN:</b>\n");
        for site in down_sites {
            message.push_str(&format!("  \u{2022} {}\n", site));
        }
        message.push('\n');
    }

    message.push_str(&format!("Time: {}", timestamp));
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up_result() -> CheckResult {
        CheckResult {
            url: "https://a.test".to_string(),
            is_up: true,
            detail: "OK".to_string(),
            status_code: Some(200),
        }
    }

    #[test]
    fn up_message_carries_status_code() {
        let message = format_status_message(&up_result());
        assert!(message.contains("<b>https://a.test</b>"));
        assert!(message.contains("Status: <b>UP</b>"));
        assert!(message.contains("Status code: 200"));
        assert!(message.contains("Time: "));
    }

    #[test]
    fn down_message_carries_error_detail() {
        let result = CheckResult {
            url: "https://a.test".to_string(),
            is_up: false,
            detail: "HTTP 500".to_string(),
            status_code: Some(500),
        };
        let message = format_status_message(&result);
        assert!(message.contains("Status: <b>DOWN</b>"));
        assert!(message.contains("Error: HTTP 500"));
        assert!(!message.contains("Status code:"));
    }

    #[test]
    fn summary_lists_sites_in_configured_order() {
        let websites = vec![
            "https://a.test".to_string(),
            "https://b.test".to_string(),
            "https://c.test".to_string(),
        ];
        let mut state = StatusMap::new();
        state.insert("https://a.test".to_string(), true);
        state.insert("https://b.test".to_string(), false);
        state.insert("https://c.test".to_string(), true);

        let message = format_summary_message(&websites, &state);
        assert!(message.contains("<b>UP:</b>"));
        assert!(message.contains("<b>DOWN:</b>"));
        assert!(message.contains("  \u{2022} https://b.test"));

        let a = message.find("https://a.test").unwrap();
        let c = message.find("https://c.test").unwrap();
        assert!(a < c);
    }

    #[test]
    fn summary_omits_empty_down_section() {
        let websites = vec!["https://a.test".to_string()];
        let mut state = StatusMap::new();
        state.insert("https://a.test".to_string(), true);

        let message = format_summary_message(&websites, &state);
        assert!(message.contains("<b>UP:</b>"));
        assert!(!message.contains("<b>DOWN:</b>"));
    }
}
