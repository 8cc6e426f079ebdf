use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::checker::Checker;
use crate::config::MonitorConfig;
use crate::models::{CheckResult, StatusMap};
use crate::notify::{format_status_message, format_summary_message, Notifier};
use crate::state::{load_state, save_state};

/// Pause between consecutive Telegram sends so a burst of changes does not
/// trip the API's rate limit.
const SEND_DELAY: Duration = Duration::from_secs(1);

pub struct Monitor {
    config: MonitorConfig,
    checker: Checker,
    notifier: Notifier,
    state_path: PathBuf,
    send_delay: Duration,
}

impl Monitor {
    pub fn new(config: MonitorConfig, state_path: PathBuf) -> Result<Self> {
        let checker = Checker::new(config.settings.timeout_seconds)?;
        let notifier = Notifier::new(config.telegram.clone())?;
        Ok(Self {
            config,
            checker,
            notifier,
            state_path,
            send_delay: SEND_DELAY,
        })
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    pub fn with_telegram_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.notifier = self.notifier.with_api_base(api_base);
        self
    }

    /// One full pass: load previous state, check every target in order,
    /// notify on each change, send the aggregate summary if anything
    /// changed, then unconditionally persist the new state. Failures inside
    /// any stage are logged and absorbed; this never returns early.
    pub async fn run_once(&self) {
        info!("Starting website monitoring check");

        let previous_state = load_state(&self.state_path);
        let mut current_state = StatusMap::new();
        let mut status_changed: Vec<CheckResult> = Vec::new();

        for website in &self.config.websites {
            info!("Checking {}", website);
            let result = self.checker.check(website).await;
            current_state.insert(website.clone(), result.is_up);

            // A target never seen before is assumed to have been up, so a
            // first-ever down reading still alerts.
            let was_up = previous_state.get(website).copied().unwrap_or(true);

            if result.is_up != was_up {
                warn!(
                    "Status change detected for {}: {}",
                    website,
                    if result.is_up { "UP" } else { "DOWN" }
                );
                status_changed.push(result.clone());
            }

            info!(
                "{}: {} - {}",
                website,
                if result.is_up { "UP" } else { "DOWN" },
                result.detail
            );
        }

        if !status_changed.is_empty() {
            for change in &status_changed {
                let message = format_status_message(change);
                self.notifier.send(&message).await;
                tokio::time::sleep(self.send_delay).await;
            }

            let summary = format_summary_message(&self.config.websites, &current_state);
            self.notifier.send(&summary).await;
        }

        save_state(&self.state_path, &current_state);
        info!(
            "Check completed. {} status changes detected.",
            status_changed.len()
        );
    }
}
