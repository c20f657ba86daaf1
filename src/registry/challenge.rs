//! CAPTCHA detection and operator hand-off
//!
//! The registry occasionally serves a challenge page instead of results.
//! Scraping pauses until a human has solved it in the open browser window.

use crate::ScoutError;
use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Returns the first challenge phrase present in `html`, case-insensitively
pub fn detect_challenge<'a>(html: &str, phrases: &'a [String]) -> Option<&'a str> {
    let lowered = html.to_lowercase();
    phrases
        .iter()
        .map(|phrase| phrase.trim())
        .filter(|phrase| !phrase.is_empty())
        .find(|phrase| lowered.contains(&phrase.to_lowercase()))
}

/// Blocks scraping until a challenge has been dealt with
#[async_trait]
pub trait ChallengeHandler: Send + Sync {
    /// Waits for the operator; an error abandons the run
    async fn wait_for_resolution(&self, context: &str) -> Result<(), ScoutError>;
}

/// Asks on the terminal whether the challenge has been solved
pub struct ConsolePrompt;

#[async_trait]
impl ChallengeHandler for ConsolePrompt {
    async fn wait_for_resolution(&self, context: &str) -> Result<(), ScoutError> {
        tracing::warn!("CAPTCHA detected on {}", context);
        let prompt = format!(
            "CAPTCHA detected on {}. Solve it in the browser window, then continue?",
            context
        );

        let proceed = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(true)
                .interact()
        })
        .await
        .map_err(|e| ScoutError::Prompt(e.to_string()))?
        .map_err(|e| ScoutError::Prompt(e.to_string()))?;

        if proceed {
            tracing::info!("Resuming after CAPTCHA on {}", context);
            Ok(())
        } else {
            Err(ScoutError::Prompt("operator declined to continue".to_string()))
        }
    }
}
