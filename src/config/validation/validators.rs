//! Validators for the pipeline configuration

use super::trait_def::Validate;
use crate::config::models::*;
use reqwest::Url;
use std::collections::HashSet;
use tracing::{debug, warn};

fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(url_str)
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "{} must use http:// or https:// scheme, got: {}",
            context, scheme
        )),
    }
}

impl Validate for FeedConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating feed configuration");

        if self.feed_id.trim().is_empty() {
            return Err("feed_id cannot be empty".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }

        if self.max_concurrent == 0 {
            return Err("max_concurrent must be greater than 0".to_string());
        }

        if self.rss_urls.is_empty() {
            warn!(feed_id = %self.feed_id, "No feed URLs configured");
        }
        for url in &self.rss_urls {
            validate_http_url(url, "Feed URL")?;
        }

        let mut bot_ids = HashSet::new();
        for bot in &self.ai_bots {
            if bot.bot_id.trim().is_empty() {
                return Err("bot_id cannot be empty".to_string());
            }
            if !bot_ids.insert(&bot.bot_id) {
                return Err(format!("Duplicate bot_id: {}", bot.bot_id));
            }
            if bot.prompt.trim().is_empty() {
                return Err(format!("Bot {} has an empty prompt", bot.bot_id));
            }
        }

        if let Some(gate) = &self.gate {
            gate.validate()?;
        }

        Ok(())
    }
}

impl Validate for AiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("AI_ENDPOINT is not set".to_string());
        }
        validate_http_url(&self.endpoint, "AI endpoint")?;

        if self.api_key.is_empty() {
            return Err("AI_API_KEY is not set".to_string());
        }

        if self.model.is_empty() {
            return Err("AI_MODEL is not set".to_string());
        }

        Ok(())
    }
}

impl Validate for GateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be greater than 0".to_string());
        }

        if self.rate_ceiling == 0 {
            return Err("rate_ceiling must be greater than 0".to_string());
        }

        if self.window_ms == 0 {
            return Err("window_ms must be greater than 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }

        if let Some(day) = &self.overview_day {
            chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|e| format!("Invalid overview day '{}': {}", day, e))?;
        }

        Ok(())
    }
}
