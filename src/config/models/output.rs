//! Output configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where results are written and which day the overview covers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// `YYYY-MM-DD`; yesterday (UTC) when unset
    #[serde(default)]
    pub overview_day: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            overview_day: None,
        }
    }
}

impl OutputConfig {
    /// The configured overview day, or yesterday in UTC
    pub fn overview_day_or_yesterday(&self) -> String {
        self.overview_day.clone().unwrap_or_else(|| {
            (chrono::Utc::now().date_naive() - chrono::Days::new(1))
                .format("%Y-%m-%d")
                .to_string()
        })
    }
}
