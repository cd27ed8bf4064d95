use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("detection band margins must lie in [0, 1) and leave a band (top {top}, bottom {bottom})")]
    InvalidBand { top: f64, bottom: f64 },
    #[error("mobile breakpoint must be positive, got {0}")]
    InvalidBreakpoint(f64),
    #[error("class name for {0} must not be empty")]
    EmptyClass(&'static str),
}

/// Selectors and tuning constants for the TOC controller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TocConfig {
    pub container_class: String,
    pub title_class: String,
    /// `#id` or `.class` (a bare name is read as a class) of the entry list.
    pub list_selector: String,
    /// Class marking TOC links; empty accepts every link in the list.
    pub link_class: String,
    pub text_class: String,
    /// Class put on the container while collapsed.
    pub collapsed_class: String,

    /// Clearance left above a heading after smooth navigation.
    pub header_offset: f64,
    /// Viewport widths at or below this hide the floating toggle button.
    pub mobile_breakpoint: f64,
    /// Fractions of the viewport height trimmed off the detection band.
    pub band_top_margin: f64,
    pub band_bottom_margin: f64,

    pub hint_duration_ms: u64,
    pub first_visit_delay_ms: u64,
    pub first_visit_hint_duration_ms: u64,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            container_class: "toc-article".to_string(),
            title_class: "toc-title".to_string(),
            list_selector: "#toc".to_string(),
            link_class: "toc-link".to_string(),
            text_class: "toc-text".to_string(),
            collapsed_class: "toc-collapsed".to_string(),
            header_offset: 80.0,
            mobile_breakpoint: 768.0,
            band_top_margin: 0.2,
            band_bottom_margin: 0.7,
            hint_duration_ms: 3000,
            first_visit_delay_ms: 2000,
            first_visit_hint_duration_ms: 3000,
        }
    }
}

impl TocConfig {
    pub fn load_or_default(file_path: Option<&str>) -> Self {
        match file_path {
            Some(path) => Self::load_from_file(path).unwrap_or_else(|e| {
                log::error!("Failed to load config from {path}: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let top = self.band_top_margin;
        let bottom = self.band_bottom_margin;
        let in_range = |m: f64| (0.0..1.0).contains(&m);
        if !in_range(top) || !in_range(bottom) || top + bottom >= 1.0 {
            return Err(ConfigError::InvalidBand { top, bottom });
        }
        if self.mobile_breakpoint <= 0.0 {
            return Err(ConfigError::InvalidBreakpoint(self.mobile_breakpoint));
        }
        if self.collapsed_class.trim().is_empty() {
            return Err(ConfigError::EmptyClass("collapsed_class"));
        }
        Ok(())
    }

    pub fn hint_duration(&self) -> Duration {
        Duration::from_millis(self.hint_duration_ms)
    }

    pub fn first_visit_delay(&self) -> Duration {
        Duration::from_millis(self.first_visit_delay_ms)
    }

    pub fn first_visit_hint_duration(&self) -> Duration {
        Duration::from_millis(self.first_visit_hint_duration_ms)
    }
}
