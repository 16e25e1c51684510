use crate::core::{FormError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Engine and terminal UI configuration
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// How long a success notice stays visible
    pub notice_ttl: Duration,

    /// Poll interval of the terminal UI event loop
    pub tick_rate: Duration,

    /// JSON schema file; the built-in sample forms are used when absent
    pub schema_file: Option<PathBuf>,

    /// Where tracing output goes. No logging when absent.
    pub log_file: Option<PathBuf>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self {
            notice_ttl: Duration::from_secs(3),
            tick_rate: Duration::from_millis(250),
            schema_file: None,
            log_file: None,
        }
    }

    pub fn notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate;
        self
    }

    pub fn schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = Some(path.into());
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.notice_ttl.is_zero() {
            return Err(FormError::Config("notice_ttl must be > 0".to_string()));
        }

        if self.tick_rate.is_zero() {
            return Err(FormError::Config("tick_rate must be > 0".to_string()));
        }

        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new()
    }
}
