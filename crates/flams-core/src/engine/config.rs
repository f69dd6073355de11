use thiserror::Error;

pub const DEFAULT_TOLERANCE: usize = 0;
pub const DEFAULT_EVALUE_THRESHOLD: f64 = 0.01;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Parameters shared by every positional match evaluated in one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// 1-based position of the queried residue in the query sequence.
    pub query_position: usize,
    /// Number of residues the known site may be offset from the queried one.
    pub tolerance: usize,
    /// Segments must have an e-value strictly below this value.
    pub evalue_threshold: f64,
}

#[derive(Default)]
pub struct FilterConfigBuilder {
    query_position: Option<usize>,
    tolerance: Option<usize>,
    evalue_threshold: Option<f64>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_position(mut self, position: usize) -> Self {
        self.query_position = Some(position);
        self
    }
    pub fn tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn evalue_threshold(mut self, threshold: f64) -> Self {
        self.evalue_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        let query_position = self
            .query_position
            .ok_or(ConfigError::MissingParameter("query_position"))?;
        if query_position == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "query_position",
                reason: "positions are 1-based and must be at least 1".to_string(),
            });
        }

        let evalue_threshold = self.evalue_threshold.unwrap_or(DEFAULT_EVALUE_THRESHOLD);
        if !(evalue_threshold.is_finite() && evalue_threshold > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "evalue_threshold",
                reason: format!("must be a positive finite number, got {}", evalue_threshold),
            });
        }

        Ok(FilterConfig {
            query_position,
            tolerance: self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
            evalue_threshold,
        })
    }
}
