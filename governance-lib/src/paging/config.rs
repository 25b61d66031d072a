//! Paging configuration

use log::debug;

use crate::error::ConfigError;

/// Page size used when a list view does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Largest page a list view may request.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Page size settings shared by list views.
///
/// # Example
///
/// ```
/// use governance_lib::paging::PagingConfig;
///
/// let config = PagingConfig::default()
///     .with_default_page_size(20)
///     .with_max_page_size(50);
///
/// assert_eq!(config.result_limit(0), 20);
/// assert_eq!(config.result_limit(500), 50);
/// assert_eq!(config.result_limit(30), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingConfig {
    /// Rows per page when none is requested.
    ///
    /// Default: 25
    pub default_page_size: usize,

    /// Upper bound on a requested page size.
    ///
    /// Default: 100
    pub max_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PagingConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Checks that both sizes are positive and the default fits the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::DefaultExceedsMax {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }

    /// Brings a requested grid limit into range.
    ///
    /// Anything above the maximum becomes the maximum; zero means "not
    /// specified" and becomes the default.
    pub fn result_limit(&self, requested: usize) -> usize {
        if requested > self.max_page_size {
            debug!(
                "Limit {} exceeds max allowed result size {}",
                requested, self.max_page_size
            );
            self.max_page_size
        } else if requested == 0 {
            debug!("Invalid limit specified, defaulting to {}", self.default_page_size);
            self.default_page_size
        } else {
            requested
        }
    }
}
