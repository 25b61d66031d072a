//! Paging configuration error types

/// Errors reported by [`PagingConfig::validate`](crate::paging::PagingConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Either the default or the maximum page size is zero.
    #[error("Page sizes must be greater than zero")]
    ZeroPageSize,

    /// The default page size is larger than the allowed maximum.
    #[error("Default page size {default} exceeds maximum {max}")]
    DefaultExceedsMax { default: usize, max: usize },
}
