//! List paging and child-editing view models
//!
//! The reusable core of a governance console's presentation tier: pagers that
//! turn an offset and page size into navigation over an externally counted
//! result set, and parent objects that edit children through detached copies.

pub mod dto;
pub mod error;
pub mod paging;
pub mod session;
