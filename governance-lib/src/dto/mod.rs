//! Detached child view objects and the parent edit-copy protocol.
//!
//! - [`Uid`] - per-instance identity carried across clones
//! - [`BaseDto`] - capabilities a child must expose
//! - [`ParentDto`] - ordered children plus a single detached edit copy

mod base;
mod parent;

pub use base::BaseDto;
pub use base::Uid;
pub use parent::EditState;
pub use parent::ParentDto;
