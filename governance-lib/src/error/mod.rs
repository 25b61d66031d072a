//! Error types

mod config;
mod paging;
mod session;
mod source;

pub use config::*;
pub use paging::*;
pub use session::*;
pub use source::*;
