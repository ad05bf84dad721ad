//! Common types shared by the trade aggregation workspace

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod market;
pub mod types;

pub use market::*;
pub use types::*;
