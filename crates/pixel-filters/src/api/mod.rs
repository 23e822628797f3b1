//! Public API: the [`Filter`] facade and [`FilterError`].

mod error;
mod filter;

pub use error::FilterError;
pub use filter::Filter;
