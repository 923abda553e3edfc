pub mod cache;
pub mod monitoring;

mod macros;

pub use tracing;
