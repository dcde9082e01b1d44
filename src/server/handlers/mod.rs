//! HTTP handlers.

mod checkspeed;
mod index;
mod metrics;

pub use checkspeed::checkspeed_handler;
pub use index::index_handler;
pub use metrics::metrics_handler;
