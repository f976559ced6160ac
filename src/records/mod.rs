//! Record aggregation and integrity checking

pub mod aggregator;
pub mod integrity;

pub use aggregator::*;
pub use integrity::*;
