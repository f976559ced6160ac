//! Utility modules

pub mod currency;
pub mod dir_source;
pub mod memory_source;
pub mod validation;

pub use currency::*;
pub use dir_source::*;
pub use memory_source::*;
pub use validation::*;
