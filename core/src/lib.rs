pub mod analyzer;
pub mod config;
pub mod highlight;
pub mod masking;

pub mod error;
