pub mod allocator;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod exclusion;
pub mod scope;
pub mod strategy;

pub use allocator::{allocate, Allocator};
pub use corpus::Corpus;
pub use errors::AnonError;
pub use exclusion::ExclusionSet;
pub use scope::Scope;
pub use strategy::Density;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
