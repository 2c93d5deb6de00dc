//! Data-driven decision parameters and their loaders.
//!
//! Parameters live in a TOML document (see `data/decision.toml`) that maps
//! directly onto [`decision_core::DecisionConfig`]. The behaviors never read
//! files themselves; the composition root loads the document once and hands
//! the parsed config to each behavior's constructor.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, load_or_default};
