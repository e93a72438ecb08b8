//! Engine configuration and governance parameters.
//!
//! [`EngineConfig`] is fixed at deployment and can be loaded from TOML.
//! [`Params`] is owned by governance and read through
//! [`ParamStore`](crate::traits::ParamStore) on every request.

mod engine_config;
mod params;

pub use engine_config::EngineConfig;
pub use params::{DEFAULT_FEE_RATE, Params};
