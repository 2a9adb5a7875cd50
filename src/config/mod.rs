//! Configuration and parameters
//!
//! Default constants and the immutable simulation parameter bundle.

pub mod constants;
pub mod sim_params;

pub use constants::*;
pub use sim_params::*;
