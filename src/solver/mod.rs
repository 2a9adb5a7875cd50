// src/solver/mod.rs
pub mod integrate;
pub mod neighbors;
pub mod pressure;
pub mod step;
pub mod viscosity;

// Re-export from the solver module
pub use integrate::*;
pub use neighbors::*;
pub use pressure::*;
pub use step::*;
pub use viscosity::*;
