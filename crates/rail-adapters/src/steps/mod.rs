//! Steps concretos del proceso de sidra.

pub mod bottle;
pub mod brew;
pub mod ferment;
pub mod prepare;

pub use bottle::BottleStep;
pub use brew::BrewStep;
pub use ferment::{CellarFermenter, FermentService, FermentStep};
pub use prepare::PrepareStep;
