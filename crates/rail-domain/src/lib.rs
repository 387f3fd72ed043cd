// rail-domain library entry point
pub mod bottle;
pub mod error;
pub mod ingredients;
pub mod jug;
pub mod recipe;
pub use bottle::Bottle;
pub use error::BrewError;
pub use ingredients::Ingredients;
pub use jug::Jug;
pub use recipe::Recipe;
