use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrewError {
    #[error("missing ingredient: {0}")]
    MissingIngredient(String),
    #[error("jug must be fermented before brewing")]
    NotFermented,
    #[error("jug must be brewed before bottling")]
    NotBrewed,
    #[error("jug is empty")]
    EmptyJug,
    #[error("{0}")]
    Validation(String),
}
