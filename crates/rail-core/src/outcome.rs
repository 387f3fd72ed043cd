//! Valor de dos vías (éxito o fallo) que produce una corrida.
//!
//! Deliberadamente mínimo: predicados y conversiones, sin combinadores
//! `map`/`bind`. La composición vive en el encadenamiento del workflow,
//! no en este tipo.

use crate::errors::WorkflowError;

/// Resultado final de una corrida: valor tipado o fallo acumulado.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success(T),
    Failure(WorkflowError),
}

impl<T> Outcome<T> {
    /// True si la corrida terminó en la vía de éxito.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// True si la corrida terminó en la vía de fallo.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Valor de éxito, si lo hay.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    /// Fallo acumulado, si lo hay.
    pub fn failure(self) -> Option<WorkflowError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    /// Conversión a `Result` estándar.
    pub fn into_result(self) -> Result<T, WorkflowError> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, WorkflowError>> for Outcome<T> {
    fn from(res: Result<T, WorkflowError>) -> Self {
        match res {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}
