//! Errores del core (dos niveles: fallo de un eslabón y fallo del workflow).
//!
//! `ChainError` describe por qué un eslabón concreto dejó la vía de éxito:
//! resolución de memoria, ejecución del step, pánico capturado o
//! cancelación. `WorkflowError` es el error externo que levanta `resolve`
//! cuando la corrida terminó en la vía de fallo; conserva el `ChainError`
//! original como causa para que el llamador pueda inspeccionarlo.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error opaco producido por el cuerpo de un step.
///
/// Envuelve el error original en un `Arc` para que la vía de fallo sea
/// clonable (los registros de la corrida y `resolve` comparten la misma
/// causa). El error original sigue disponible vía [`StepError::downcast_ref`].
#[derive(Debug, Clone)]
pub struct StepError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl StepError {
    /// Envuelve un error concreto.
    pub fn new<E>(err: E) -> Self
        where E: std::error::Error + Send + Sync + 'static
    {
        Self(Arc::new(err))
    }

    /// Error ad-hoc a partir de un mensaje.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(Arc::new(Message(message.into())))
    }

    /// Intenta recuperar el error original con su tipo concreto.
    pub fn downcast_ref<E>(&self) -> Option<&E>
        where E: std::error::Error + 'static
    {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Igual que anyhow: `StepError` NO implementa `Error` para poder ofrecer el
// `From` genérico sin chocar con `impl From<T> for T`.
impl<E> From<E> for StepError where E: std::error::Error + Send + Sync + 'static
{
    fn from(err: E) -> Self {
        Self::new(err)
    }
}

/// Error interno para `StepError::msg`.
#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Message {}

/// Motivos por los que una corrida cambia a la vía de fallo.
///
/// Nunca se lanza desde `chain`: se captura en el estado de la corrida y
/// resurge al llamar `resolve`.
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("no value of type `{expected}` tracked in memory (step `{step}`)")]
    Resolution { step: String, expected: &'static str },
    #[error("ambiguous resolution of `{expected}` (step `{step}`): {candidates} entries match under strict policy")]
    Ambiguous { step: String, expected: &'static str, candidates: usize },
    #[error("step `{step}` declares the tuple slot type `{duplicated}` more than once")]
    DuplicateTupleSlot { step: String, duplicated: &'static str },
    #[error("step `{step}` failed: {error}")]
    StepExecution { step: String, error: StepError },
    #[error("step `{step}` panicked: {message}")]
    StepPanic { step: String, message: String },
    #[error("run cancelled before step `{step}` completed")]
    Cancelled { step: String },
}

impl ChainError {
    /// Nombre del step que provocó el fallo.
    pub fn step(&self) -> &str {
        match self {
            ChainError::Resolution { step, .. }
            | ChainError::Ambiguous { step, .. }
            | ChainError::DuplicateTupleSlot { step, .. }
            | ChainError::StepExecution { step, .. }
            | ChainError::StepPanic { step, .. }
            | ChainError::Cancelled { step } => step,
        }
    }

    /// True si el fallo proviene de una cancelación.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ChainError::Cancelled { .. })
    }
}

/// Error externo de un workflow, levantado únicamente por `resolve`.
#[derive(Debug, Clone)]
pub struct WorkflowError {
    /// Nombre declarado del workflow.
    pub workflow: String,
    /// Step donde se abandonó la vía de éxito, si se conoce.
    pub step: Option<String>,
    /// Causa original capturada durante el encadenamiento.
    pub cause: ChainError,
}

impl WorkflowError {
    pub(crate) fn new(workflow: impl Into<String>, step: Option<String>, cause: ChainError) -> Self {
        Self { workflow: workflow.into(),
               step,
               cause }
    }

    /// Error del cuerpo del step, si el fallo fue de ejecución.
    pub fn step_error(&self) -> Option<&StepError> {
        match &self.cause {
            ChainError::StepExecution { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Atajo: recupera el error de dominio original con su tipo concreto.
    pub fn downcast_step<E>(&self) -> Option<&E>
        where E: std::error::Error + 'static
    {
        self.step_error().and_then(|e| e.downcast_ref::<E>())
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.step {
            Some(step) => write!(f, "workflow `{}` failed at step `{}`: {}", self.workflow, step, self.cause),
            None => write!(f, "workflow `{}` failed: {}", self.workflow, self.cause),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("tank is empty")]
    struct EmptyTank;

    #[test]
    fn step_error_preserves_original_type() {
        let err = StepError::new(EmptyTank);
        assert!(err.downcast_ref::<EmptyTank>().is_some());
        assert_eq!(err.to_string(), "tank is empty");
    }

    #[test]
    fn workflow_error_exposes_cause_chain() {
        let cause = ChainError::StepExecution { step: "brew".into(),
                                                error: StepError::new(EmptyTank) };
        let err = WorkflowError::new("cider", Some("brew".into()), cause);
        assert!(err.to_string().contains("failed at step `brew`"));
        assert!(err.downcast_step::<EmptyTank>().is_some());
    }

    #[test]
    fn chain_error_reports_failing_step() {
        let err = ChainError::Cancelled { step: "ferment".into() };
        assert_eq!(err.step(), "ferment");
        assert!(err.is_cancellation());
    }
}
