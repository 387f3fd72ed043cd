//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad de trabajo que transforma su entrada (resuelta por
//! tipo desde la memoria de la corrida) en una salida, o falla. Este módulo
//! define:
//! - `StepDefinition`: interfaz neutral usada por el motor.
//! - `TypedStep`: interfaz de alto nivel con tipos fuertes.
//! - `StepContext` y `StepResult`.
//! - `Pipeline` para composición lineal validada en compilación.

pub mod definition;
pub mod macros; // macro typed_step!
pub mod pipeline;
pub mod typed;

pub use definition::{StepContext, StepDefinition};
pub use pipeline::{Pipeline, SameAs};
pub use typed::{StepResult, TypedStep};
