//! Interfaz de alto nivel para definir steps con tipos fuertes
//! (Input / Output).
//!
//! Implementadores escriben `run` con tipos concretos; el adaptador blanket
//! de abajo convierte esa ejecución a la interfaz neutra [`StepDefinition`]:
//! resuelve la entrada desde la memoria, invoca el cuerpo y rastrea la
//! salida bajo su tipo concreto.

use async_trait::async_trait;

use super::definition::{StepContext, StepDefinition};
use crate::chain::{ChainValue, StepInput};
use crate::errors::{ChainError, StepError};
use crate::memory::MemoryStore;

/// Resultado del cuerpo de un step tipado.
///
/// `Err` expresa un fallo deliberado del dominio; viaja por la vía de fallo
/// sin perder el tipo original (ver [`StepError`]).
pub type StepResult<T> = Result<T, StepError>;

/// Step con entrada y salida tipadas.
///
/// La entrada es una tupla a nivel de trait (una entrada simple es
/// `(Jug,)`); el macro `typed_step!` genera la forma ergonómica.
#[async_trait]
pub trait TypedStep: Send + Sync + std::fmt::Debug {
    /// Forma de entrada: `()` o tupla de tipos resolubles desde memoria.
    type Input: StepInput;
    /// Tipo concreto producido como salida.
    type Output: ChainValue;

    /// Identificador estable del step dentro del workflow.
    fn name(&self) -> &'static str;

    /// Ejecución tipada.
    async fn run(&self, input: Self::Input, ctx: &StepContext) -> StepResult<Self::Output>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStep` implementa `StepDefinition` neutro.
// -------------------------------------------------------------
#[async_trait]
impl<T> StepDefinition for T where T: TypedStep
{
    fn name(&self) -> &str {
        TypedStep::name(self)
    }

    async fn run(&self, memory: &mut MemoryStore, ctx: &StepContext) -> Result<(), ChainError> {
        let step_name = TypedStep::name(self);
        log::debug!("step:resolve step={step_name} expects={:?}", <T::Input as StepInput>::labels());
        let input = <T::Input as StepInput>::resolve(memory, step_name)?;
        match TypedStep::run(self, input, ctx).await {
            Ok(output) => {
                memory.track(output);
                Ok(())
            }
            Err(error) => Err(ChainError::StepExecution { step: step_name.to_string(),
                                                          error }),
        }
    }
}
