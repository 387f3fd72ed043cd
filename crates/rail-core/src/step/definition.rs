//! Interfaz neutral de un step y su contexto de ejecución.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::ChainError;
use crate::memory::MemoryStore;

/// Contexto entregado a cada step durante una corrida.
///
/// El token de cancelación es compartido por toda la corrida: el motor lo
/// consulta en cada frontera de step y los cuerpos largos pueden
/// consultarlo a mitad de trabajo.
#[derive(Debug, Clone)]
pub struct StepContext {
    run_id: Uuid,
    workflow: Arc<str>,
    cancel: CancellationToken,
}

impl StepContext {
    pub(crate) fn new(workflow: Arc<str>, cancel: CancellationToken) -> Self {
        Self { run_id: Uuid::new_v4(),
               workflow,
               cancel }
    }

    /// Contexto suelto para ejecutar un step fuera de una corrida (tests).
    pub fn detached(workflow: &str) -> Self {
        Self::new(Arc::from(workflow), CancellationToken::new())
    }

    /// Identificador de la corrida.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Nombre del workflow dueño de la corrida.
    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    /// Token de cancelación de la corrida.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// True si la corrida fue cancelada.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Trait neutral que ejecuta el motor. Las implementaciones llegan vía el
/// adaptador blanket de [`TypedStep`](crate::step::TypedStep); el blanket
/// cubre todo `TypedStep`, así que los steps se definen siempre en la capa
/// tipada.
#[async_trait]
pub trait StepDefinition: Send + Sync + fmt::Debug {
    /// Nombre estable del step dentro del workflow.
    fn name(&self) -> &str;

    /// Resuelve sus argumentos desde la memoria, ejecuta y agrega la salida.
    ///
    /// Un `Err` mueve la corrida a la vía de fallo; el motor garantiza que
    /// no se vuelve a invocar ningún step después de eso.
    async fn run(&self, memory: &mut MemoryStore, ctx: &StepContext) -> Result<(), ChainError>;
}
