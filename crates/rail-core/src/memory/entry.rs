//! Entrada individual de la memoria de una corrida.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Valor rastreado durante una corrida, etiquetado con su tipo.
///
/// La etiqueta (`tag`) es la clave efectiva de búsqueda: la entrada más
/// reciente con una etiqueta dada gana. El timestamp es metadato para
/// observabilidad; nunca participa en la resolución.
#[derive(Clone)]
pub struct MemoryEntry {
    pub(crate) tag: TypeId,
    pub(crate) label: &'static str,
    pub(crate) value: Arc<dyn Any + Send + Sync>,
    pub(crate) appended_at: DateTime<Utc>,
}

impl MemoryEntry {
    pub(crate) fn new<T>(value: T) -> Self
        where T: Send + Sync + 'static
    {
        Self { tag: TypeId::of::<T>(),
               label: std::any::type_name::<T>(),
               value: Arc::new(value),
               appended_at: Utc::now() }
    }

    /// Nombre legible del tipo rastreado.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Momento en que se agregó la entrada.
    pub fn appended_at(&self) -> DateTime<Utc> {
        self.appended_at
    }
}

impl fmt::Debug for MemoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEntry")
         .field("label", &self.label)
         .field("appended_at", &self.appended_at)
         .finish()
    }
}
