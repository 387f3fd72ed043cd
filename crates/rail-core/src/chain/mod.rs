//! Resolución de argumentos de un step desde la memoria de la corrida.
//!
//! Dos piezas:
//! - [`ChainValue`]: marca blanket para todo valor que puede viajar por la
//!   memoria (clonable, compartible entre hilos, `'static`).
//! - [`StepInput`]: la forma de entrada declarada por un step: `()` o una
//!   tupla de 1 a 4 `ChainValue`s. Cada slot se resuelve por separado, en
//!   orden de declaración.
//!
//! A nivel de trait una entrada simple es la tupla de un elemento
//! (`(Jug,)`); el macro `typed_step!` esconde ese detalle. No puede haber
//! un impl blanket para `T` y a la vez impls por tupla: las tuplas también
//! son `ChainValue` y los impls se solaparían.
//!
//! Dos slots del mismo tipo exacto en una tupla son un caso degenerado
//! (ambos recibirían la misma entrada por "latest wins"), así que se
//! rechazan de entrada con un diagnóstico claro.

use std::any::TypeId;

use crate::errors::ChainError;
use crate::memory::MemoryStore;

/// Valor apto para circular por la memoria de una corrida.
pub trait ChainValue: Clone + Send + Sync + 'static {}

impl<T> ChainValue for T where T: Clone + Send + Sync + 'static {}

/// Forma de entrada de un step: `()` o tupla de tipos a resolver.
pub trait StepInput: Sized + Send + 'static {
    /// Resuelve cada slot desde la memoria, en orden de declaración.
    fn resolve(memory: &MemoryStore, step: &str) -> Result<Self, ChainError>;

    /// Descompone el valor en entradas individuales de memoria.
    ///
    /// Lo usan `activate_all` y `add_services`: una tupla sembrada queda
    /// direccionable slot por slot.
    fn track_into(self, memory: &mut MemoryStore);

    /// Nombres de tipo de cada slot (diagnóstico).
    fn labels() -> Vec<&'static str>;
}

impl StepInput for () {
    fn resolve(_memory: &MemoryStore, _step: &str) -> Result<Self, ChainError> {
        Ok(())
    }

    fn track_into(self, _memory: &mut MemoryStore) {}

    fn labels() -> Vec<&'static str> {
        Vec::new()
    }
}

macro_rules! tuple_step_input {
    ($($name:ident),+) => {
        impl<$($name: ChainValue),+> StepInput for ($($name,)+) {
            fn resolve(memory: &MemoryStore, step: &str) -> Result<Self, ChainError> {
                let tags = [$(TypeId::of::<$name>()),+];
                let labels = [$(std::any::type_name::<$name>()),+];
                for i in 0..tags.len() {
                    for j in (i + 1)..tags.len() {
                        if tags[i] == tags[j] {
                            return Err(ChainError::DuplicateTupleSlot { step: step.to_string(),
                                                                        duplicated: labels[i] });
                        }
                    }
                }
                Ok(($(memory.resolve::<$name>(step)?,)+))
            }

            #[allow(non_snake_case)]
            fn track_into(self, memory: &mut MemoryStore) {
                let ($($name,)+) = self;
                $(memory.track($name);)+
            }

            fn labels() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$name>()),+]
            }
        }
    };
}

tuple_step_input!(A);
tuple_step_input!(A, B);
tuple_step_input!(A, B, C);
tuple_step_input!(A, B, C, D);
