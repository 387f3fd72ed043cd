//! Inyección de dependencias en steps, resuelta en el composition root.
//!
//! Un [`StepInjector`] recibe el step concreto (como `&mut dyn Any`) antes
//! de ejecutarse y puebla los slots que reconoce. El core nunca consulta un
//! contenedor: el llamador registra los inyectores en el `Workflow` y éstos
//! se aplican en orden de registro, de forma determinista.

mod composite;

pub use composite::CompositeInjector;

use std::any::Any;
use std::fmt;

/// Puebla dependencias de un step concreto antes de su ejecución.
pub trait StepInjector: Send + Sync + fmt::Debug {
    /// Recibe el step a punto de ejecutarse. Implementaciones hacen
    /// downcast a los tipos de step que conocen e ignoran el resto.
    ///
    /// Debe ser determinista y sin efectos secundarios.
    fn inject(&self, step: &mut dyn Any);
}
