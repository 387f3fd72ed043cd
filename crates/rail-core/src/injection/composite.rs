//! `CompositeInjector`: aplica una secuencia de `StepInjector` en orden de
//! registro, de forma determinista.

use std::any::Any;
use std::sync::Arc;

use super::StepInjector;

/// Aplica una serie de inyectores en orden.
#[derive(Debug, Default)]
pub struct CompositeInjector {
    pub injectors: Vec<Arc<dyn StepInjector>>,
}

impl CompositeInjector {
    /// Crea un `CompositeInjector` vacío.
    pub fn new() -> Self {
        Self { injectors: vec![] }
    }

    /// Crea un `CompositeInjector` con la lista dada de inyectores.
    pub fn with_injectors(injectors: Vec<Arc<dyn StepInjector>>) -> Self {
        Self { injectors }
    }

    /// Aplica los inyectores sobre el step, en orden.
    pub fn apply(&self, step: &mut dyn Any) {
        for injector in self.injectors.iter() {
            injector.inject(step);
        }
    }

    /// Versión estática que aplica un slice de inyectores sin tomar
    /// ownership (útil para callers que mantienen los inyectores en el
    /// `Workflow`).
    pub fn apply_injectors(injectors: &[Arc<dyn StepInjector>], step: &mut dyn Any) {
        for injector in injectors.iter() {
            injector.inject(step);
        }
    }
}
