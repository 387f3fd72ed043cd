use std::any::Any;

use rail_core::StepInjector;

use crate::steps::CellarFermenter;

/// Inyector del composition root: puebla la bodega del fermentador antes de
/// ejecutarlo. Ignora cualquier otro tipo de step.
#[derive(Debug)]
pub struct CellarInjector {
    pub cellar: String,
}

impl CellarInjector {
    pub fn new(cellar: impl Into<String>) -> Self {
        Self { cellar: cellar.into() }
    }
}

impl StepInjector for CellarInjector {
    fn inject(&self, step: &mut dyn Any) {
        if let Some(fermenter) = step.downcast_mut::<CellarFermenter>() {
            fermenter.cellar = self.cellar.clone();
        }
    }
}
