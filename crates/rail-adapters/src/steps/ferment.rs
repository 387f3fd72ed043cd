//! Fermentación: el step de casa y la variante por interfaz.
//!
//! `FermentStep` es el step directo. `FermentService` es la interfaz para
//! encadenar por referencia registrada (`add_service` + `ichain`), con
//! `CellarFermenter` como implementación concreta inyectable.

use async_trait::async_trait;
use log::debug;

use rail_core::typed_step;
use rail_core::{StepContext, StepDefinition, StepResult, TypedStep};
use rail_domain::Jug;

typed_step! {
    step FermentStep {
        name: "ferment",
        input: Jug,
        output: Jug,
        run(_me, jug, _ctx) {
            Ok(jug.ferment())
        }
    }
}

/// Interfaz de fermentación para resolución por referencia registrada.
pub trait FermentService: StepDefinition {}

/// Fermentador concreto con bodega configurable (slot inyectable).
#[derive(Debug, Clone, Default)]
pub struct CellarFermenter {
    pub cellar: String,
}

impl CellarFermenter {
    pub fn new(cellar: impl Into<String>) -> Self {
        Self { cellar: cellar.into() }
    }
}

#[async_trait]
impl TypedStep for CellarFermenter {
    type Input = (Jug,);
    type Output = Jug;

    fn name(&self) -> &'static str {
        "cellar_ferment"
    }

    async fn run(&self, input: Self::Input, ctx: &StepContext) -> StepResult<Jug> {
        let (jug,) = input;
        debug!("cellar_ferment run_id={} cellar={}", ctx.run_id(), self.cellar);
        Ok(jug.ferment())
    }
}

impl FermentService for CellarFermenter {}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_domain::Ingredients;

    #[tokio::test]
    async fn cellar_fermenter_ferments_the_jug() {
        let jug = rail_domain::Jug::press(&Ingredients::house_batch()).unwrap();
        let step = CellarFermenter::new("test-cellar");
        let ctx = StepContext::detached("unit");
        let fermented = TypedStep::run(&step, (jug,), &ctx).await.expect("ferment ok");
        assert!(fermented.is_fermented());
    }
}
