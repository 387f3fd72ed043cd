//! Workflow armado de sidra: fachada sobre el encadenado fluido.

use std::sync::Arc;

use rail_core::{RunTracker, StepInjector, Workflow, WorkflowError, WorkflowRun};
use rail_domain::{Bottle, Ingredients, Recipe};

use crate::steps::{BottleStep, BrewStep, FermentStep, PrepareStep};

/// Pipeline completo Prepare → Ferment → Brew → Bottle con la receta de la
/// casa. Reutilizable: cada `run` es una corrida independiente.
#[derive(Debug, Clone)]
pub struct BreweryWorkflow {
    workflow: Workflow,
    recipe: Recipe,
}

impl BreweryWorkflow {
    pub fn new() -> Self {
        Self { workflow: Workflow::new("brew_cider"),
               recipe: Recipe::house_cider() }
    }

    /// Cambia la receta usada al embotellar.
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = recipe;
        self
    }

    pub fn with_tracker(mut self, tracker: Arc<dyn RunTracker>) -> Self {
        self.workflow = self.workflow.with_tracker(tracker);
        self
    }

    pub fn with_injector(mut self, injector: Arc<dyn StepInjector>) -> Self {
        self.workflow = self.workflow.with_injector(injector);
        self
    }

    /// Corrida completa: botellas etiquetadas o el fallo acumulado.
    pub async fn run(&self, ingredients: Ingredients) -> Result<Vec<Bottle>, WorkflowError> {
        let mut run = self.activate(ingredients);
        run.chain::<PrepareStep>()
           .await
           .chain::<FermentStep>()
           .await
           .chain::<BrewStep>()
           .await
           .chain::<BottleStep>()
           .await
           .resolve::<Vec<Bottle>>()
           .await
    }

    /// Activa una corrida sembrada con insumos + receta, sin encadenar.
    /// Útil para componer variantes (p.ej. fermentación por interfaz).
    pub fn activate(&self, ingredients: Ingredients) -> WorkflowRun {
        self.workflow.activate_all((ingredients, self.recipe.clone()))
    }
}

impl Default for BreweryWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
