//! rail-core: Motor railway-oriented de workflows (dos vías: éxito/fallo)
pub mod chain;
pub mod errors;
pub mod hashing;
pub mod hooks;
pub mod injection;
pub mod memory;
pub mod outcome;
pub mod step;
pub mod workflow;


pub use chain::{ChainValue, StepInput};
pub use errors::{ChainError, StepError, WorkflowError};
pub use hooks::{RunInfo, RunReport, RunStatus, RunTracker, StepRecord, StepStatus};
pub use memory::{MemoryEntry, MemoryStore, ResolutionPolicy};
pub use outcome::Outcome;
pub use step::{Pipeline, SameAs, StepContext, StepDefinition, StepResult, TypedStep};
pub use workflow::{Workflow, WorkflowRun};

// El macro typed_step! ya queda exportado en la raíz vía #[macro_export].

pub use injection::{CompositeInjector, StepInjector};

#[cfg(test)]
mod tests {
    use super::*;

    // Pipeline mínimo declarado con el macro: origen -> transformación.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Batch(u32);

    #[derive(Debug, Clone, PartialEq)]
    pub struct Labeled(String);

    crate::typed_step! {
        step GrowStep {
            name: "grow",
            input: Batch,
            output: Batch,
            run(_me, batch, _ctx) {
                Ok(Batch(batch.0 + 1))
            }
        }
    }

    crate::typed_step! {
        step LabelStep {
            name: "label",
            input: Batch,
            output: Labeled,
            run(_me, batch, _ctx) {
                Ok(Labeled(format!("batch-{}", batch.0)))
            }
        }
    }

    crate::typed_step! {
        step JoinStep {
            name: "join",
            input: (Batch, Labeled),
            output: Labeled,
            run(_me, (batch, labeled), _ctx) {
                Ok(Labeled(format!("{}#{}", labeled.0, batch.0)))
            }
        }
    }

    #[tokio::test]
    async fn fluent_chain_end_to_end() {
        let workflow = Workflow::new("e2e");
        let mut run = workflow.activate(Batch(1));
        let labeled: Labeled = run.chain::<GrowStep>()
                                  .await
                                  .chain::<LabelStep>()
                                  .await
                                  .resolve()
                                  .await
                                  .expect("run resolves");
        assert_eq!(labeled, Labeled("batch-2".to_string()));
    }

    #[tokio::test]
    async fn tuple_step_pulls_both_slots_from_memory() {
        let workflow = Workflow::new("tuple_e2e");
        let mut run = workflow.activate(Batch(3));
        let labeled: Labeled = run.chain::<LabelStep>()
                                  .await
                                  .chain::<JoinStep>()
                                  .await
                                  .resolve()
                                  .await
                                  .expect("tuple inputs resolve");
        assert_eq!(labeled, Labeled("batch-3#3".to_string()));
    }

    #[tokio::test]
    async fn typed_pipeline_checks_adjacency_at_compile_time() {
        let workflow = Workflow::new("typed_pipeline");
        // GrowStep -> GrowStep -> LabelStep compila porque las formas de
        // entrada/salida calzan; un orden inválido ni siquiera compila.
        let labeled: Labeled = Pipeline::start(GrowStep::new()).then(GrowStep::new())
                                                               .then(LabelStep::new())
                                                               .run(&workflow, (Batch(0),))
                                                               .await
                                                               .expect("pipeline resolves");
        assert_eq!(labeled, Labeled("batch-2".to_string()));
    }

    #[tokio::test]
    async fn pipeline_definition_hash_is_stable() {
        let a = Pipeline::start(GrowStep::new()).then(LabelStep::new()).definition_hash();
        let b = Pipeline::start(GrowStep::new()).then(LabelStep::new()).definition_hash();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn resolve_outcome_wraps_both_tracks() {
        let workflow = Workflow::new("outcome");
        let mut run = workflow.activate(Batch(1));
        let ok: Outcome<Batch> = run.chain::<GrowStep>().await.resolve_outcome().await;
        assert!(ok.is_success());

        let mut empty = workflow.activate(Batch(1));
        let missing: Outcome<Labeled> = empty.resolve_outcome().await;
        assert!(missing.is_failure());
    }

    #[tokio::test]
    async fn extract_appends_inner_without_touching_outer() {
        #[derive(Debug, Clone)]
        struct Shipment {
            batch: Batch,
        }

        let workflow = Workflow::new("extract");
        let mut run = workflow.activate(Shipment { batch: Batch(9) });
        run.extract(|s: &Shipment| s.batch.clone()).await;

        assert_eq!(run.memory().len(), 2, "outer entry intact, inner appended");
        let labeled: Labeled = run.chain::<LabelStep>().await.resolve().await.unwrap();
        assert_eq!(labeled, Labeled("batch-9".to_string()));
    }
}
