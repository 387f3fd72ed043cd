use std::marker::PhantomData;

use super::{StepDefinition, TypedStep};
use crate::chain::{ChainValue, StepInput};
use crate::errors::WorkflowError;
use crate::hashing::hash_step_names;
use crate::workflow::Workflow;

/// Marker trait to assert two types are the same at compile time.
/// Implemented only for identical types (T: SameAs<T> for all T).
pub trait SameAs<T> {}
impl<T> SameAs<T> for T {}

/// Typed pipeline builder that enforces at compile time that the next step's
/// input matches the previous step's output.
///
/// Usage:
///   let bottles = Pipeline::start(PrepareStep)
///       .then(FermentStep)
///       .then(BottleStep)
///       .run(&workflow, (ingredients,))
///       .await?;
///
/// The first step's input is matched against the activation seed at runtime,
/// like any other memory resolution.
pub struct Pipeline<S: TypedStep + 'static> {
    steps: Vec<Box<dyn StepDefinition>>,
    names: Vec<&'static str>,
    _out: PhantomData<<S as TypedStep>::Output>,
}

impl<S: TypedStep + 'static> Pipeline<S> {
    pub fn start(step: S) -> Self {
        let name = TypedStep::name(&step);
        Self { steps: vec![Box::new(step)],
               names: vec![name],
               _out: PhantomData }
    }

    /// Append a new step, enforcing N::Input == (S::Output,) at compile time.
    pub fn then<N>(mut self, next: N) -> Pipeline<N>
        where N: TypedStep + 'static,
              <N as TypedStep>::Input: SameAs<(<S as TypedStep>::Output,)>
    {
        self.names.push(TypedStep::name(&next));
        self.steps.push(Box::new(next));
        Pipeline::<N> { steps: self.steps,
                        names: self.names,
                        _out: PhantomData }
    }

    /// Hash de la definición (nombres de steps en orden).
    pub fn definition_hash(&self) -> String {
        hash_step_names(&self.names)
    }

    /// Ejecuta el pipeline completo contra una corrida nueva del workflow.
    pub async fn run<I, T>(self, workflow: &Workflow, input: I) -> Result<T, WorkflowError>
        where I: StepInput,
              T: ChainValue
    {
        let mut run = workflow.activate_all(input);
        for step in self.steps.iter() {
            run.chain_dyn(step.as_ref()).await;
        }
        run.resolve::<T>().await
    }

    /// Steps en orden, listos para composición dinámica (`chain_dyn`).
    pub fn into_steps(self) -> Vec<Box<dyn StepDefinition>> {
        self.steps
    }
}
