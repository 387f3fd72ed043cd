//! Workflow: nombre, política de resolución y colaboradores registrados.
//!
//! El `Workflow` es reutilizable y barato de clonar; cada [`activate`]
//! produce una [`WorkflowRun`] independiente con su propia memoria y su
//! propia vía de éxito/fallo. Corridas concurrentes no comparten estado
//! mutable.
//!
//! [`activate`]: Workflow::activate

mod run;

pub use run::WorkflowRun;

use std::sync::Arc;

use log::debug;

use crate::chain::{ChainValue, StepInput};
use crate::hooks::RunTracker;
use crate::injection::StepInjector;
use crate::memory::ResolutionPolicy;

/// Definición liviana de un workflow: identidad + colaboradores.
#[derive(Debug, Clone)]
pub struct Workflow {
    name: Arc<str>,
    policy: ResolutionPolicy,
    trackers: Vec<Arc<dyn RunTracker>>,
    injectors: Vec<Arc<dyn StepInjector>>,
}

impl Workflow {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self { name: Arc::from(name.as_ref()),
               policy: ResolutionPolicy::LatestWins,
               trackers: Vec::new(),
               injectors: Vec::new() }
    }

    /// Cambia la política de resolución de memoria para corridas nuevas.
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registra un tracker notificado al inicio y cierre de cada corrida.
    pub fn with_tracker(mut self, tracker: Arc<dyn RunTracker>) -> Self {
        self.trackers.push(tracker);
        self
    }

    /// Registra un inyector de dependencias aplicado a cada step.
    pub fn with_injector(mut self, injector: Arc<dyn StepInjector>) -> Self {
        self.injectors.push(injector);
        self
    }

    /// Nombre declarado del workflow.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Activa una corrida nueva sembrando la memoria con un único valor.
    pub fn activate<T: ChainValue>(&self, input: T) -> WorkflowRun {
        let mut run = self.fresh_run();
        run.track(input);
        run
    }

    /// Activa una corrida sembrando una tupla: cada elemento queda como
    /// entrada individual de memoria, direccionable por su propio tipo.
    pub fn activate_all<I: StepInput>(&self, inputs: I) -> WorkflowRun {
        let mut run = self.fresh_run();
        run.add_services(inputs);
        run
    }

    fn fresh_run(&self) -> WorkflowRun {
        let run = WorkflowRun::new(self.name.clone(),
                                   self.policy,
                                   self.trackers.clone(),
                                   self.injectors.clone());
        debug!("activate workflow={} run_id={}", self.name, run.run_id());
        run
    }
}
