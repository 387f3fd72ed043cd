//! Corrida de un workflow: la máquina de estados de dos vías.
//!
//! Ciclo de vida: `activate` siembra la memoria y deja la vía de éxito
//! viva; cada operación de encadenado ejecuta un step (o se vuelve no-op si
//! la corrida ya falló); `resolve` cierra la corrida devolviendo el valor
//! final o levantando el fallo acumulado como [`WorkflowError`].
//!
//! Invariantes:
//! - Los steps se ejecutan estrictamente en el orden de encadenado, de a
//!   uno; cada frontera de step espera la finalización del anterior.
//! - Una vez en la vía de fallo, ningún cuerpo de step vuelve a ejecutarse
//!   y la memoria no se modifica (salvo que `short_circuit` tome la vía
//!   alternativa).
//! - Los errores capturados dentro del encadenado nunca se lanzan desde el
//!   encadenado mismo; sólo resurgen en `resolve`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::chain::{ChainValue, StepInput};
use crate::errors::{ChainError, WorkflowError};
use crate::hashing::hash_step_names;
use crate::hooks::{RunInfo, RunReport, RunStatus, RunTracker, StepRecord, StepStatus};
use crate::injection::{CompositeInjector, StepInjector};
use crate::memory::{MemoryStore, ResolutionPolicy};
use crate::outcome::Outcome;
use crate::step::{StepContext, StepDefinition, TypedStep};

/// Vía activa de la corrida.
#[derive(Debug, Clone)]
enum Track {
    Live,
    Failed { step: String, error: ChainError },
}

impl Track {
    fn is_failed(&self) -> bool {
        matches!(self, Track::Failed { .. })
    }
}

/// Rol del eslabón: encadenado normal o vía alternativa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepRole {
    Chain,
    ShortCircuit,
}

/// Una corrida activa. Se crea con [`Workflow::activate`] y no se reutiliza:
/// cada activación produce una corrida nueva con memoria propia.
///
/// [`Workflow::activate`]: crate::workflow::Workflow::activate
pub struct WorkflowRun {
    ctx: StepContext,
    memory: MemoryStore,
    track: Track,
    records: Vec<StepRecord>,
    trackers: Vec<Arc<dyn RunTracker>>,
    injectors: Vec<Arc<dyn StepInjector>>,
    started_at: DateTime<Utc>,
    initialized: bool,
    finished: bool,
}

impl WorkflowRun {
    pub(crate) fn new(workflow: Arc<str>,
                      policy: ResolutionPolicy,
                      trackers: Vec<Arc<dyn RunTracker>>,
                      injectors: Vec<Arc<dyn StepInjector>>)
                      -> Self {
        Self { ctx: StepContext::new(workflow, CancellationToken::new()),
               memory: MemoryStore::new(policy),
               track: Track::Live,
               records: Vec::new(),
               trackers,
               injectors,
               started_at: Utc::now(),
               initialized: false,
               finished: false }
    }

    /// Identificador de la corrida.
    pub fn run_id(&self) -> Uuid {
        self.ctx.run_id()
    }

    /// Nombre del workflow dueño.
    pub fn workflow(&self) -> &str {
        self.ctx.workflow()
    }

    /// Memoria de la corrida (lectura; la escritura pasa por `track`).
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Registros de ejecución acumulados.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// True si la corrida está en la vía de fallo.
    pub fn is_failed(&self) -> bool {
        self.track.is_failed()
    }

    /// Step donde se abandonó la vía de éxito, si la corrida falló.
    pub fn failed_step(&self) -> Option<&str> {
        match &self.track {
            Track::Failed { step, .. } => Some(step),
            Track::Live => None,
        }
    }

    /// Token para cancelar la corrida desde afuera.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.ctx.cancellation().clone()
    }

    /// Agrega un valor a la memoria bajo su propio tipo.
    pub fn track<T: ChainValue>(&mut self, value: T) -> &mut Self {
        self.memory.track(value);
        self
    }

    /// Registra un servicio para resolución posterior (`ichain`).
    ///
    /// Para registrarlo bajo una interfaz, rastrear el valor ya borrado:
    /// `run.add_service(Arc::new(Concrete) as Arc<dyn Servicio>)`.
    pub fn add_service<T: ChainValue>(&mut self, service: T) -> &mut Self {
        self.track(service)
    }

    /// Registra varios servicios de una vez (la tupla se descompone en
    /// entradas individuales).
    pub fn add_services<I: StepInput>(&mut self, services: I) -> &mut Self {
        services.track_into(&mut self.memory);
        self
    }

    /// Encadena un step construible por `Default`.
    pub async fn chain<S>(&mut self) -> &mut Self
        where S: TypedStep + Default + 'static
    {
        self.chain_with(S::default()).await
    }

    /// Encadena una instancia concreta de step.
    pub async fn chain_with<S>(&mut self, step: S) -> &mut Self
        where S: TypedStep + 'static
    {
        let mut step = step;
        CompositeInjector::apply_injectors(&self.injectors, &mut step);
        self.exec_step(&step, StepRole::Chain).await;
        self
    }

    /// Encadena un step ya neutro (composición dinámica).
    pub async fn chain_dyn(&mut self, step: &dyn StepDefinition) -> &mut Self {
        self.exec_step(step, StepRole::Chain).await;
        self
    }

    /// Encadena pasándole la entrada explícita (sin resolver memoria) y
    /// captura la salida. La salida igualmente se rastrea en memoria.
    ///
    /// Devuelve `None` si la corrida ya estaba (o terminó) en la vía de
    /// fallo.
    pub async fn chain_direct<S>(&mut self, step: S, input: S::Input) -> Option<S::Output>
        where S: TypedStep + 'static
    {
        self.ensure_initialized().await;
        let mut step = step;
        CompositeInjector::apply_injectors(&self.injectors, &mut step);
        let name = TypedStep::name(&step);
        if self.track.is_failed() {
            debug!("chain_direct:skip workflow={} step={name}", self.ctx.workflow());
            self.records.push(StepRecord::skipped(name));
            return None;
        }
        let started = Utc::now();
        let cancel = self.ctx.cancellation().clone();
        debug!("chain_direct:start run_id={} step={name}", self.ctx.run_id());
        let ctx = &self.ctx;
        let result = run_with_guard(name, &cancel, async {
                         TypedStep::run(&step, input, ctx).await
                                                          .map_err(|error| ChainError::StepExecution { step: name.to_string(),
                                                                                                       error })
                     }).await;
        match result {
            Ok(output) => {
                self.memory.track(output.clone());
                self.records.push(StepRecord::finished(name, StepStatus::FinishedOk, started));
                debug!("chain_direct:done step={name}");
                Some(output)
            }
            Err(error) => {
                warn!("chain_direct:failed step={name} error={error}");
                self.records.push(StepRecord::failed(name, error.to_string(), started));
                self.track = Track::Failed { step: name.to_string(),
                                             error };
                None
            }
        }
    }

    /// Encadena un step resuelto por interfaz: busca en memoria un
    /// `Arc<S>` registrado previamente con `add_service` y lo ejecuta.
    pub async fn ichain<S>(&mut self) -> &mut Self
        where S: StepDefinition + ?Sized + 'static
    {
        self.ensure_initialized().await;
        let label = std::any::type_name::<S>();
        if self.track.is_failed() {
            debug!("ichain:skip workflow={} interface={label}", self.ctx.workflow());
            self.records.push(StepRecord::skipped(label));
            return self;
        }
        match self.memory.resolve::<Arc<S>>(label) {
            Ok(service) => {
                self.exec_step(&*service, StepRole::Chain).await;
            }
            Err(error) => {
                warn!("ichain:unresolved interface={label} error={error}");
                self.records.push(StepRecord::failed(label, error.to_string(), Utc::now()));
                self.track = Track::Failed { step: label.to_string(),
                                             error };
            }
        }
        self
    }

    /// Vía alternativa: ejecuta el step incondicionalmente. Si la corrida
    /// venía fallada, el desenlace de este step pasa a ser la nueva vía
    /// (un fallo dentro del step alternativo "se queda a la izquierda").
    pub async fn short_circuit<S>(&mut self) -> &mut Self
        where S: TypedStep + Default + 'static
    {
        self.short_circuit_with(S::default()).await
    }

    /// Vía alternativa con instancia concreta.
    pub async fn short_circuit_with<S>(&mut self, step: S) -> &mut Self
        where S: TypedStep + 'static
    {
        let mut step = step;
        CompositeInjector::apply_injectors(&self.injectors, &mut step);
        self.exec_step(&step, StepRole::ShortCircuit).await;
        self
    }

    /// Extrae un valor interno de un valor ya rastreado y lo agrega a la
    /// memoria, sin tocar la entrada original.
    pub async fn extract<Outer, Inner, F>(&mut self, pick: F) -> &mut Self
        where Outer: ChainValue,
              Inner: ChainValue,
              F: FnOnce(&Outer) -> Inner + Send
    {
        self.ensure_initialized().await;
        let label = format!("extract<{}>", std::any::type_name::<Inner>());
        if self.track.is_failed() {
            self.records.push(StepRecord::skipped(&label));
            return self;
        }
        let started = Utc::now();
        match self.memory.resolve::<Outer>(&label) {
            Ok(outer) => {
                let inner = pick(&outer);
                self.memory.track(inner);
                self.records.push(StepRecord::finished(&label, StepStatus::FinishedOk, started));
            }
            Err(error) => {
                warn!("extract:failed step={label} error={error}");
                self.records.push(StepRecord::failed(&label, error.to_string(), started));
                self.track = Track::Failed { step: label.clone(),
                                             error };
            }
        }
        self
    }

    /// Cierre de la corrida: valor final tipado o fallo acumulado.
    ///
    /// El valor se lee de la memoria por tipo (gana la entrada más
    /// reciente). Idempotente respecto al estado: múltiples llamadas leen
    /// el mismo desenlace; los hooks `finish` se notifican una sola vez.
    pub async fn resolve<T: ChainValue>(&mut self) -> Result<T, WorkflowError> {
        let track = self.track.clone();
        match track {
            Track::Live => match self.memory.resolve::<T>("resolve") {
                Ok(value) => {
                    debug!("resolve:ok workflow={} type={}",
                           self.ctx.workflow(),
                           std::any::type_name::<T>());
                    self.finish_run(RunStatus::Completed, None, None).await;
                    Ok(value)
                }
                Err(error) => {
                    warn!("resolve:missing-output workflow={} error={error}", self.ctx.workflow());
                    let failure = WorkflowError::new(self.ctx.workflow(), None, error.clone());
                    self.track = Track::Failed { step: "resolve".to_string(),
                                                 error };
                    self.finish_run(RunStatus::Failed,
                                    Some("resolve".to_string()),
                                    Some(failure.cause.to_string()))
                        .await;
                    Err(failure)
                }
            },
            Track::Failed { step, error } => {
                warn!("resolve:failed workflow={} step={step} error={error}", self.ctx.workflow());
                let failure = WorkflowError::new(self.ctx.workflow(), Some(step.clone()), error.clone());
                self.finish_run(RunStatus::Failed, Some(step), Some(error.to_string())).await;
                Err(failure)
            }
        }
    }

    /// Variante que no lanza: envuelve el cierre en un [`Outcome`].
    pub async fn resolve_outcome<T: ChainValue>(&mut self) -> Outcome<T> {
        self.resolve::<T>().await.into()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn exec_step<S>(&mut self, step: &S, role: StepRole)
        where S: StepDefinition + ?Sized
    {
        self.ensure_initialized().await;
        let name = step.name().to_string();
        let mut revived = false;
        if self.track.is_failed() {
            match role {
                StepRole::Chain => {
                    debug!("chain:skip workflow={} step={name} (failure track)", self.ctx.workflow());
                    self.records.push(StepRecord::skipped(&name));
                    return;
                }
                StepRole::ShortCircuit => {
                    debug!("short_circuit:revive workflow={} step={name}", self.ctx.workflow());
                    self.track = Track::Live;
                    revived = true;
                }
            }
        }
        let started = Utc::now();
        let cancel = self.ctx.cancellation().clone();
        debug!("chain:start run_id={} step={name}", self.ctx.run_id());
        let result = run_with_guard(&name, &cancel, step.run(&mut self.memory, &self.ctx)).await;
        match result {
            Ok(()) => {
                let status = if revived { StepStatus::ShortCircuited } else { StepStatus::FinishedOk };
                self.records.push(StepRecord::finished(&name, status, started));
                debug!("chain:done step={name} memory={}", self.memory.len());
            }
            Err(error) => {
                warn!("chain:failed step={name} error={error}");
                self.records.push(StepRecord::failed(&name, error.to_string(), started));
                self.track = Track::Failed { step: name,
                                             error };
            }
        }
    }

    async fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let info = RunInfo { run_id: self.ctx.run_id(),
                             workflow: self.ctx.workflow().to_string(),
                             started_at: self.started_at };
        for tracker in self.trackers.iter() {
            tracker.initialize(&info).await;
        }
    }

    async fn finish_run(&mut self, status: RunStatus, failed_step: Option<String>, error: Option<String>) {
        if self.finished {
            return;
        }
        self.finished = true;
        let names: Vec<&str> = self.records.iter().map(|r| r.step.as_str()).collect();
        let report = RunReport { run_id: self.ctx.run_id(),
                                 workflow: self.ctx.workflow().to_string(),
                                 status,
                                 failed_step,
                                 error,
                                 definition_hash: hash_step_names(&names),
                                 memory_entries: self.memory.len(),
                                 records: self.records.clone(),
                                 started_at: self.started_at,
                                 finished_at: Utc::now() };
        for tracker in self.trackers.iter() {
            tracker.finish(&report).await;
        }
    }
}

/// Ejecuta el futuro de un step bajo guardia: cancelación chequeada antes y
/// durante, pánicos convertidos a [`ChainError::StepPanic`].
async fn run_with_guard<T, F>(step: &str, cancel: &CancellationToken, fut: F) -> Result<T, ChainError>
    where F: std::future::Future<Output = Result<T, ChainError>>
{
    if cancel.is_cancelled() {
        return Err(ChainError::Cancelled { step: step.to_string() });
    }
    let guarded = AssertUnwindSafe(fut).catch_unwind();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ChainError::Cancelled { step: step.to_string() }),
        result = guarded => match result {
            Ok(inner) => inner,
            Err(payload) => Err(ChainError::StepPanic { step: step.to_string(),
                                                        message: panic_message(payload) }),
        },
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
