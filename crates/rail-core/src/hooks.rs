//! Puntos de enganche para colaboradores externos (tracking de efectos).
//!
//! El motor invoca [`RunTracker::initialize`] antes del primer eslabón y
//! [`RunTracker::finish`] al resolver, con payloads serializables. Qué hace
//! el colaborador con eso (persistir metadatos, log JSON, métricas) queda
//! fuera del core.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadatos de una corrida recién activada.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub workflow: String,
    pub started_at: DateTime<Utc>,
}

/// Desenlace registrado de un eslabón.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// El step terminó correctamente.
    FinishedOk,
    /// El step falló (o no se pudo resolver su entrada).
    Failed,
    /// El step no se ejecutó: la corrida ya estaba en la vía de fallo.
    Skipped,
    /// El step corrió como vía alternativa tras un fallo y terminó bien.
    ShortCircuited,
}

/// Registro de ejecución de un eslabón.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub status: StepStatus,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StepRecord {
    pub(crate) fn finished(step: &str, status: StepStatus, started_at: DateTime<Utc>) -> Self {
        Self { step: step.to_string(),
               status,
               error: None,
               started_at,
               finished_at: Utc::now() }
    }

    pub(crate) fn failed(step: &str, error: String, started_at: DateTime<Utc>) -> Self {
        Self { step: step.to_string(),
               status: StepStatus::Failed,
               error: Some(error),
               started_at,
               finished_at: Utc::now() }
    }

    pub(crate) fn skipped(step: &str) -> Self {
        let now = Utc::now();
        Self { step: step.to_string(),
               status: StepStatus::Skipped,
               error: None,
               started_at: now,
               finished_at: now }
    }
}

/// Desenlace global de la corrida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Reporte final entregado a `finish`.
///
/// `definition_hash` cubre los nombres de steps efectivamente encadenados,
/// en orden; dos corridas con la misma secuencia comparten hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub workflow: String,
    pub status: RunStatus,
    pub failed_step: Option<String>,
    pub error: Option<String>,
    pub definition_hash: String,
    pub memory_entries: usize,
    pub records: Vec<StepRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Colaborador notificado al inicio y al cierre de cada corrida.
///
/// Ambos métodos son no-op por defecto; un tracker puede implementar sólo
/// el lado que le interesa.
#[async_trait]
pub trait RunTracker: Send + Sync + fmt::Debug {
    async fn initialize(&self, _info: &RunInfo) {}

    async fn finish(&self, _report: &RunReport) {}
}
