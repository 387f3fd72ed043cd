//! Tracker de efectos en JSON.
//!
//! Consume los hooks `initialize`/`finish` del core y acumula los reportes
//! como valores JSON listos para persistir o volcar a un log. El transporte
//! concreto (archivo, base, stdout) queda en manos del llamador.

use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use rail_core::{RunInfo, RunReport, RunTracker};

/// Acumula un JSON por corrida terminada.
#[derive(Debug, Default)]
pub struct JsonRunTracker {
    reports: Mutex<Vec<serde_json::Value>>,
}

impl JsonRunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reportes acumulados hasta el momento (en orden de cierre).
    pub fn reports(&self) -> Vec<serde_json::Value> {
        self.reports.lock().expect("tracker mutex poisoned").clone()
    }
}

#[async_trait]
impl RunTracker for JsonRunTracker {
    async fn initialize(&self, info: &RunInfo) {
        debug!("tracker:initialize workflow={} run_id={}", info.workflow, info.run_id);
    }

    async fn finish(&self, report: &RunReport) {
        let value = serde_json::to_value(report).expect("serialize run report");
        debug!("tracker:finish workflow={} status={:?}", report.workflow, report.status);
        self.reports.lock().expect("tracker mutex poisoned").push(value);
    }
}
