//! rail-adapters: Capa de adaptación Dominio ↔ Core
//!
//! Este crate provee:
//! - Steps concretos del proceso de sidra (`PrepareStep`, `FermentStep`,
//!   `BrewStep`, `BottleStep`) declarados sobre los tipos del dominio.
//! - La variante por interfaz (`FermentService` + `CellarFermenter`) para
//!   encadenado vía `add_service`/`ichain`.
//! - Colaboradores que consumen los hooks del core: `JsonRunTracker`
//!   (reportes de corrida como JSON) y `CellarInjector` (inyección de
//!   dependencias desde el composition root).
//! - `BreweryWorkflow`, la fachada lista para usar.
//!
//! Nota: el core sólo conoce tipos que cumplen `ChainValue`; acá nos
//! apoyamos en que los tipos del dominio son clonables y serializables.

pub mod injectors;
pub mod steps;
pub mod trackers;
pub mod workflow;

pub use trackers::JsonRunTracker;
pub use workflow::BreweryWorkflow;
