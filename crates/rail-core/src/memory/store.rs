//! Memoria tipada de una corrida (append-only).
//!
//! Rol en el flujo:
//! - Cada valor producido por un step se agrega como [`MemoryEntry`].
//! - Los steps siguientes resuelven sus argumentos por tipo: gana la
//!   entrada coincidente más reciente ("latest shadow").
//! - Nunca se muta una entrada existente; sólo se agrega.
//!
//! Registrar una implementación concreta bajo una interfaz se expresa
//! rastreando el valor ya borrado (`Arc<dyn Servicio>`): la etiqueta pasa a
//! ser el tipo del trait-object y la resolución posterior lo encuentra por
//! esa etiqueta exacta.

use std::any::TypeId;
use std::fmt;

use log::debug;

use super::MemoryEntry;
use crate::chain::ChainValue;
use crate::errors::ChainError;

/// Política de resolución frente a múltiples entradas del mismo tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// La entrada más reciente gana (política por defecto).
    #[default]
    LatestWins,
    /// Falla con [`ChainError::Ambiguous`] si más de una entrada coincide.
    ///
    /// Nota: bajo esta política un pipeline que re-rastrea el mismo tipo
    /// (p.ej. un valor que avanza de estado) deja de resolver; está pensada
    /// para registries de servicios donde la sombra silenciosa es un riesgo.
    Strict,
}

/// Memoria append-only de una corrida, indexada por tipo.
pub struct MemoryStore {
    entries: Vec<MemoryEntry>,
    policy: ResolutionPolicy,
}

impl MemoryStore {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { entries: Vec::new(),
               policy }
    }

    /// Agrega un valor bajo su propio tipo. O(1).
    pub fn track<T: ChainValue>(&mut self, value: T) {
        let entry = MemoryEntry::new(value);
        debug!("memory:track type={} total={}", entry.label(), self.entries.len() + 1);
        self.entries.push(entry);
    }

    /// Resuelve el valor más reciente del tipo pedido.
    ///
    /// Recorre de la entrada más nueva a la más vieja y clona la primera
    /// coincidencia exacta de etiqueta. `step` sólo participa en el
    /// diagnóstico del error.
    pub fn resolve<T: ChainValue>(&self, step: &str) -> Result<T, ChainError> {
        let tag = TypeId::of::<T>();
        if self.policy == ResolutionPolicy::Strict {
            let candidates = self.entries.iter().filter(|e| e.tag == tag).count();
            if candidates > 1 {
                return Err(ChainError::Ambiguous { step: step.to_string(),
                                                   expected: std::any::type_name::<T>(),
                                                   candidates });
            }
        }
        self.entries
            .iter()
            .rev()
            .find(|e| e.tag == tag)
            .and_then(|e| e.value.clone().downcast::<T>().ok())
            .map(|arc| (*arc).clone())
            .ok_or_else(|| ChainError::Resolution { step: step.to_string(),
                                                    expected: std::any::type_name::<T>() })
    }

    /// Cantidad de entradas de un tipo dado (observabilidad/tests).
    pub fn count_of<T: ChainValue>(&self) -> usize {
        let tag = TypeId::of::<T>();
        self.entries.iter().filter(|e| e.tag == tag).count()
    }

    /// Cantidad total de entradas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entradas en orden de inserción.
    pub fn iter(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter()
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(ResolutionPolicy::LatestWins)
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
         .field("policy", &self.policy)
         .field("entries", &self.entries.iter().map(|e| e.label()).collect::<Vec<_>>())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn resolve_returns_latest_entry_of_type() {
        let mut mem = MemoryStore::default();
        mem.track(1u32);
        mem.track("first".to_string());
        mem.track(2u32);

        let n: u32 = mem.resolve("test").expect("u32 tracked");
        assert_eq!(n, 2, "latest entry must shadow the older one");
        assert_eq!(mem.count_of::<u32>(), 2);
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn resolve_missing_type_fails_with_diagnostic() {
        let mem = MemoryStore::default();
        let err = mem.resolve::<u64>("prepare").unwrap_err();
        match err {
            ChainError::Resolution { step, expected } => {
                assert_eq!(step, "prepare");
                assert!(expected.contains("u64"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn strict_policy_rejects_shadowed_entries() {
        let mut mem = MemoryStore::new(ResolutionPolicy::Strict);
        mem.track(1u32);
        mem.track(2u32);
        let err = mem.resolve::<u32>("test").unwrap_err();
        assert!(matches!(err, ChainError::Ambiguous { candidates: 2, .. }));

        // Con una sola entrada la política estricta resuelve normalmente.
        let mut single = MemoryStore::new(ResolutionPolicy::Strict);
        single.track(7u32);
        assert_eq!(single.resolve::<u32>("test").unwrap(), 7);
    }

    trait Greeter: Send + Sync {
        fn hello(&self) -> &'static str;
    }

    #[derive(Debug)]
    struct English;
    impl Greeter for English {
        fn hello(&self) -> &'static str {
            "hello"
        }
    }

    #[derive(Debug)]
    struct Spanish;
    impl Greeter for Spanish {
        fn hello(&self) -> &'static str {
            "hola"
        }
    }

    #[test]
    fn erased_service_resolves_by_interface_tag() {
        let mut mem = MemoryStore::default();
        mem.track::<Arc<dyn Greeter>>(Arc::new(English));
        mem.track::<Arc<dyn Greeter>>(Arc::new(Spanish));

        let svc: Arc<dyn Greeter> = mem.resolve("greet").expect("service registered");
        assert_eq!(svc.hello(), "hola", "last registered implementation wins");
    }
}
