use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{BrewError, Ingredients};

/// Damajuana con el jugo de una tanda, en algún punto del proceso.
///
/// Semántica de valor: cada transición (`ferment`, `brew`) consume la
/// damajuana y devuelve la versión avanzada; nunca se muta compartida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jug {
    id: Uuid,
    litres: u32,
    is_fermented: bool,
    is_brewed: bool,
    pressed_at: DateTime<Utc>,
}

impl Jug {
    /// Prensa los insumos y llena una damajuana nueva.
    pub fn press(ingredients: &Ingredients) -> Result<Self, BrewError> {
        let litres = ingredients.juice_litres();
        if litres == 0 {
            return Err(BrewError::EmptyJug);
        }
        Ok(Self { id: Uuid::new_v4(),
                  litres,
                  is_fermented: false,
                  is_brewed: false,
                  pressed_at: Utc::now() })
    }

    /// Fermentación completa. Idempotente.
    pub fn ferment(mut self) -> Self {
        self.is_fermented = true;
        self
    }

    /// Cocción final. Requiere fermentación previa.
    pub fn brew(mut self) -> Result<Self, BrewError> {
        if !self.is_fermented {
            return Err(BrewError::NotFermented);
        }
        self.is_brewed = true;
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn litres(&self) -> u32 {
        self.litres
    }

    pub fn is_fermented(&self) -> bool {
        self.is_fermented
    }

    pub fn is_brewed(&self) -> bool {
        self.is_brewed
    }

    pub fn pressed_at(&self) -> DateTime<Utc> {
        self.pressed_at
    }
}

impl fmt::Display for Jug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "<jug {}: {}L fermented={} brewed={}>",
               self.id, self.litres, self.is_fermented, self.is_brewed)
    }
}
