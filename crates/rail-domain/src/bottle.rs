use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BrewError, Jug};

/// Botella etiquetada del producto final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    id: Uuid,
    label: String,
    volume_ml: u32,
}

impl Bottle {
    /// Embotella una damajuana ya cocida. Devuelve al menos una botella.
    pub fn fill_from(jug: &Jug, volume_ml: u32) -> Result<Vec<Bottle>, BrewError> {
        if !jug.is_brewed() {
            return Err(BrewError::NotBrewed);
        }
        if volume_ml == 0 {
            return Err(BrewError::Validation("bottle volume must be positive".to_string()));
        }
        let total_ml = jug.litres() * 1000;
        let count = (total_ml / volume_ml).max(1);
        let bottles = (0..count).map(|i| Bottle { id: Uuid::new_v4(),
                                                  label: format!("{}-{:03}", jug.id(), i + 1),
                                                  volume_ml })
                                .collect();
        Ok(bottles)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn volume_ml(&self) -> u32 {
        self.volume_ml
    }
}
