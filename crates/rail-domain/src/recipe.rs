use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Receta de fermentación: nombre estable + parámetros deterministas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    name: String,
    ferment_days: u32,
    bottle_volume_ml: u32,
}

/// Catálogo estático de recetas de la casa. Orden y contenido estables:
/// varios tests dependen de que `house_cider` sea la primera.
static HOUSE_RECIPES: Lazy<Vec<Recipe>> = Lazy::new(|| {
    vec![Recipe { name: "house_cider".to_string(),
                  ferment_days: 14,
                  bottle_volume_ml: 330 },
         Recipe { name: "winter_cider".to_string(),
                  ferment_days: 21,
                  bottle_volume_ml: 500 }]
});

impl Recipe {
    /// Receta por defecto de la casa.
    pub fn house_cider() -> Self {
        HOUSE_RECIPES[0].clone()
    }

    /// Busca una receta del catálogo por nombre.
    pub fn by_name(name: &str) -> Option<Self> {
        HOUSE_RECIPES.iter().find(|r| r.name == name).cloned()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ferment_days(&self) -> u32 {
        self.ferment_days
    }

    pub fn bottle_volume_ml(&self) -> u32 {
        self.bottle_volume_ml
    }
}
