use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BrewError;

/// Insumos de una tanda de sidra. Las cantidades son unidades enteras
/// (manzanas, panes de azúcar, ramas de canela, sobres de levadura).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredients {
    apples: u32,
    brown_sugar: u32,
    cinnamon: u32,
    yeast: u32,
}

impl Ingredients {
    /// Crea los insumos validando que no falte ninguno.
    pub fn new(apples: u32, brown_sugar: u32, cinnamon: u32, yeast: u32) -> Result<Self, BrewError> {
        let pairs = [("apples", apples), ("brown_sugar", brown_sugar), ("cinnamon", cinnamon), ("yeast", yeast)];
        for (name, qty) in pairs {
            if qty == 0 {
                return Err(BrewError::MissingIngredient(name.to_string()));
            }
        }
        Ok(Self { apples,
                  brown_sugar,
                  cinnamon,
                  yeast })
    }

    /// Tanda mínima de la casa: una unidad de cada insumo.
    pub fn house_batch() -> Self {
        Self { apples: 1,
               brown_sugar: 1,
               cinnamon: 1,
               yeast: 1 }
    }

    pub fn apples(&self) -> u32 {
        self.apples
    }

    pub fn brown_sugar(&self) -> u32 {
        self.brown_sugar
    }

    pub fn cinnamon(&self) -> u32 {
        self.cinnamon
    }

    pub fn yeast(&self) -> u32 {
        self.yeast
    }

    /// Litros de jugo que rinde la tanda (2 litros por manzana).
    pub fn juice_litres(&self) -> u32 {
        self.apples * 2
    }
}

impl fmt::Display for Ingredients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "<apples: {}, sugar: {}, cinnamon: {}, yeast: {}>",
               self.apples, self.brown_sugar, self.cinnamon, self.yeast)
    }
}
