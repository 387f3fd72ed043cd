//! BottleStep: embotella según la receta activa.
//!
//! Toma la damajuana y la receta desde memoria (entrada tupla): el volumen
//! de botella sale de la receta, no de un parámetro suelto.

use rail_core::typed_step;

use rail_domain::{Bottle, Jug, Recipe};

typed_step! {
    step BottleStep {
        name: "bottle",
        input: (Jug, Recipe),
        output: Vec<Bottle>,
        run(_me, (jug, recipe), _ctx) {
            Ok(Bottle::fill_from(&jug, recipe.bottle_volume_ml())?)
        }
    }
}
