//! PrepareStep: prensa los insumos y deja una damajuana nueva en memoria.

use rail_core::typed_step;

use rail_domain::{Ingredients, Jug};

typed_step! {
    step PrepareStep {
        name: "prepare",
        input: Ingredients,
        output: Jug,
        run(_me, ingredients, _ctx) {
            // La validación vive en el dominio; un insumo faltante corta la
            // corrida con el BrewError original como causa.
            Ok(Jug::press(&ingredients)?)
        }
    }
}
