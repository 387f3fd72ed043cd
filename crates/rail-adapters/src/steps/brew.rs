//! BrewStep: cocción final. Falla si la damajuana no fermentó.

use rail_core::typed_step;

use rail_domain::Jug;

typed_step! {
    step BrewStep {
        name: "brew",
        input: Jug,
        output: Jug,
        run(_me, jug, _ctx) {
            // `Jug::brew` devuelve la damajuana cocida; la versión nueva
            // sombrea a la fermentada en memoria (gana la más reciente).
            Ok(jug.brew()?)
        }
    }
}
