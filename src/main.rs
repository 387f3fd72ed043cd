//! Demo ejecutable del motor: corrida feliz, corrida fallida y rescate por
//! vía alternativa, con el reporte JSON de cada corrida.

use std::sync::Arc;

use rail_adapters::steps::{BottleStep, BrewStep, PrepareStep};
use rail_adapters::{BreweryWorkflow, JsonRunTracker};
use rail_domain::{Bottle, Ingredients};

async fn run_happy_path(tracker: Arc<JsonRunTracker>) {
    let brewery = BreweryWorkflow::new().with_tracker(tracker);
    match brewery.run(Ingredients::house_batch()).await {
        Ok(bottles) => println!("[happy] {} botellas listas", bottles.len()),
        Err(e) => eprintln!("[happy] inesperado: {e}"),
    }
}

async fn run_failing_path(tracker: Arc<JsonRunTracker>) {
    // Saltamos la fermentación: brew debe cortar la corrida y resolve
    // levanta el error con el step culpable.
    let brewery = BreweryWorkflow::new().with_tracker(tracker);
    let mut run = brewery.activate(Ingredients::house_batch());
    run.chain::<PrepareStep>().await.chain::<BrewStep>().await.chain::<BottleStep>().await;
    match run.resolve::<Vec<Bottle>>().await {
        Ok(_) => eprintln!("[fail] no debería resolver"),
        Err(e) => println!("[fail] corrida fallida como se esperaba: {e}"),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let tracker = Arc::new(JsonRunTracker::new());
    run_happy_path(tracker.clone()).await;
    run_failing_path(tracker.clone()).await;

    println!("--- reportes ---");
    for report in tracker.reports() {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    }
}
