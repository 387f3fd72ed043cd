//! Test de uso de punta a punta sobre la API pública del workspace.

use std::sync::Arc;

use rail_adapters::{BreweryWorkflow, JsonRunTracker};
use rail_domain::{Ingredients, Recipe};

#[tokio::test]
async fn two_runs_of_the_same_workflow_are_independent() {
    let brewery = BreweryWorkflow::new();

    let first = brewery.run(Ingredients::house_batch()).await.expect("first run");
    let second = brewery.run(Ingredients::new(2, 1, 1, 1).unwrap()).await.expect("second run");

    assert_eq!(first.len(), 6);
    assert_eq!(second.len(), 12, "4 litros en botellas de 330ml");
    // Corridas distintas: botellas con etiquetas de damajuanas distintas.
    assert_ne!(first[0].label(), second[0].label());
}

#[tokio::test]
async fn winter_recipe_changes_bottle_format() {
    let brewery = BreweryWorkflow::new().with_recipe(Recipe::by_name("winter_cider").unwrap());
    let bottles = brewery.run(Ingredients::house_batch()).await.unwrap();
    assert_eq!(bottles.len(), 4, "2 litros en botellas de 500ml");
    assert_eq!(bottles[0].volume_ml(), 500);
}

#[tokio::test]
async fn reports_accumulate_across_runs() {
    let tracker = Arc::new(JsonRunTracker::new());
    let brewery = BreweryWorkflow::new().with_tracker(tracker.clone());

    let _ = brewery.run(Ingredients::house_batch()).await.unwrap();
    let _ = brewery.run(Ingredients::house_batch()).await.unwrap();

    let reports = tracker.reports();
    assert_eq!(reports.len(), 2);
    assert_ne!(reports[0]["run_id"], reports[1]["run_id"]);
    assert_eq!(reports[0]["definition_hash"], reports[1]["definition_hash"],
               "misma secuencia de steps, mismo hash de definición");
}
