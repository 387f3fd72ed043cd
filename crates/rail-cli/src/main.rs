use std::sync::Arc;

use rail_adapters::{BreweryWorkflow, JsonRunTracker};
use rail_core::WorkflowError;
use rail_domain::{Ingredients, Recipe};

fn print_usage() {
    eprintln!("uso: rail-cli brew [--apples N] [--sugar N] [--cinnamon N] [--yeast N] [--recipe NAME] [--report]");
}

fn print_failure(e: &WorkflowError) {
    eprintln!("[rail brew] corrida fallida: {e}");
    if let Some(step) = &e.step {
        eprintln!("[rail brew] step culpable: {step}");
    }
}

#[tokio::main]
async fn main() {
    // Cargar .env si existe (p.ej. RUST_LOG para colaboradores de logging)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] != "brew" {
        print_usage();
        std::process::exit(2);
    }

    let mut apples: u32 = 1;
    let mut sugar: u32 = 1;
    let mut cinnamon: u32 = 1;
    let mut yeast: u32 = 1;
    let mut recipe: Option<String> = None;
    let mut report = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--apples" => {
                i += 1;
                if i < args.len() { apples = args[i].parse().unwrap_or(apples); }
            }
            "--sugar" => {
                i += 1;
                if i < args.len() { sugar = args[i].parse().unwrap_or(sugar); }
            }
            "--cinnamon" => {
                i += 1;
                if i < args.len() { cinnamon = args[i].parse().unwrap_or(cinnamon); }
            }
            "--yeast" => {
                i += 1;
                if i < args.len() { yeast = args[i].parse().unwrap_or(yeast); }
            }
            "--recipe" => {
                i += 1;
                if i < args.len() { recipe = Some(args[i].clone()); }
            }
            "--report" => report = true,
            _ => {}
        }
        i += 1;
    }

    let ingredients = match Ingredients::new(apples, sugar, cinnamon, yeast) {
        Ok(ing) => ing,
        Err(e) => {
            eprintln!("[rail brew] insumos inválidos: {e}");
            std::process::exit(3);
        }
    };

    let tracker = Arc::new(JsonRunTracker::new());
    let mut brewery = BreweryWorkflow::new().with_tracker(tracker.clone());
    if let Some(name) = recipe {
        match Recipe::by_name(&name) {
            Some(r) => brewery = brewery.with_recipe(r),
            None => {
                eprintln!("[rail brew] receta desconocida: {name}");
                std::process::exit(4);
            }
        }
    }

    match brewery.run(ingredients).await {
        Ok(bottles) => {
            println!("Botellas producidas: {}", bottles.len());
            for b in bottles.iter() {
                println!("  {} ({}ml)", b.label(), b.volume_ml());
            }
        }
        Err(e) => {
            print_failure(&e);
            if report {
                for r in tracker.reports() {
                    println!("{}", serde_json::to_string_pretty(&r).unwrap_or_default());
                }
            }
            std::process::exit(5);
        }
    }

    if report {
        for r in tracker.reports() {
            println!("{}", serde_json::to_string_pretty(&r).unwrap_or_default());
        }
    }
}
