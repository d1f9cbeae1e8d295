// Run with: cargo run --example debug_inventory -- [path/to/docker]
// Prints what dockmark would list, and the confirmation text for selecting everything.

use dockmark_core::{Category, DockerCli, Item, ItemId, PendingBatch, SelectionStore};
use std::time::Instant;

fn main() {
    let program = std::env::args().nth(1).unwrap_or_else(|| "docker".to_string());
    let cli = DockerCli::new(program);

    let start = Instant::now();
    let inventory = match cli.inventory() {
        Ok(inventory) => inventory,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "[{:>6.2}s] listed {} resources",
        start.elapsed().as_secs_f64(),
        inventory.total()
    );

    let mut store = SelectionStore::new();
    for category in Category::ALL {
        let resources = inventory.get(category);
        println!("\n{} ({})", category.title(), resources.len());
        for resource in resources {
            println!("  {:<40} {}", resource.name(), resource.id());
        }
        store.select_many(
            category,
            resources.iter().map(|r| ItemId::from(r.id())),
        );
    }

    // Dry run: show the prompt without removing anything
    match PendingBatch::prepare(&store) {
        Some(batch) => println!("\n{}\n{}", batch.title(), batch.message()),
        None => println!("\nNothing to remove"),
    }
}
