//! Guided Brew
//!
//! Drives a V60 recipe with the interval driver, printing each step as it
//! starts. Runs at 10x speed so the whole brew takes under 20 seconds.
//!
//! Run with:
//! RUST_LOG=pourover=debug cargo run --example guided_brew --features driver

use pourover::driver::{SessionDriver, SessionObserver};
use pourover::recipe::{RecipeBuilder, StepBuilder};
use pourover::session::{format_clock, BrewSession, TickOutcome};
use pourover::summary::BrewSummary;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct Console;

impl SessionObserver for Console {
    fn on_tick(&mut self, _session: &BrewSession, outcome: TickOutcome) {
        if let TickOutcome::Counted { remaining } = outcome {
            if remaining % 10 == 0 {
                println!("    {} left", format_clock(remaining));
            }
        }
    }

    fn on_step_change(&mut self, session: &BrewSession, _from: usize, to: usize) {
        let snapshot = session.snapshot();
        print!(
            "*ding* step {}/{}: {}",
            to + 1,
            snapshot.step_count,
            snapshot.step.instruction
        );
        if snapshot.step.step_type.adds_water() {
            if let Some(pour) = snapshot.step.pour_amount {
                print!(" [{pour}ml]");
            }
        }
        if let Some(target) = snapshot.step.target_weight {
            print!(" (target {target}g)");
        }
        println!();
    }

    fn on_complete(&mut self, summary: &BrewSummary) {
        println!(
            "Done: {}g coffee, {}ml water in {}",
            summary.coffee_grams,
            summary.water_ml,
            format_clock(summary.total_elapsed_secs)
        );
    }

    fn on_cancel(&mut self, _summary: &BrewSummary) {
        println!("Brew cancelled");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Guided Brew ===\n");

    let recipe = RecipeBuilder::new()
        .id("v60-hoffmann")
        .name("V60 Single Cup")
        .coffee(15.0)
        .water(250.0)
        .step(StepBuilder::bloom(45, 50.0).target_weight(50.0))
        .step(StepBuilder::pour(30, 100.0, 150.0))
        .step(StepBuilder::pour(30, 100.0, 250.0))
        .step(StepBuilder::stir(5).instruction("Swirl the brewer"))
        .step(StepBuilder::wait(60))
        .step(StepBuilder::finish())
        .build()?;

    let session = BrewSession::start(recipe, 1.5)?;
    println!(
        "{} at {}: {}g coffee, {}ml water",
        session.recipe().name,
        session.scale(),
        session.scaled_coffee(),
        session.scaled_water()
    );
    println!("Step 1: {}", session.current_step().instruction);

    let (driver, _handle) = SessionDriver::new(session, Duration::from_millis(100));
    let summary = driver.run(&mut Console).await;

    println!("\nBrew log entry:\n{}", summary.to_json()?);
    Ok(())
}
