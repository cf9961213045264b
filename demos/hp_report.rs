//! Hyperparameter Report Example
//!
//! Registers a small tuning experiment in memory, then renders the two
//! dashboard views: the trial matrix and one trial's metric time series.
//!
//! Run with: cargo run --example hp_report
//! (set RUST_LOG=debug to see the builders' tracing output)

use trueno_trials::experiment::{ObjectiveDirection, ObjectiveSpec, Observation, Trial};
use trueno_trials::render::{pivot_to_csv, series_to_csv, to_json_string};
use trueno_trials::source::MemoryExperimentSource;
use trueno_trials::{ReportConfig, ReportService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    trueno_trials::logging::init_logging(false);

    println!("=== Trueno-Trials Hyperparameter Report ===\n");

    // -------------------------------------------------------------------------
    // 1. Register the experiment schema
    // -------------------------------------------------------------------------
    println!("1. Registering experiment...");

    let objective = ObjectiveSpec::builder(ObjectiveDirection::Maximize, "accuracy")
        .additional_metric("loss")
        .build();
    let source = MemoryExperimentSource::new();
    source.add_experiment("random-search", objective.clone(), ["lr", "num-layers", "optimizer"]);

    println!("   Objective: maximize {}", objective.primary_metric_name());
    println!("   Metrics: {:?}", objective.metric_names().collect::<Vec<_>>());

    // -------------------------------------------------------------------------
    // 2. Register trials in different states
    // -------------------------------------------------------------------------
    println!("\n2. Registering trials...");

    let trials = [
        ("random-search-7xk2", "0.0213", "4", "sgd", true),
        ("random-search-9pqd", "0.0148", "3", "adam", true),
        ("random-search-b4lm", "0.0279", "5", "ftrl", false),
    ];
    for (id, lr, layers, optimizer, succeeded) in trials {
        let builder = Trial::builder(id, objective.clone())
            .condition("Created", false)
            .condition("Running", false);
        let builder = if succeeded {
            builder.condition("Succeeded", true)
        } else {
            builder.condition("Failed", false)
        };
        source.add_trial(
            "random-search",
            builder
                .parameter("lr", lr)
                .parameter("num-layers", layers)
                .parameter("optimizer", optimizer)
                .build(),
        )?;
        println!("   {id}: lr={lr} num-layers={layers} optimizer={optimizer}");
    }

    // -------------------------------------------------------------------------
    // 3. Report metrics (several per second, as a collector would)
    // -------------------------------------------------------------------------
    println!("\n3. Reporting observations...");

    let reports = [
        ("random-search-7xk2", "accuracy", "2021-06-01T10:00:00.120Z", "0.81"),
        ("random-search-7xk2", "loss", "2021-06-01T10:00:00.130Z", "0.62"),
        ("random-search-7xk2", "accuracy", "2021-06-01T10:00:00.870Z", "0.84"),
        ("random-search-7xk2", "loss", "2021-06-01T10:00:00.880Z", "0.55"),
        ("random-search-7xk2", "accuracy", "2021-06-01T10:00:01.300Z", "0.86"),
        ("random-search-7xk2", "loss", "2021-06-01T10:00:01.310Z", "0.49"),
        ("random-search-9pqd", "accuracy", "2021-06-01T10:05:00Z", "0.90"),
        ("random-search-9pqd", "loss", "2021-06-01T10:05:00Z", "0.31"),
        ("random-search-b4lm", "accuracy", "2021-06-01T10:10:00Z", "0.12"),
    ];
    for (trial, metric, timestamp, value) in reports {
        source.add_observation(trial, Observation::new(metric, timestamp, value));
    }
    println!("   Reported {} observations", reports.len());

    // -------------------------------------------------------------------------
    // 4. Build the reports
    // -------------------------------------------------------------------------
    let service = ReportService::new(&source, &source, ReportConfig::default())?;

    println!("\n4. Trial matrix:");
    let table = service.experiment_table("random-search").await?;
    println!("{}\n", pivot_to_csv(&table));

    if let Some(best) = table.cell("random-search-9pqd", "accuracy") {
        println!("   Best accuracy of random-search-9pqd: {best}");
    }

    println!("\n5. Time series for random-search-7xk2:");
    let series = service.trial_metrics("random-search-7xk2").await?;
    print!("{}", series_to_csv(&series));

    println!("\n6. As a JSON string (HTTP response body):");
    println!("{}", to_json_string(&series_to_csv(&series))?);

    println!("\n=== Report Complete ===");
    Ok(())
}
