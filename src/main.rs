use rand::rngs::SmallRng;
use rand::SeedableRng;
use revenue_management::io::reporting::{self, EvaluationRecord};
use revenue_management::problem::registry::REVENUE_MANAGEMENT;
use revenue_management::{Decision, EvaluatorConfig, ProblemRegistry};
use std::env;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revenue_management=info,info".into()),
        )
        .init();

    println!("=== Revenue Management Monte Carlo Evaluator ===");

    // 1. SETUP CONFIGURATION
    // An optional JSON file overrides the built-in economics.
    let config = match env::args().nth(1) {
        Some(path) => match EvaluatorConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EvaluatorConfig::default(),
    };
    info!(
        seed = config.seed,
        iterations = config.iterations,
        family = config.demand.family(),
        partitions = config.partitions,
        "configuration loaded"
    );
    let candidate_seed = config.seed;

    // 2. BUILD THE PROBLEM
    let registry = ProblemRegistry::with_defaults();
    let problem = match registry.create(REVENUE_MANAGEMENT, config) {
        Ok(problem) => problem,
        Err(e) => {
            error!("failed to build evaluator: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Problem: {}", problem.descriptor().description);

    // 3. CHOOSE CANDIDATES
    // A known reference point, both corners of the box, one infeasible point
    // and a few random feasible ones.
    let mut candidates = vec![
        Decision::new(100, 50, 30),
        Decision::new(0, 0, 0),
        Decision::new(100, 100, 100),
        Decision::new(50, 60, 10),
    ];
    let mut rng = SmallRng::seed_from_u64(candidate_seed);
    for _ in 0..5 {
        candidates.push(problem.random_solution(&mut rng));
    }

    // 4. EVALUATE
    let mut records = Vec::with_capacity(candidates.len());
    for decision in &candidates {
        let result = problem.evaluate(decision);
        if result.feasible {
            println!(
                "{:?}: mean revenue ${:.2} over {} trials",
                decision.as_array(),
                result.mean_revenue,
                result.iterations
            );
        } else {
            println!("{:?}: infeasible", decision.as_array());
        }
        records.push(EvaluationRecord::new(decision, &result));
    }

    // 5. EXPORT RESULTS
    let output_file = "evaluation_results.csv";
    match reporting::write_evaluation_log(output_file, &records) {
        Ok(_) => println!("Success! Data written to ./{}", output_file),
        Err(e) => error!(path = output_file, "failed to write CSV: {}", e),
    }

    // 6. BEST CANDIDATE
    if let Some(best) = records
        .iter()
        .filter(|r| r.feasible)
        .max_by(|a, b| a.mean_revenue.total_cmp(&b.mean_revenue))
    {
        println!(
            "\nBest candidate: [{}, {}, {}] at ${:.2}",
            best.purchase, best.reserve_period2, best.reserve_period3, best.mean_revenue
        );
    }

    ExitCode::SUCCESS
}
