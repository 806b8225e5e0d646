use std::sync::Arc;
use std::thread;

use revenue_management::{
    CancellationFlag, Decision, DemandDistribution, EvaluatorConfig, EvaluatorError,
    ProblemEvaluator, ProblemRegistry, RevenueEvaluator, RevenueManagementProblem,
    INFEASIBLE_PENALTY,
};

fn evaluator(iterations: u64) -> RevenueEvaluator {
    RevenueEvaluator::new(EvaluatorConfig::default().with_iterations(iterations)).unwrap()
}

#[test]
fn infeasible_decisions_are_flagged_not_rejected() {
    let problem = RevenueManagementProblem::new(EvaluatorConfig::default().with_iterations(500)).unwrap();
    let cases: [[f64; 3]; 6] = [
        [50.0, 60.0, 10.0],
        [50.0, 20.0, 30.0],
        [101.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [10.0, -2.0, 0.0],
        [10.0, 5.0, -1.0],
    ];
    for case in cases {
        let result = problem.evaluate_candidate(&case).unwrap();
        assert!(!result.feasible, "{:?} should be infeasible", case);
        assert_eq!(result.mean_revenue, INFEASIBLE_PENALTY);
        assert_eq!(result.iterations, 0);
    }
}

#[test]
fn malformed_candidates_are_errors() {
    let problem = RevenueManagementProblem::new(EvaluatorConfig::default().with_iterations(500)).unwrap();
    for bad in [&[][..], &[1.0, 2.0][..], &[1.0, 2.0, 3.0, 4.0][..], &[1.5, 1.0, 0.0][..]] {
        assert!(matches!(
            problem.evaluate_candidate(bad),
            Err(EvaluatorError::InvalidDecision(_))
        ));
    }
}

#[test]
fn boundary_decision_is_feasible() {
    let result = evaluator(1_000).evaluate(&Decision::new(100, 100, 100));
    assert!(result.feasible);
    assert_eq!(result.iterations, 1_000);
}

#[test]
fn same_seed_is_bit_identical() {
    let decision = Decision::new(100, 50, 30);
    let a = evaluator(20_000).evaluate(&decision);
    let b = evaluator(20_000).evaluate(&decision);
    assert_eq!(a.mean_revenue.to_bits(), b.mean_revenue.to_bits());
}

#[test]
fn different_seeds_give_different_estimates() {
    let decision = Decision::new(100, 50, 30);
    let config = EvaluatorConfig::default().with_iterations(5_000);
    let a = RevenueEvaluator::new(config.clone().with_seed(1)).unwrap().evaluate(&decision);
    let b = RevenueEvaluator::new(config.with_seed(2)).unwrap().evaluate(&decision);
    assert_ne!(a.mean_revenue, b.mean_revenue);
}

#[test]
fn zero_purchase_scores_exactly_zero() {
    for seed in [1, 2, 99, 12_345] {
        let config = EvaluatorConfig::default().with_iterations(2_000).with_seed(seed);
        let result = RevenueEvaluator::new(config).unwrap().evaluate(&Decision::new(0, 0, 0));
        assert!(result.feasible);
        assert_eq!(result.mean_revenue, 0.0);
    }
}

#[test]
fn higher_purchase_price_lowers_revenue() {
    let decision = Decision::new(70, 30, 10);
    let mut previous = f64::INFINITY;
    for purchase_price in [0.0, 40.0, 80.0, 120.0] {
        let config = EvaluatorConfig {
            purchase_price,
            iterations: 5_000,
            ..EvaluatorConfig::default()
        };
        let revenue = RevenueEvaluator::new(config).unwrap().evaluate(&decision).mean_revenue;
        assert!(revenue < previous);
        previous = revenue;
    }
}

#[test]
fn more_iterations_reduce_spread_across_seeds() {
    let decision = Decision::new(100, 50, 30);
    let spread = |iterations: u64| {
        let estimates: Vec<f64> = (1..=20)
            .map(|seed| {
                let config = EvaluatorConfig::default().with_iterations(iterations).with_seed(seed);
                RevenueEvaluator::new(config).unwrap().evaluate(&decision).mean_revenue
            })
            .collect();
        let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
        estimates.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / estimates.len() as f64
    };
    assert!(spread(10_000) < spread(100));
}

#[test]
fn reference_point_lands_near_published_value() {
    // The reference decision [100, 50, 30] is quoted at about 4741.
    let result = evaluator(200_000).evaluate(&Decision::new(100, 50, 30));
    assert!((result.mean_revenue - 4_741.0).abs() < 150.0, "got {}", result.mean_revenue);
}

#[test]
fn concurrent_evaluations_match_sequential() {
    let problem = Arc::new(
        RevenueManagementProblem::new(EvaluatorConfig::default().with_iterations(5_000)).unwrap(),
    );
    let decisions = [
        Decision::new(100, 50, 30),
        Decision::new(60, 20, 5),
        Decision::new(30, 30, 30),
        Decision::new(90, 0, 0),
    ];
    let sequential: Vec<f64> = decisions
        .iter()
        .map(|d| problem.evaluate(d).mean_revenue)
        .collect();

    let handles: Vec<_> = decisions
        .iter()
        .copied()
        .map(|d| {
            let problem = Arc::clone(&problem);
            thread::spawn(move || problem.evaluate(&d).mean_revenue)
        })
        .collect();
    let concurrent: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, concurrent);
}

#[test]
fn partitioned_evaluation_is_reproducible() {
    let decision = Decision::new(100, 50, 30);
    let config = EvaluatorConfig::default().with_iterations(40_000).with_partitions(8);
    let a = RevenueEvaluator::new(config.clone()).unwrap().evaluate(&decision);
    let b = RevenueEvaluator::new(config).unwrap().evaluate(&decision);
    assert_eq!(a.mean_revenue.to_bits(), b.mean_revenue.to_bits());
    assert_eq!(a.iterations, 40_000);
}

#[test]
fn cancellation_from_another_thread_stops_early() {
    let evaluator = Arc::new(evaluator(u64::MAX / 2));
    let flag = CancellationFlag::new();
    let worker = {
        let evaluator = Arc::clone(&evaluator);
        let flag = flag.clone();
        thread::spawn(move || evaluator.evaluate_with_cancellation(&Decision::new(100, 50, 30), &flag))
    };
    thread::sleep(std::time::Duration::from_millis(50));
    flag.cancel();
    let result = worker.join().unwrap();
    assert!(result.cancelled);
    assert!(result.feasible);
    assert!(result.iterations < u64::MAX / 2);
}

#[test]
fn poisson_demand_is_supported_end_to_end() {
    let config = EvaluatorConfig {
        demand: DemandDistribution::from_family("poisson", &[40.0, 20.0, 25.0]).unwrap(),
        iterations: 5_000,
        ..EvaluatorConfig::default()
    };
    let result = RevenueEvaluator::new(config).unwrap().evaluate(&Decision::new(80, 40, 20));
    assert!(result.feasible);
    // At most 80 units sold at the highest price, minus the purchase bill.
    assert!(result.mean_revenue <= 80.0 * 400.0 - 80.0 * 80.0);
    assert!(result.mean_revenue > -80.0 * 80.0);
}

#[test]
fn registry_exposes_descriptor() {
    let problem = ProblemRegistry::with_defaults()
        .create("revenue_management", EvaluatorConfig::default().with_iterations(10))
        .unwrap();
    let descriptor = problem.descriptor();
    assert_eq!(descriptor.lower_bound, 0);
    assert_eq!(descriptor.upper_bound, 100);
    assert!(descriptor.keywords.iter().any(|k| k == "monte carlo"));
}
