//! Benchmarks for plan recomputation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planner_core::types::{InputField, RawInputs, RiskMode};
use planner_risk::{compute_position_sizing, compute_stop_loss, PlannerConfig, TradePlanner};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_inputs() -> RawInputs {
    RawInputs::new()
        .with_field(InputField::PortfolioValue, "250000")
        .with_field(InputField::EntryPrice, "187.42")
        .with_field(InputField::AtrPercentage, "3.8")
        .with_field(InputField::LowOfDay, "181.10")
        .with_field(InputField::ProfitRatio, "2.5")
        .with_field(InputField::RiskPercentage, "1")
}

fn benchmark_stop_loss(c: &mut Criterion) {
    c.bench_function("stop_loss", |b| {
        b.iter(|| compute_stop_loss(black_box(dec!(187.42)), black_box(dec!(3.8)), black_box(dec!(181.10))))
    });
}

fn benchmark_position_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_table");

    for rows in [4usize, 20, 100].iter() {
        let allocations: Vec<Decimal> = (1..=*rows).map(Decimal::from).collect();

        group.bench_with_input(BenchmarkId::from_parameter(rows), &allocations, |b, allocations| {
            b.iter(|| {
                compute_position_sizing(
                    black_box(dec!(250000)),
                    black_box(dec!(187.42)),
                    black_box(dec!(180.30)),
                    black_box(allocations),
                )
            })
        });
    }

    group.finish();
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let inputs = sample_inputs();

    for mode in [RiskMode::AllocationTable, RiskMode::FixedRisk] {
        let planner = TradePlanner::new(PlannerConfig {
            mode,
            ..PlannerConfig::default()
        });

        group.bench_with_input(BenchmarkId::from_parameter(mode), &inputs, |b, inputs| {
            b.iter(|| planner.evaluate(black_box(inputs)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_stop_loss, benchmark_position_table, benchmark_evaluate);
criterion_main!(benches);
