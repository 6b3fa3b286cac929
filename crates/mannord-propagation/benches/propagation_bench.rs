use criterion::{criterion_group, criterion_main, Criterion};

use mannord_core::models::{EvidencePair, NodeKey, UserPrior};
use mannord_core::traits::IPropagationEngine;
use mannord_propagation::{BetaPercentile, DirichletEngine, KargerEngine};

/// 200 users, 100 items, 5 votes per user; one spammer ring of 20 users.
fn populate<E: IPropagationEngine>(engine: &mut E, prior: UserPrior) {
    for u in 0..200u32 {
        let ring = u < 20;
        for j in 0..5u32 {
            let item = (u * 7 + j * 13) % 100;
            let honest = if item % 10 == 0 { -1.0 } else { 1.0 };
            let answer = if ring { -honest } else { honest };
            engine.add_vote(
                NodeKey::User(format!("u{u}").into()),
                format!("it{item}").into(),
                answer,
                prior,
            );
        }
    }
}

fn bench_karger_full_run(c: &mut Criterion) {
    c.bench_function("karger_200u_100i_k10", |b| {
        b.iter(|| {
            let mut engine = KargerEngine::default();
            populate(&mut engine, UserPrior::default());
            engine.compute_all(10).unwrap()
        })
    });
}

fn bench_dirichlet_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("dirichlet");
    group.sample_size(10);
    group.bench_function("dirichlet_200u_100i_k3", |b| {
        b.iter(|| {
            let mut engine = DirichletEngine::default();
            populate(&mut engine, UserPrior::evidence(EvidencePair::new(0.0, 1.0)));
            engine.compute_all(3).unwrap()
        })
    });
    group.finish();
}

fn bench_beta_percentile(c: &mut Criterion) {
    let stat = BetaPercentile::default();
    c.bench_function("beta_percentile_single", |b| {
        b.iter(|| stat.percentile_point(-3.5, 12.25).unwrap())
    });
}

criterion_group!(
    benches,
    bench_karger_full_run,
    bench_dirichlet_full_run,
    bench_beta_percentile
);
criterion_main!(benches);
