use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::repository::mock::MockAccountRepository;
use service::auth::repository::AccountRepository;
use service::auth::{hash_password, AuthService, PASSWORD_ALGORITHM};

fn bench_authenticate(c: &mut Criterion) {
    let repo = Arc::new(MockAccountRepository::default());
    let rt = tokio::runtime::Runtime::new().unwrap();

    // pre-create the account outside of the benchmark
    let hash = hash_password("Benchmark1").unwrap();
    rt.block_on(repo.create("bench", &hash, PASSWORD_ALGORITHM)).unwrap();
    let svc = AuthService::new(repo);

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.authenticate("bench", "Benchmark1")).unwrap();
        });
    });
}

criterion_group!(benches, bench_authenticate);
criterion_main!(benches);
