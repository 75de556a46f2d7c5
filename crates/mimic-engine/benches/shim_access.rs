use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mimic_engine::{
    introspect_methods, object_ref, Introspect, MetadataCache, Shim, ShimOptions, Value,
};

#[derive(Introspect, Default)]
#[introspect(methods)]
struct Account {
    #[introspect(rename = "Owner")]
    pub owner: String,
    #[introspect(rename = "Balance")]
    pub balance: i64,
}

#[introspect_methods]
impl Account {
    #[introspect(rename = "Deposit")]
    pub fn deposit(&mut self, amount: i64, memo: String) -> i64 {
        self.balance += amount;
        black_box(memo);
        self.balance
    }
}

#[derive(Introspect, Default)]
#[introspect(duck)]
struct AccountDuck {
    #[introspect(rename = "_Balance")]
    balance: i64,
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("cold_cache", |b| {
        b.iter(|| {
            let cache = MetadataCache::new();
            Shim::new(object_ref(Account::default()), black_box(&cache))
        });
    });

    let cache = MetadataCache::new();
    Shim::new(object_ref(Account::default()), &cache);
    group.bench_function("warm_cache", |b| {
        b.iter(|| Shim::new(object_ref(Account::default()), black_box(&cache)));
    });

    group.finish();
}

fn bench_property_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_property");
    let cache = MetadataCache::new();

    for (label, options, name) in [
        ("exact", ShimOptions::exact(), "Balance"),
        ("fuzzy", ShimOptions::fuzzy(), "bAlAnCe"),
    ] {
        let shim = Shim::with_options(object_ref(Account::default()), &cache, options);
        group.bench_with_input(BenchmarkId::new(label, name), &name, |b, name| {
            b.iter(|| shim.get_property(black_box(name)).unwrap());
        });
    }

    let duck = Shim::new(object_ref(AccountDuck::default()), &cache);
    group.bench_function("synthesized", |b| {
        b.iter(|| duck.get_property(black_box("Balance")).unwrap());
    });

    group.finish();
}

fn bench_call_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("call");
    let cache = MetadataCache::new();

    let exact = Shim::new(object_ref(Account::default()), &cache);
    group.bench_function("in_order", |b| {
        b.iter(|| {
            exact
                .call("Deposit", vec![Value::I64(1), Value::str("memo")])
                .unwrap()
        });
    });

    let fuzzy = Shim::with_options(object_ref(Account::default()), &cache, ShimOptions::fuzzy());
    group.bench_function("reordered", |b| {
        b.iter(|| {
            fuzzy
                .call("deposit", vec![Value::str("memo"), Value::I64(1)])
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_property_access,
    bench_call_through
);
criterion_main!(benches);
