use std::sync::Arc;

use bill_query::{
    config::QueryConfig,
    core::{BillQueryService, SystemClock},
    domain::{Category, LedgerRecord},
    ledger::InMemoryLedger,
};
use chrono::{Duration, Local};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const QUERIES: &[&str] = &[
    "花了多少钱",
    "上个月在星巴克花了多少",
    "餐饮消费多少",
    "超过100元的消费",
    "50到200元之间",
    "消费趋势",
    "随便说点什么",
];

fn synthetic_ledger(size: u64) -> InMemoryLedger {
    let now = Local::now().naive_local();
    let records = (1..=size)
        .map(|id| {
            let category = Category::ALL[(id as usize) % Category::ALL.len()];
            LedgerRecord::new(
                id,
                1,
                now - Duration::hours(id as i64),
                (id % 500) as f64 + 1.5,
                format!("商户{}", id % 40),
                category,
            )
        })
        .collect();
    InMemoryLedger::from_records(records).expect("synthetic records are valid")
}

fn bench_parse(c: &mut Criterion) {
    let service = BillQueryService::new(
        QueryConfig::default(),
        Arc::new(InMemoryLedger::new()),
        Arc::new(SystemClock),
    );
    c.bench_function("parse_query", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(service.parse_query(black_box(query)));
            }
        })
    });
}

fn bench_ask(c: &mut Criterion) {
    let service = BillQueryService::new(
        QueryConfig::default(),
        Arc::new(synthetic_ledger(5_000)),
        Arc::new(SystemClock),
    );
    c.bench_function("ask_5k_records", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(service.ask(black_box(query), 1).ok());
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_ask);
criterion_main!(benches);
