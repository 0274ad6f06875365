//! Benchmarks for docstore record operations

use criterion::{criterion_group, criterion_main, Criterion};
use docstore::Store;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
}

fn store_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_path(temp_dir.path()).unwrap();
    let users = store.collection("users");
    let user = User { name: "bench".to_string(), age: 42 };

    c.bench_function("write_single_key", |b| {
        b.iter(|| users.write("bench", &user).unwrap())
    });

    c.bench_function("read_single_key", |b| {
        b.iter(|| {
            let _: User = users.read("bench").unwrap();
        })
    });

    for i in 0..100 {
        users.write(&format!("user{}", i), &user).unwrap();
    }
    c.bench_function("read_all_100", |b| b.iter(|| users.read_all().unwrap()));
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
