//! Benchmarks for the search operations of the intrusive red-black tree.
//!
//! This benchmark tests the performance of exact and nearest-key lookups in a tree filled with random keys, for
//! 32bit and 384bit keys.
//!
//! ## Benchmark execution
//!
//! Running this exact benchmark can be done with the following command:
//!
//! `> cargo make bench -p patina_intrusive_rbt --bench bench_search`
//!
//! If you wish to run a subset of benchmarks in this file, you can filter them by name:
//!
//! `> cargo make bench -p patina_intrusive_rbt --bench bench_search -- <filter>`
//!
//! ## Examples
//!
//! ```bash
//! > cargo make bench -p patina_intrusive_rbt --bench bench_search -- nearest
//! > cargo make bench -p patina_intrusive_rbt --bench bench_search -- 384bit
//! > cargo make bench -p patina_intrusive_rbt --bench bench_search
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use patina_intrusive_rbt::{Links, Rbt, intrusive_adapter};
use rand::Rng;
use ruint::Uint;
use std::{collections::HashSet, hash::Hash};

const MAX_SIZE: usize = 4096;

type U384 = Uint<384, 6>;

struct Entry<K> {
    key: K,
    links: Links,
}

intrusive_adapter!(struct Entry32 for Entry<u32> { links: links, key: key: u32 });
intrusive_adapter!(struct Entry384 for Entry<U384> { links: links, key: key: U384 });

fn random_numbers<D>(min: D, max: D) -> Vec<D>
where
    D: Copy + Eq + std::cmp::PartialOrd + Hash + rand::distributions::uniform::SampleUniform,
{
    let mut rng = rand::thread_rng();
    let mut nums: HashSet<D> = HashSet::new();
    while nums.len() < MAX_SIZE {
        let num: D = rng.gen_range(min..=max);
        nums.insert(num);
    }
    nums.into_iter().collect()
}

fn entries<K: Copy>(keys: &[K]) -> Vec<Entry<K>> {
    keys.iter().map(|&key| Entry { key, links: Links::new() }).collect()
}

fn benchmark_search_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    // RBT 32bit
    let nums = random_numbers::<u32>(0, 100_000);
    let records = entries(&nums);
    let mut rbt: Rbt<Entry32> = Rbt::new(&records);
    for record in &records {
        rbt.add(record).unwrap();
    }
    group.bench_with_input(BenchmarkId::new("rbt", "32bit"), &rbt, |b, rbt| {
        b.iter(|| {
            for i in &nums {
                rbt.get(i).unwrap();
            }
        })
    });
    group.bench_with_input(BenchmarkId::new("rbt_nearest", "32bit"), &rbt, |b, rbt| {
        b.iter(|| {
            for i in &nums {
                std::hint::black_box(rbt.lt(i));
                std::hint::black_box(rbt.gt(i));
            }
        })
    });

    // RBT 384bit
    let nums: Vec<U384> = nums.iter().map(|&n| Uint::from(n)).collect();
    let records = entries(&nums);
    let mut rbt: Rbt<Entry384> = Rbt::new(&records);
    for record in &records {
        rbt.add(record).unwrap();
    }
    group.bench_with_input(BenchmarkId::new("rbt", "384bit"), &rbt, |b, rbt| {
        b.iter(|| {
            for i in &nums {
                rbt.get(i).unwrap();
            }
        })
    });
    group.bench_with_input(BenchmarkId::new("rbt_nearest", "384bit"), &rbt, |b, rbt| {
        b.iter(|| {
            for i in &nums {
                std::hint::black_box(rbt.lt(i));
                std::hint::black_box(rbt.gt(i));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_search_function);
criterion_main!(benches);
