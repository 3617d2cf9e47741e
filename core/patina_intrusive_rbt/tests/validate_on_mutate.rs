//! Random insertions and removals with the red-black invariants checked after every mutation.
//!
//! Only built with the `validate-on-mutate` feature:
//!
//! `> cargo test -p patina_intrusive_rbt --features validate-on-mutate --test validate_on_mutate`
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use patina_intrusive_rbt::{Links, Rbt, intrusive_adapter};
use rand::{Rng, SeedableRng, rngs::StdRng};

const KEY_SPACE: u32 = 2_000;
const ROUNDS: usize = 20_000;

struct Span {
    start: u32,
    links: Links,
}

intrusive_adapter!(struct SpanAdapter for Span { links: links, key: start: u32 });

fn spans() -> Vec<Span> {
    (0..KEY_SPACE).map(|start| Span { start, links: Links::new() }).collect()
}

#[test]
fn random_mutations_keep_invariants() {
    let spans = spans();
    let mut rbt: Rbt<SpanAdapter> = Rbt::new(&spans);
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..ROUNDS {
        let start = rng.gen_range(0..KEY_SPACE);
        match rng.gen_range(0..4) {
            0 => {
                rbt.pop_min();
            }
            1 => {
                rbt.pop_max();
            }
            _ => {
                if rbt.remove(&start).is_none() {
                    rbt.add(&spans[start as usize]).unwrap();
                }
            }
        }
    }

    assert_eq!(rbt.validate(), Ok(()));
    while let Some(span) = rbt.pop_min() {
        assert!(!span.links.is_linked());
    }
    assert!(rbt.is_empty());
}

#[test]
fn interleaved_trees_keep_invariants() {
    let spans = spans();
    let (low, high) = spans.split_at(spans.len() / 2);
    let mut whole: Rbt<SpanAdapter> = Rbt::new(&spans);
    let mut lower: Rbt<SpanAdapter> = Rbt::new(low);
    let mut upper: Rbt<SpanAdapter> = Rbt::new(high);

    for (idx, span) in spans.iter().enumerate() {
        match idx % 3 {
            0 => whole.add(span).unwrap(),
            _ if idx < low.len() => lower.add(span).unwrap(),
            _ => upper.add(span).unwrap(),
        };
    }

    for span in &spans {
        let owner = [whole.remove_record(span), lower.remove_record(span), upper.remove_record(span)];
        assert_eq!(owner.iter().filter(|removed| removed.is_ok()).count(), 1);
    }
    assert!(whole.is_empty() && lower.is_empty() && upper.is_empty());
}
