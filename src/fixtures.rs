//! Deterministic dummy tables for tests and benchmarks.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde_json::{Value, json};

use crate::table::Table;

const RELATION_KINDS: usize = 5;
const WORDS: [&str; 8] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "Rupert", "Everett", "John",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TripleKind {
    /// Entity tails, `rel{k}` relations.
    Relation,
    /// Literal tails (text, numbers, tagged values), `attr{k}` relations.
    Attribute,
}

pub fn entity_ids(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("e{idx}")).collect()
}

/// `count` triples over the entities `e0..e{count-1}`.
pub fn dummy_triples(count: usize, kind: TripleKind, seed: u64) -> Table {
    dummy_triples_for(&entity_ids(count.max(1)), count, kind, seed)
}

/// `count` triples whose heads (and entity tails) are drawn from `ids`.
pub fn dummy_triples_for(ids: &[String], count: usize, kind: TripleKind, seed: u64) -> Table {
    assert!(!ids.is_empty(), "entity ids must not be empty");
    let mut rng = StdRng::seed_from_u64(seed);
    let triples: Vec<(Value, Value, Value)> = (0..count)
        .map(|_| {
            let head = pick(ids, &mut rng);
            let k = rng.gen_range(0..RELATION_KINDS);
            match kind {
                TripleKind::Relation => {
                    (json!(head), json!(format!("rel{k}")), json!(pick(ids, &mut rng)))
                }
                TripleKind::Attribute => {
                    (json!(head), json!(format!("attr{k}")), literal(&mut rng))
                }
            }
        })
        .collect();
    Table::from_triples(triples)
}

/// A `rows` x `cols` table of small integers, for shapes other than triples.
pub fn dummy_table(rows: usize, cols: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels: Vec<String> = (0..cols).map(|idx| format!("c{idx}")).collect();
    let cells = (0..rows)
        .map(|_| (0..cols).map(|_| json!(rng.gen_range(0..100))).collect())
        .collect();
    Table::new(labels, cells).expect("rows are built with one cell per column")
}

fn pick(ids: &[String], rng: &mut StdRng) -> String {
    ids.choose(rng).cloned().unwrap_or_default()
}

fn literal(rng: &mut StdRng) -> Value {
    let first = WORDS[rng.gen_range(0..WORDS.len())];
    let second = WORDS[rng.gen_range(0..WORDS.len())];
    match rng.gen_range(0..5) {
        0 => json!(format!("{first} {second}")),
        1 => json!(format!("\"{first} {second}\"^^xsd:string")),
        2 => json!(rng.gen_range(0..1000)),
        3 => json!(rng.r#gen::<f64>()),
        _ => json!(format!(
            "\"{}-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
            rng.gen_range(1900..2024)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        let a = dummy_triples(20, TripleKind::Attribute, 7);
        let b = dummy_triples(20, TripleKind::Attribute, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn relation_tails_are_entities() {
        let ids = entity_ids(4);
        let table = dummy_triples_for(&ids, 30, TripleKind::Relation, 1);
        for row in 0..table.len() {
            let tail = table.text(row, 2).unwrap();
            assert!(ids.iter().any(|id| id == tail));
        }
    }

    #[test]
    fn dummy_table_has_requested_shape() {
        let table = dummy_table(10, 5, 3);
        assert_eq!((table.len(), table.width()), (10, 5));
    }
}
