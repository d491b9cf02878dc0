use rand::Rng;
use rand::seq::IndexedRandom;

use rs_predict_core::model::{build, build_from_file, CorpusMetrics, OrderMetrics};

const CORPUS: [&str; 6] = ["the", "cat", "sat", "the", "cat", "ran"];

#[test]
fn test_scenario_counts() {
	let tables = build(CORPUS);

	let unigrams: Vec<(&str, u64)> = tables.unigrams().iter().collect();
	assert_eq!(unigrams, [("the", 2), ("cat", 2), ("sat", 1), ("ran", 1)]);

	let bigrams: Vec<(&str, u64)> = tables.bigrams().iter().collect();
	assert_eq!(bigrams, [("the cat", 2), ("cat sat", 1), ("sat the", 1), ("cat ran", 1)]);

	let trigrams: Vec<(&str, u64)> = tables.trigrams().iter().collect();
	assert_eq!(trigrams, [("the cat sat", 1), ("cat sat the", 1), ("sat the cat", 1), ("the cat ran", 1)]);
}

#[test]
fn test_scenario_metrics() {
	let tables = build(CORPUS);
	let expected = CorpusMetrics::from_orders(
		OrderMetrics::new(6, 4),
		OrderMetrics::new(5, 4),
		OrderMetrics::new(4, 4),
	);
	assert_eq!(*tables.metrics(), expected);
	assert_eq!((expected.n, expected.v), (15, 12));
}

#[test]
fn test_build_is_deterministic() {
	assert_eq!(build(CORPUS), build(CORPUS));
}

#[test]
fn test_totals_match_window_counts() {
	let vocabulary = ["a", "b", "c", "d", "", "E"];
	let mut rng = rand::rng();

	for _ in 0..50 {
		let len = rng.random_range(0..200);
		let tokens: Vec<&str> = (0..len)
			.map(|_| *vocabulary.choose(&mut rng).unwrap())
			.collect();
		let present: Vec<bool> = tokens.iter().map(|t| !t.is_empty()).collect();

		let singles = present.iter().filter(|p| **p).count() as u64;
		let pairs = present.windows(2).filter(|w| w.iter().all(|p| *p)).count() as u64;
		let triples = present.windows(3).filter(|w| w.iter().all(|p| *p)).count() as u64;

		let tables = build(&tokens);
		assert_eq!(tables.unigrams().total(), singles);
		assert_eq!(tables.bigrams().total(), pairs);
		assert_eq!(tables.trigrams().total(), triples);
		assert_eq!(tables.metrics().n, singles + pairs + triples);
		assert!(tables.unigrams().get("E") == 0, "tokens must be lower-cased");
	}
}

#[test]
fn test_missing_token_file_is_an_error() {
	let path = std::env::temp_dir().join("rs-predict-missing").join("tokens.out");
	assert!(build_from_file(path).is_err());
}
