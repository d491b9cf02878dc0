use rs_predict_core::model::{build, QueryEngine, CONTINUATION_LENGTH, NOT_RECOGNIZED};

fn engine() -> QueryEngine {
	QueryEngine::new(build(["the", "cat", "sat", "the", "cat", "ran"]))
}

#[test]
fn test_bigram_sentence_continues_with_first_observed_extension() {
	let result = engine().bigram_sentence("the cat").unwrap();

	assert!(result.is_recognized());
	assert_eq!(result.words().len(), CONTINUATION_LENGTH);
	assert_eq!(result.words()[..4], ["sat", "the", "cat", "sat"]);

	// log10(3/15) + 4 * log10(2/14) + 3 * log10(2/13) + 3 * log10(3/14)
	let expected = 0.2f64.log10()
		+ 4.0 * (2.0f64 / 14.0).log10()
		+ 3.0 * (2.0f64 / 13.0).log10()
		+ 3.0 * (3.0f64 / 14.0).log10();
	assert!((result.log_probability().unwrap() - expected).abs() < 1e-9);
	assert_eq!(
		result.to_string(),
		"sat the cat sat the cat sat the cat sat -8.53"
	);
}

#[test]
fn test_trigram_sentence_follows_trigrams() {
	let result = engine().trigram_sentence("The Cat").unwrap();

	assert!(result.is_recognized());
	assert_eq!(result.words()[..3], ["sat", "the", "cat"]);
	// every step is a known trigram with probability 1/2 or 1
	let expected = 4.0 * 0.5f64.log10();
	assert!((result.log_probability().unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_trigram_sentence_backs_off_to_bigrams() {
	// "sat ran" has no trigram nor bigram continuation
	let result = engine().trigram_sentence("sat ran").unwrap();
	assert!(result.words().is_empty());
	assert_eq!(result.to_string(), NOT_RECOGNIZED);

	// "ran cat" has no trigram, the bigram model extends "cat"
	let result = engine().trigram_sentence("ran cat").unwrap();
	assert_eq!(result.words()[0], "sat");
	assert!(result.is_recognized());
}

#[test]
fn test_dead_end_stops_early() {
	let result = engine().bigram_sentence("cat ran").unwrap();
	assert!(!result.is_recognized());
	assert!(result.words().is_empty());
	assert_eq!(result.to_string(), "N-gram not recognized.");
}

#[test]
fn test_unknown_word_is_not_a_fault() {
	let engine = engine();
	for query in ["zebra", "zebra zebra", "the zebra"] {
		let result = engine.bigram_sentence(query).unwrap();
		assert!(result.words().len() <= CONTINUATION_LENGTH);
		assert!(result.to_string().ends_with(NOT_RECOGNIZED));
	}
	let result = engine.trigram_sentence("zebra zebra").unwrap();
	assert_eq!(result.to_string(), NOT_RECOGNIZED);
}

#[test]
fn test_bigram_log_prob_is_finite() {
	let engine = engine();
	let words = ["the", "cat", "sat", "ran", "dog", ""];
	for w1 in words {
		for w2 in words {
			let log = engine.bigram_log_prob(w1, w2);
			assert!(log.is_finite());
			assert!(log <= 0.0);
		}
	}
}

#[test]
fn test_trigram_log_prob_undefined_exactly_when_unknown() {
	let engine = engine();
	let tables = engine.tables();
	let words = ["the", "cat", "sat", "ran", "dog"];
	for w1 in words {
		for w2 in words {
			for w3 in words {
				let known = tables.trigrams().contains(&format!("{w1} {w2} {w3}"))
					&& tables.bigrams().contains(&format!("{w1} {w2}"));
				let log = engine.trigram_log_prob(w1, w2, w3);
				assert_eq!(log == f64::NEG_INFINITY, !known, "{w1} {w2} {w3}");
			}
		}
	}
}

#[test]
fn test_continuation_never_exceeds_horizon() {
	// a self loop never dead-ends
	let engine = QueryEngine::new(build(["a", "a", "a"]));
	let result = engine.bigram_sentence("a").unwrap();
	assert_eq!(result.words().len(), CONTINUATION_LENGTH);
	let result = engine.trigram_sentence("a a").unwrap();
	assert_eq!(result.words().len(), CONTINUATION_LENGTH);
}

#[test]
fn test_partial_continuation_ends_with_marker() {
	let engine = QueryEngine::new(build(["a", "b", "c"]));

	let result = engine.bigram_sentence("a").unwrap();
	assert_eq!(result.words(), ["b", "c"]);
	assert!(!result.is_recognized());
	assert_eq!(result.to_string(), "b c N-gram not recognized.");

	// "a b" → "c" by trigram, then "b c" falls back to bigrams and dead-ends on "c"
	let result = engine.trigram_sentence("a b").unwrap();
	assert_eq!(result.to_string(), "c N-gram not recognized.");
}
