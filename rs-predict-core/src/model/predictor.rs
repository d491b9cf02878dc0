use log::debug;

use crate::config::DataLayout;
use crate::error::{NgramError, Result};
use super::continuation::{Continuation, CONTINUATION_LENGTH};
use super::index::PrefixIndex;
use super::metrics::CorpusMetrics;
use super::node::Node;
use super::table::ngram_key;
use super::tables::NGramTables;

/// Splits a query into lower-cased tokens on single spaces.
///
/// Empty pieces (leading, trailing or repeated spaces) are dropped.
pub fn tokenize_query(line: &str) -> Vec<String> {
	line.split(' ')
		.map(str::trim)
		.filter(|token| !token.is_empty())
		.map(str::to_lowercase)
		.collect()
}

/// Query engine over a read-only set of n-gram tables.
///
/// Scores word sequences with a smoothed bigram model or an unsmoothed
/// trigram model backing off to bigrams, and greedily extends them by
/// `CONTINUATION_LENGTH` words.
///
/// # Responsibilities
/// - Estimate bigram / trigram log-probabilities (base 10)
/// - Find the most likely next word after one or two words (argmax)
/// - Answer `bigram_sentence` / `trigram_sentence` queries
///
/// # Notes
/// - Argmax searches scan candidates in first-observed training order and
///   keep the first candidate reaching the maximum (strict `>`), so output
///   is reproducible.
/// - The engine holds no mutable state: a shared reference can serve
///   concurrent queries.
#[derive(Debug)]
pub struct QueryEngine {
	tables: NGramTables,
	index: PrefixIndex,
}

impl QueryEngine {
	/// Wraps built or loaded tables and indexes their prefixes.
	pub fn new(tables: NGramTables) -> Self {
		let index = PrefixIndex::new(tables.bigrams(), tables.trigrams());
		Self { tables, index }
	}

	/// Loads the tables described by `layout` and builds an engine on them.
	pub fn load(layout: &DataLayout) -> Result<Self> {
		Ok(Self::new(NGramTables::load(layout)?))
	}

	pub fn tables(&self) -> &NGramTables {
		&self.tables
	}

	pub fn metrics(&self) -> &CorpusMetrics {
		self.tables.metrics()
	}

	/// Global `V`, the additive smoothing constant.
	fn v(&self) -> f64 {
		self.metrics().v as f64
	}

	/// Smoothed bigram log-probability of `w2` following `w1`.
	///
	/// `log10((count(w1 w2) + 1) / (count(w1) + V + 1))`
	///
	/// Always finite and <= 0, even for pairs never observed.
	pub fn bigram_log_prob(&self, w1: &str, w2: &str) -> f64 {
		let pair = self.tables.bigrams().get(&ngram_key(&[w1, w2])) as f64;
		let first = self.tables.unigrams().get(w1) as f64;
		((pair + 1.0) / (first + self.v() + 1.0)).log10()
	}

	/// Unsmoothed trigram log-probability of `w3` following `w1 w2`.
	///
	/// `log10(count(w1 w2 w3) / count(w1 w2))`, or `NEG_INFINITY` when the
	/// trigram or its supporting bigram is unknown.
	pub fn trigram_log_prob(&self, w1: &str, w2: &str, w3: &str) -> f64 {
		let triple = self.tables.trigrams().get(&ngram_key(&[w1, w2, w3]));
		let pair = self.tables.bigrams().get(&ngram_key(&[w1, w2]));
		if triple == 0 || pair == 0 {
			return f64::NEG_INFINITY;
		}
		(triple as f64 / pair as f64).log10()
	}

	/// Keeps the first candidate with the highest score.
	fn argmax<'a, I, F>(candidates: I, score: F) -> Option<Node>
	where
		I: IntoIterator<Item = &'a str>,
		F: Fn(&str) -> f64,
	{
		let mut best: Option<Node> = None;
		let mut max = f64::NEG_INFINITY;
		for candidate in candidates {
			let log = score(candidate);
			if log > max {
				max = log;
				best = Some(Node::new(candidate, log));
			}
		}
		best
	}

	/// Most frequent unigram, scored `log10(count / N)` with the global `N`.
	///
	/// Returns `None` on an empty model.
	pub fn unigram_mle(&self) -> Option<Node> {
		let unigrams = self.tables.unigrams();
		let n = self.metrics().n as f64;
		Self::argmax(unigrams.iter().map(|(word, _)| word), |word| {
			(unigrams.get(word) as f64 / n).log10()
		})
	}

	/// Most likely word after `w1` according to the smoothed bigrams.
	///
	/// Candidates are scored `log10((count(w1 x) + 1) / (count(w1) + V))`.
	/// Returns `None` if no bigram starts with `w1`.
	pub fn bigram_mle(&self, w1: &str) -> Option<Node> {
		let bigrams = self.tables.bigrams();
		let denominator = self.tables.unigrams().get(w1) as f64 + self.v();
		Self::argmax(self.index.after_word(w1).iter().map(String::as_str), |next| {
			((bigrams.get(&ngram_key(&[w1, next])) as f64 + 1.0) / denominator).log10()
		})
	}

	/// Most likely word after `w1 w2` according to the trigrams.
	///
	/// Candidates are scored `log10(count(w1 w2 x) / count(w1 w2))`.
	/// Returns `None` if no trigram starts with `w1 w2`.
	pub fn trigram_mle(&self, w1: &str, w2: &str) -> Option<Node> {
		let trigrams = self.tables.trigrams();
		let pair = self.tables.bigrams().get(&ngram_key(&[w1, w2])) as f64;
		Self::argmax(self.index.after_pair(w1, w2).iter().map(String::as_str), |next| {
			(trigrams.get(&ngram_key(&[w1, w2, next])) as f64 / pair).log10()
		})
	}

	/// Sum of the smoothed bigram log-probabilities of every adjacent pair.
	pub fn bigram_sequence_log_prob(&self, tokens: &[String]) -> f64 {
		tokens
			.windows(2)
			.map(|pair| self.bigram_log_prob(&pair[0], &pair[1]))
			.sum()
	}

	/// Trigram log-probability of a sequence with backoff.
	///
	/// Each window `w1 w2 w3` adds its trigram log-probability, or the
	/// smoothed bigram log-probability of its leading pair `w1 w2` when the
	/// trigram is unknown. When the last window backed off, the last pair of
	/// the sequence is added with the bigram model so every pair is scored.
	pub fn trigram_sequence_log_prob(&self, tokens: &[String]) -> f64 {
		let mut total = 0.0;
		let mut backed_off = false;

		for window in tokens.windows(3) {
			let (w1, w2, w3) = (&window[0], &window[1], &window[2]);
			let trigram = self.trigram_log_prob(w1, w2, w3);
			if trigram == f64::NEG_INFINITY {
				total += self.bigram_log_prob(w1, w2);
				backed_off = true;
			} else {
				total += trigram;
				backed_off = false;
			}
		}

		if backed_off {
			if let [.., w1, w2] = tokens {
				total += self.bigram_log_prob(w1, w2);
			}
		}
		total
	}

	/// Greedily extends `last` with the best bigram continuation.
	///
	/// Stops after `CONTINUATION_LENGTH` words, or as soon as no bigram
	/// starts with the current word.
	pub fn bigram_continuation(&self, last: &str, log_probability: f64) -> Continuation {
		let mut words: Vec<String> = Vec::with_capacity(CONTINUATION_LENGTH);
		let mut total = log_probability;

		for _ in 0..CONTINUATION_LENGTH {
			let current = words.last().map_or(last, String::as_str);
			let Some(node) = self.bigram_mle(current) else {
				debug!("no bigram starts with '{current}'");
				return Continuation::unrecognized(words);
			};
			total += node.log_probability();
			words.push(node.into_word());
		}

		Continuation::complete(words, total)
	}

	/// Greedily extends `w1 w2` with the best trigram continuation, falling
	/// back to the best bigram continuation of `w2` alone.
	///
	/// Stops after `CONTINUATION_LENGTH` words, or as soon as neither model
	/// knows a continuation.
	pub fn trigram_continuation(&self, w1: &str, w2: &str, log_probability: f64) -> Continuation {
		let mut words: Vec<String> = Vec::with_capacity(CONTINUATION_LENGTH);
		let mut total = log_probability;
		let mut context = (w1.to_owned(), w2.to_owned());

		for _ in 0..CONTINUATION_LENGTH {
			let (first, second) = &context;
			let node = self.trigram_mle(first, second).or_else(|| {
				debug!("no trigram starts with '{first} {second}', backing off");
				self.bigram_mle(second)
			});
			let Some(node) = node else {
				return Continuation::unrecognized(words);
			};

			total += node.log_probability();
			let next = node.into_word();
			context = (std::mem::take(&mut context.1), next.clone());
			words.push(next);
		}

		Continuation::complete(words, total)
	}

	/// Scores a query with the bigram model and extends it.
	///
	/// # Errors
	/// Returns `QueryTooShort` if the query has no word.
	pub fn bigram_sentence(&self, line: &str) -> Result<Continuation> {
		let tokens = tokenize_query(line);
		let Some(last) = tokens.last() else {
			return Err(NgramError::QueryTooShort { expected: 1, got: 0 });
		};

		let log_probability = self.bigram_sequence_log_prob(&tokens);
		Ok(self.bigram_continuation(last, log_probability))
	}

	/// Scores a query with the trigram model (bigram backoff) and extends it.
	///
	/// # Errors
	/// Returns `QueryTooShort` if the query has fewer than two words.
	pub fn trigram_sentence(&self, line: &str) -> Result<Continuation> {
		let tokens = tokenize_query(line);
		let [.., w1, w2] = tokens.as_slice() else {
			return Err(NgramError::QueryTooShort { expected: 2, got: tokens.len() });
		};

		let log_probability = self.trigram_sequence_log_prob(&tokens);
		Ok(self.trigram_continuation(w1, w2, log_probability))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::build;

	fn engine() -> QueryEngine {
		QueryEngine::new(build(["the", "cat", "sat", "the", "cat", "ran"]))
	}

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn tokenize() {
		assert_eq!(tokenize_query("  The  cat "), ["the", "cat"]);
		assert!(tokenize_query("   ").is_empty());
	}

	#[test]
	fn bigram_log_prob_is_smoothed() {
		let engine = engine();
		// (2 + 1) / (2 + 12 + 1)
		assert!((engine.bigram_log_prob("the", "cat") - 0.2f64.log10()).abs() < 1e-12);
		// (0 + 1) / (0 + 12 + 1)
		assert!((engine.bigram_log_prob("dog", "bird") - (1.0f64 / 13.0).log10()).abs() < 1e-12);
	}

	#[test]
	fn trigram_log_prob() {
		let engine = engine();
		assert!((engine.trigram_log_prob("the", "cat", "sat") - 0.5f64.log10()).abs() < 1e-12);
		assert_eq!(engine.trigram_log_prob("cat", "sat", "cat"), f64::NEG_INFINITY);
		assert_eq!(engine.trigram_log_prob("dog", "the", "cat"), f64::NEG_INFINITY);
	}

	#[test]
	fn first_observed_candidate_wins_ties() {
		let engine = engine();
		let node = engine.bigram_mle("cat").unwrap();
		assert_eq!(node.word(), "sat");
		assert!((node.log_probability() - (2.0f64 / 14.0).log10()).abs() < 1e-12);

		assert_eq!(engine.trigram_mle("the", "cat").unwrap().word(), "sat");
		assert!(engine.trigram_mle("cat", "ran").is_none());
		assert!(engine.bigram_mle("ran").is_none());
	}

	#[test]
	fn unigram_mle_picks_most_frequent() {
		let node = engine().unigram_mle().unwrap();
		assert_eq!(node.word(), "the");
		assert!((node.log_probability() - (2.0f64 / 15.0).log10()).abs() < 1e-12);
		assert!(QueryEngine::new(build(Vec::<String>::new())).unigram_mle().is_none());
	}

	#[test]
	fn trigram_backoff_scores_each_pair_once() {
		let engine = engine();
		// "sat the cat" is known, no backoff
		let known = engine.trigram_sequence_log_prob(&tokens(&["sat", "the", "cat"]));
		assert!((known - engine.trigram_log_prob("sat", "the", "cat")).abs() < 1e-12);

		// "cat the dog" is unknown: backoff on "cat the", then the last pair "the dog"
		let unknown = engine.trigram_sequence_log_prob(&tokens(&["cat", "the", "dog"]));
		let expected = engine.bigram_log_prob("cat", "the") + engine.bigram_log_prob("the", "dog");
		assert!((unknown - expected).abs() < 1e-12);

		// two unknown windows, then the last pair
		let unknown = engine.trigram_sequence_log_prob(&tokens(&["the", "cat", "zebra", "dog"]));
		let expected = engine.bigram_log_prob("the", "cat")
			+ engine.bigram_log_prob("cat", "zebra")
			+ engine.bigram_log_prob("zebra", "dog");
		assert!((unknown - expected).abs() < 1e-12);

		// a known last window does not add the last pair
		let mixed = engine.trigram_sequence_log_prob(&tokens(&["dog", "sat", "the", "cat"]));
		let expected = engine.bigram_log_prob("dog", "sat") + engine.trigram_log_prob("sat", "the", "cat");
		assert!((mixed - expected).abs() < 1e-12);

		assert_eq!(engine.trigram_sequence_log_prob(&tokens(&["the", "cat"])), 0.0);
	}

	#[test]
	fn short_queries_are_rejected() {
		let engine = engine();
		assert!(matches!(engine.bigram_sentence(" "), Err(NgramError::QueryTooShort { expected: 1, got: 0 })));
		assert!(matches!(engine.trigram_sentence("the"), Err(NgramError::QueryTooShort { expected: 2, got: 1 })));
	}
}
