use std::path::Path;

use log::{debug, info, warn};

use crate::error::Result;
use crate::io::read_lines;
use super::table::FrequencyTable;
use super::tables::NGramTables;

/// Three-token sliding window over the token stream.
///
/// An empty slot means "no token yet" (stream ramp-up) or an empty input
/// element, and blocks every n-gram that would span it.
#[derive(Default)]
struct Window {
	w1: String,
	w2: String,
	w3: String,
}

impl Window {
	/// Shifts `w1 ← w2, w2 ← w3, w3 ← token`.
	fn shift(&mut self, token: String) {
		self.w1 = std::mem::replace(&mut self.w2, std::mem::replace(&mut self.w3, token));
	}
}

/// Builds the unigram, bigram and trigram tables from a token stream.
///
/// Each element is trimmed and lower-cased, then pushed through a three-token
/// window. An element with whitespace inside it is not a single word: it is
/// rejected and shifted in as an empty token. After every shift:
/// - `w3` non-empty → unigram `w3`
/// - `w2 w3` non-empty → bigram `w2 w3`
/// - `w1 w2 w3` non-empty → trigram `w1 w2 w3`
///
/// The first token therefore yields only a unigram and the second a unigram
/// and a bigram. Nothing wraps around and the end of the stream is not padded.
///
/// The result is a fresh value: building twice from the same stream gives
/// identical tables and metrics.
pub fn build<I, S>(tokens: I) -> NGramTables
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut unigrams = FrequencyTable::new();
	let mut bigrams = FrequencyTable::new();
	let mut trigrams = FrequencyTable::new();
	let mut window = Window::default();
	let mut processed = 0usize;

	for token in tokens {
		processed += 1;
		let token = token.as_ref().trim();
		if token.contains(char::is_whitespace) {
			warn!("token {processed} '{token}' is not a single word, skipped");
			window.shift(String::new());
			continue;
		}
		window.shift(token.to_lowercase());

		let Window { w1, w2, w3 } = &window;
		if w3.is_empty() {
			continue;
		}
		unigrams.increment(w3);
		if w2.is_empty() {
			continue;
		}
		bigrams.increment(&format!("{w2} {w3}"));
		if !w1.is_empty() {
			trigrams.increment(&format!("{w1} {w2} {w3}"));
		}
	}

	debug!(
		"processed {processed} tokens: {} unigrams, {} bigrams, {} trigrams",
		unigrams.len(),
		bigrams.len(),
		trigrams.len()
	);
	NGramTables::from_tables(unigrams, bigrams, trigrams)
}

/// Builds the tables from a token file holding one token per line.
///
/// # Errors
/// Returns `Io` if the file cannot be read. No partial tables are produced.
pub fn build_from_file<P: AsRef<Path>>(path: P) -> Result<NGramTables> {
	let path = path.as_ref();
	let tokens = read_lines(path)?;
	info!("building n-gram tables from {} ({} lines)", path.display(), tokens.len());
	Ok(build(tokens))
}
