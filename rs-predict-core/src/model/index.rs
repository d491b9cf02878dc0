use std::collections::HashMap;

use super::table::FrequencyTable;

/// Prefix lookup over the bigram and trigram tables.
///
/// Maps a one-word prefix to the words that follow it in a bigram, and a
/// two-word prefix (`"w1 w2"`) to the words that follow it in a trigram.
/// Continuations are stored in the first-observed order of their full n-gram,
/// which is the order the argmax searches scan them in.
///
/// Built once from immutable tables; lookups are O(1) plus O(matches).
#[derive(Debug, Default)]
pub struct PrefixIndex {
	by_word: HashMap<String, Vec<String>>,
	by_pair: HashMap<String, Vec<String>>,
}

impl PrefixIndex {
	pub fn new(bigrams: &FrequencyTable, trigrams: &FrequencyTable) -> Self {
		Self {
			by_word: Self::group_by_prefix(bigrams),
			by_pair: Self::group_by_prefix(trigrams),
		}
	}

	/// Splits every key at its last space: everything before is the prefix,
	/// the last word is the continuation.
	fn group_by_prefix(table: &FrequencyTable) -> HashMap<String, Vec<String>> {
		let mut groups: HashMap<String, Vec<String>> = HashMap::new();
		for (key, _) in table.iter() {
			if let Some((prefix, next)) = key.rsplit_once(' ') {
				groups.entry(prefix.to_owned()).or_default().push(next.to_owned());
			}
		}
		groups
	}

	/// Words observed right after `w1`.
	pub fn after_word(&self, w1: &str) -> &[String] {
		self.by_word.get(w1).map_or(&[], Vec::as_slice)
	}

	/// Words observed right after the pair `w1 w2`.
	pub fn after_pair(&self, w1: &str, w2: &str) -> &[String] {
		self.by_pair.get(&format!("{w1} {w2}")).map_or(&[], Vec::as_slice)
	}
}
