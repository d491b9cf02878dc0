/// Best candidate found by an argmax search.
///
/// Holds the candidate word and its base-10 log-probability. A zero
/// probability is `f64::NEG_INFINITY`. Immutable: a search builds a new node
/// every time it finds a better candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	word: String,
	log_probability: f64,
}

impl Node {
	pub fn new(word: impl Into<String>, log_probability: f64) -> Self {
		Self { word: word.into(), log_probability }
	}

	pub fn word(&self) -> &str {
		&self.word
	}

	pub fn log_probability(&self) -> f64 {
		self.log_probability
	}

	pub fn into_word(self) -> String {
		self.word
	}
}
