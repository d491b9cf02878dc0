use std::fmt;

/// Marker emitted when the search cannot extend the sequence.
pub const NOT_RECOGNIZED: &str = "N-gram not recognized.";

/// Number of words a continuation search tries to generate.
pub const CONTINUATION_LENGTH: usize = 10;

/// Result of a greedy continuation search.
///
/// `Display` renders the query output: every generated word followed by a
/// space, then either the cumulative log-probability with two decimals or
/// the `NOT_RECOGNIZED` marker when the search stopped early.
///
/// Examples:
/// - `"sat the cat -3.52"`
/// - `"ran N-gram not recognized."`
#[derive(Clone, Debug, PartialEq)]
pub struct Continuation {
	words: Vec<String>,
	/// `None` when the search stopped on an unknown n-gram.
	log_probability: Option<f64>,
}

impl Continuation {
	pub(crate) fn complete(words: Vec<String>, log_probability: f64) -> Self {
		Self { words, log_probability: Some(log_probability) }
	}

	pub(crate) fn unrecognized(words: Vec<String>) -> Self {
		Self { words, log_probability: None }
	}

	/// Generated words, at most `CONTINUATION_LENGTH`.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Log-probability of the query plus the generated words, if the search
	/// reached its horizon.
	pub fn log_probability(&self) -> Option<f64> {
		self.log_probability
	}

	pub fn is_recognized(&self) -> bool {
		self.log_probability.is_some()
	}
}

impl fmt::Display for Continuation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for word in &self.words {
			write!(f, "{word} ")?;
		}
		match self.log_probability {
			Some(log_probability) => write!(f, "{log_probability:4.2}"),
			None => f.write_str(NOT_RECOGNIZED),
		}
	}
}
