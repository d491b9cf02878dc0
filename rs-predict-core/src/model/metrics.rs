use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, Result};

/// Occurrence statistics of a single n-gram order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderMetrics {
	/// Sum of all counts (`N`).
	pub total: u64,
	/// Number of distinct keys (`V`).
	pub distinct: u64,
}

impl OrderMetrics {
	pub fn new(total: u64, distinct: u64) -> Self {
		Self { total, distinct }
	}
}

/// Corpus-level statistics shared by the builder and the query engine.
///
/// The global `n` and `v` are the sums over the three orders. `v` is a coarse
/// aggregate used as the smoothing constant, not a real vocabulary size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorpusMetrics {
	pub n: u64,
	pub v: u64,
	pub unigram: OrderMetrics,
	pub bigram: OrderMetrics,
	pub trigram: OrderMetrics,
}

impl CorpusMetrics {
	/// Aggregates per-order metrics into the global `n` / `v`.
	pub fn from_orders(unigram: OrderMetrics, bigram: OrderMetrics, trigram: OrderMetrics) -> Self {
		Self {
			n: unigram.total + bigram.total + trigram.total,
			v: unigram.distinct + bigram.distinct + trigram.distinct,
			unigram,
			bigram,
			trigram,
		}
	}

	/// Parses the record `N,V,N_uni,V_uni,N_bi,V_bi,N_tri,V_tri`.
	///
	/// The global values must equal the sums of the per-order values.
	pub fn parse_record(record: &str) -> std::result::Result<Self, String> {
		let fields = record
			.trim()
			.split(',')
			.map(|field| field.trim().parse::<u64>().map_err(|_| format!("'{}' is not an integer", field.trim())))
			.collect::<std::result::Result<Vec<u64>, String>>()?;

		let &[n, v, uni_n, uni_v, bi_n, bi_v, tri_n, tri_v] = fields.as_slice() else {
			return Err(format!("expected 8 fields, got {}", fields.len()));
		};

		let metrics = Self::from_orders(
			OrderMetrics::new(uni_n, uni_v),
			OrderMetrics::new(bi_n, bi_v),
			OrderMetrics::new(tri_n, tri_v),
		);
		if metrics.n != n || metrics.v != v {
			return Err(format!(
				"global N/V ({n}/{v}) do not match the per-order sums ({}/{})",
				metrics.n, metrics.v
			));
		}
		Ok(metrics)
	}

	/// Reads the metrics record written by `write`.
	///
	/// # Errors
	/// - `Io` if the file cannot be read
	/// - `MalformedMetrics` if the record cannot be parsed
	pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path)?;
		Self::parse_record(contents.lines().next().unwrap_or_default())
			.map_err(|reason| NgramError::MalformedMetrics { path: path.to_path_buf(), reason })
	}

	/// Writes the metrics as a single record line.
	pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		fs::write(path, format!("{self}\n"))?;
		Ok(())
	}
}

impl fmt::Display for CorpusMetrics {
	/// Formats the persisted record `N,V,N_uni,V_uni,N_bi,V_bi,N_tri,V_tri`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{},{},{},{},{},{},{},{}",
			self.n,
			self.v,
			self.unigram.total,
			self.unigram.distinct,
			self.bigram.total,
			self.bigram.distinct,
			self.trigram.total,
			self.trigram.distinct
		)
	}
}
