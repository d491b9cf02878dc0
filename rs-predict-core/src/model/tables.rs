use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::DataLayout;
use crate::error::{NgramError, Result};
use crate::io::ensure_folder;
use super::metrics::CorpusMetrics;
use super::table::FrequencyTable;

/// The three frequency tables of a model and their corpus metrics.
///
/// Produced once by the builder (or assembled from count files), persisted,
/// then loaded read-only by the query engine. There is no way to mutate a
/// value of this type: retraining means building a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGramTables {
	unigrams: FrequencyTable,
	bigrams: FrequencyTable,
	trigrams: FrequencyTable,
	metrics: CorpusMetrics,
}

impl NGramTables {
	/// Assembles tables and computes their metrics.
	pub fn from_tables(unigrams: FrequencyTable, bigrams: FrequencyTable, trigrams: FrequencyTable) -> Self {
		let metrics = CorpusMetrics::from_orders(unigrams.metrics(), bigrams.metrics(), trigrams.metrics());
		Self { unigrams, bigrams, trigrams, metrics }
	}

	/// Assembles tables from three consolidated `ngram,count` files.
	pub fn from_count_files<P: AsRef<Path>>(unigrams: P, bigrams: P, trigrams: P) -> Result<Self> {
		Ok(Self::from_tables(
			FrequencyTable::read_counts(unigrams)?,
			FrequencyTable::read_counts(bigrams)?,
			FrequencyTable::read_counts(trigrams)?,
		))
	}

	pub fn unigrams(&self) -> &FrequencyTable {
		&self.unigrams
	}

	pub fn bigrams(&self) -> &FrequencyTable {
		&self.bigrams
	}

	pub fn trigrams(&self) -> &FrequencyTable {
		&self.trigrams
	}

	pub fn metrics(&self) -> &CorpusMetrics {
		&self.metrics
	}

	/// Writes the three binary tables and the metrics record.
	///
	/// - Creates the data directory if needed
	/// - Uses `postcard` for compact serialization
	///
	/// # Errors
	/// Any I/O or serialization failure aborts the save.
	pub fn save(&self, layout: &DataLayout) -> Result<()> {
		ensure_folder(&layout.data_dir)?;
		write_binary(layout.unigrams_path(), &self.unigrams)?;
		write_binary(layout.bigrams_path(), &self.bigrams)?;
		write_binary(layout.trigrams_path(), &self.trigrams)?;
		self.metrics.write(layout.metrics_path())?;
		info!("saved n-gram tables to {} (N={}, V={})", layout.data_dir.display(), self.metrics.n, self.metrics.v);
		Ok(())
	}

	/// Writes the three tables as `ngram,count` text files next to the
	/// binary ones (`unigrams.txt`, ...).
	pub fn dump_counts(&self, layout: &DataLayout) -> Result<()> {
		ensure_folder(&layout.data_dir)?;
		self.unigrams.write_counts(layout.counts_path(&layout.unigrams))?;
		self.bigrams.write_counts(layout.counts_path(&layout.bigrams))?;
		self.trigrams.write_counts(layout.counts_path(&layout.trigrams))?;
		debug!("dumped text counts to {}", layout.data_dir.display());
		Ok(())
	}

	/// Loads tables and metrics saved by `save`.
	///
	/// # Errors
	/// - `Io` / `Serialization` if a file is missing or corrupt
	/// - `MalformedMetrics` if the metrics record does not describe the
	///   loaded tables
	pub fn load(layout: &DataLayout) -> Result<Self> {
		let tables = Self::from_tables(
			read_binary(layout.unigrams_path())?,
			read_binary(layout.bigrams_path())?,
			read_binary(layout.trigrams_path())?,
		);

		let stored = CorpusMetrics::read(layout.metrics_path())?;
		if stored != tables.metrics {
			return Err(NgramError::MalformedMetrics {
				path: layout.metrics_path(),
				reason: format!("record '{stored}' does not match the tables ('{}')", tables.metrics),
			});
		}

		info!("loaded n-gram tables from {} (N={}, V={})", layout.data_dir.display(), stored.n, stored.v);
		Ok(tables)
	}
}

fn write_binary<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
	let bytes = postcard::to_stdvec(value)?;
	fs::write(path, bytes)?;
	Ok(())
}

fn read_binary<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T> {
	let bytes = fs::read(path)?;
	Ok(postcard::from_bytes(&bytes)?)
}
