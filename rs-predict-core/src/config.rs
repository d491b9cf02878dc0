use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, Result};
use crate::io::normalize_folder;

/// Location of a persisted model on disk.
///
/// A model is a data directory holding three binary tables and one metrics
/// record. The file names can be overridden, the defaults match what
/// `rs-predict build` writes.
///
/// # Example (JSON)
/// ```json
/// { "data_dir": "./data", "unigrams": "unigrams.map" }
/// ```
/// Missing fields take their default value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DataLayout {
	/// Directory containing every model file.
	pub data_dir: PathBuf,
	pub unigrams: String,
	pub bigrams: String,
	pub trigrams: String,
	pub metrics: String,
}

impl Default for DataLayout {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("./data"),
			unigrams: "unigrams.map".to_owned(),
			bigrams: "bigrams.map".to_owned(),
			trigrams: "trigrams.map".to_owned(),
			metrics: "metrics.dat".to_owned(),
		}
	}
}

impl DataLayout {
	/// Default file names inside `data_dir`.
	///
	/// Both `"folder"` and `"folder/"` are accepted.
	pub fn new(data_dir: &str) -> Self {
		Self { data_dir: normalize_folder(data_dir), ..Self::default() }
	}

	/// Reads a layout from a JSON file.
	///
	/// # Errors
	/// - `Io` if the file cannot be opened
	/// - `Config` if the JSON is invalid
	/// - `InvalidConfig` if a file name is empty
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let reader = BufReader::new(File::open(path)?);
		let layout: Self = serde_json::from_reader(reader)?;
		layout.validate()?;
		Ok(layout)
	}

	fn validate(&self) -> Result<()> {
		for (what, name) in [
			("unigrams", &self.unigrams),
			("bigrams", &self.bigrams),
			("trigrams", &self.trigrams),
			("metrics", &self.metrics),
		] {
			if name.trim().is_empty() {
				return Err(NgramError::InvalidConfig(format!("empty file name for {what}")));
			}
		}
		Ok(())
	}

	pub fn unigrams_path(&self) -> PathBuf {
		self.data_dir.join(&self.unigrams)
	}

	pub fn bigrams_path(&self) -> PathBuf {
		self.data_dir.join(&self.bigrams)
	}

	pub fn trigrams_path(&self) -> PathBuf {
		self.data_dir.join(&self.trigrams)
	}

	pub fn metrics_path(&self) -> PathBuf {
		self.data_dir.join(&self.metrics)
	}

	/// Path of the human-readable `ngram,count` dump for a binary table.
	///
	/// Example: `data/bigrams.map` → `data/bigrams.txt`
	pub fn counts_path(&self, table_file: &str) -> PathBuf {
		let mut path = self.data_dir.join(table_file);
		path.set_extension("txt");
		path
	}
}
