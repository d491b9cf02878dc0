use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::env;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the file line by line through a buffered reader
/// - Strips the `\n` / `\r\n` terminators
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let reader = BufReader::new(File::open(filename)?);
	reader.lines().collect()
}

/// Writes `lines` to `filename`, one per line, replacing any previous content.
pub(crate) fn write_lines<P, I, S>(filename: P, lines: I) -> io::Result<()>
where
	P: AsRef<Path>,
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut writer = BufWriter::new(File::create(filename)?);
	for line in lines {
		writer.write_all(line.as_ref().as_bytes())?;
		writer.write_all(b"\n")?;
	}
	writer.flush()
}

/// Creates `dir` and its parents when they do not exist yet.
pub(crate) fn ensure_folder<P: AsRef<Path>>(dir: P) -> io::Result<()> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		fs::create_dir_all(dir)?;
	}
	Ok(())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - A trailing separator is dropped (`"data/"` → `"data"`)
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		let trimmed = input.trim_end_matches(['/', '\\']);
		if trimmed.is_empty() {
			PathBuf::from(input)
		} else {
			PathBuf::from(trimmed)
		}
	}
}
