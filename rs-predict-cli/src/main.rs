use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, LevelFilter};

use rs_predict_core::model::{build_from_file, QueryEngine};
use rs_predict_core::DataLayout;

#[derive(Parser, Debug)]
#[command(name = "rs-predict")]
#[command(about = "Build trigram tables from a token stream and predict sentence continuations")]
struct Cli {
	/// Model data directory
	#[arg(short, long, global = true, default_value = "./data", env = "RS_PREDICT_DATA")]
	data: String,

	/// JSON file describing the data layout (overrides --data)
	#[arg(long, global = true, env = "RS_PREDICT_LAYOUT")]
	layout: Option<PathBuf>,

	/// More logs (-v debug, -vv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Fewer logs (-q warn, -qq error)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	quiet: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Build the n-gram tables from a file holding one token per line
	Build {
		/// Token file
		#[arg(short, long, default_value = "./tokenizer/output/tokens.out", env = "RS_PREDICT_TOKENS")]
		tokens: PathBuf,

		/// Also write the tables as `ngram,count` text files
		#[arg(long)]
		dump_counts: bool,
	},
	/// Score one sentence and predict its continuation
	Query {
		#[arg(short, long, value_enum, default_value_t = ModelKind::Trigram)]
		model: ModelKind,

		/// Partial sentence, words separated by spaces
		sentence: Vec<String>,
	},
	/// Read sentences from stdin and answer each one
	Repl {
		#[arg(short, long, value_enum, default_value_t = ModelKind::Trigram)]
		model: ModelKind,
	},
	/// Print the corpus metrics of the model
	Stats,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModelKind {
	Bigram,
	Trigram,
}

/// Level forced by `-v` / `-q`. Without either flag, `RUST_LOG` decides.
fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
	match (quiet, verbose) {
		(0, 0) => None,
		(0, 1) => Some(LevelFilter::Debug),
		(0, _) => Some(LevelFilter::Trace),
		(1, _) => Some(LevelFilter::Warn),
		_ => Some(LevelFilter::Error),
	}
}

fn init_logging(verbose: u8, quiet: u8) {
	let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
	if let Some(level) = level_override(verbose, quiet) {
		builder.filter_level(level);
	}
	let _ = builder.try_init();
}

/// Answers one query, rendering the continuation or the query error.
fn answer(engine: &QueryEngine, model: ModelKind, sentence: &str) -> String {
	let result = match model {
		ModelKind::Bigram => engine.bigram_sentence(sentence),
		ModelKind::Trigram => engine.trigram_sentence(sentence),
	};
	match result {
		Ok(continuation) => continuation.to_string(),
		Err(e) => format!("error: {e}"),
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let layout = match &cli.layout {
		Some(path) => DataLayout::from_json_file(path)?,
		None => DataLayout::new(&cli.data),
	};

	match cli.command {
		Command::Build { tokens, dump_counts } => {
			let tables = build_from_file(&tokens)?;
			tables.save(&layout)?;
			if dump_counts {
				tables.dump_counts(&layout)?;
			}
			let metrics = tables.metrics();
			println!("N={} V={} ({} unigrams, {} bigrams, {} trigrams)",
				metrics.n, metrics.v, metrics.unigram.distinct, metrics.bigram.distinct, metrics.trigram.distinct);
		}
		Command::Query { model, sentence } => {
			let engine = QueryEngine::load(&layout)?;
			println!("{}", answer(&engine, model, &sentence.join(" ")));
		}
		Command::Repl { model } => {
			let engine = QueryEngine::load(&layout)?;
			info!("{model:?} model ready, one sentence per line (Ctrl-D to quit)");
			let stdout = io::stdout();
			let mut out = stdout.lock();
			for line in io::stdin().lock().lines() {
				let line = match line {
					Ok(line) => line,
					Err(e) => {
						error!("failed to read stdin: {e}");
						break;
					}
				};
				if line.trim().is_empty() {
					continue;
				}
				writeln!(out, "{}", answer(&engine, model, &line))?;
			}
		}
		Command::Stats => {
			let engine = QueryEngine::load(&layout)?;
			println!("{}", engine.metrics());
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rust_log_applies_without_flags() {
		assert_eq!(level_override(0, 0), None);
	}

	#[test]
	fn test_flags_override_rust_log() {
		assert_eq!(level_override(1, 0), Some(LevelFilter::Debug));
		assert_eq!(level_override(3, 0), Some(LevelFilter::Trace));
		assert_eq!(level_override(0, 1), Some(LevelFilter::Warn));
		assert_eq!(level_override(2, 2), Some(LevelFilter::Error));
	}
}
