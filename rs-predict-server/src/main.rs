use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::info;
use serde::Deserialize;

use rs_predict_core::model::{Continuation, QueryEngine};
use rs_predict_core::{DataLayout, NgramError, Result as ModelResult};

/// Server configuration, from the command line or `RS_PREDICT_*` variables.
#[derive(Parser, Debug)]
#[command(name = "rs-predict-server")]
struct Config {
	/// Model data directory
	#[arg(short, long, default_value = "./data", env = "RS_PREDICT_DATA")]
	data: String,

	/// JSON file describing the data layout (overrides --data)
	#[arg(long, env = "RS_PREDICT_LAYOUT")]
	layout: Option<PathBuf>,

	#[arg(long, default_value = "127.0.0.1", env = "RS_PREDICT_HOST")]
	host: String,

	#[arg(long, default_value_t = 5000, env = "RS_PREDICT_PORT")]
	port: u16,
}

impl Config {
	/// Layout of the served model: the JSON file when given, else `--data`.
	fn layout(&self) -> ModelResult<DataLayout> {
		match &self.layout {
			Some(path) => DataLayout::from_json_file(path),
			None => Ok(DataLayout::new(&self.data)),
		}
	}
}

fn to_io_error(e: NgramError) -> std::io::Error {
	match e {
		NgramError::Io(e) => e,
		other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
	}
}

/// Query parameters of the `/v1/bigram` and `/v1/trigram` endpoints
#[derive(Deserialize)]
struct SentenceQuery {
	sentence: Option<String>,
}

/// Maps a query result to a response: the continuation as text, or 400 with
/// the error message.
fn respond(result: ModelResult<Continuation>) -> HttpResponse {
	match result {
		Ok(continuation) => HttpResponse::Ok().body(continuation.to_string()),
		Err(e @ NgramError::QueryTooShort { .. }) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/bigram?sentence=...`
///
/// Scores the sentence with the smoothed bigram model and predicts the next words.
#[get("/v1/bigram")]
async fn get_bigram(engine: web::Data<QueryEngine>, query: web::Query<SentenceQuery>) -> impl Responder {
	respond(engine.bigram_sentence(query.sentence.as_deref().unwrap_or_default()))
}

/// HTTP GET endpoint `/v1/trigram?sentence=...`
///
/// Scores the sentence with the trigram model (bigram backoff) and predicts the next words.
#[get("/v1/trigram")]
async fn get_trigram(engine: web::Data<QueryEngine>, query: web::Query<SentenceQuery>) -> impl Responder {
	respond(engine.trigram_sentence(query.sentence.as_deref().unwrap_or_default()))
}

/// HTTP GET endpoint `/v1/metrics`, the corpus metrics as JSON.
#[get("/v1/metrics")]
async fn get_metrics(engine: web::Data<QueryEngine>) -> impl Responder {
	HttpResponse::Ok().json(engine.metrics())
}

/// Main entry point for the server.
///
/// Loads the model once and shares it read-only between workers: queries
/// never mutate the engine, so no lock is needed.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let config = Config::parse();

	let layout = config.layout().map_err(to_io_error)?;
	let engine = QueryEngine::load(&layout).map_err(to_io_error)?;
	let engine = web::Data::new(engine);
	info!("serving model from {} on {}:{}", layout.data_dir.display(), config.host, config.port);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(engine.clone())
			.service(get_bigram)
			.service(get_trigram)
			.service(get_metrics)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
