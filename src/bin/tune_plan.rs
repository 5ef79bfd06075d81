use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hnsw_search_tuner::{
    config::{Stage, TunerConfig},
    estimate::estimate_ef,
    optimizer::{optimize_search_params, Outcome, SearchRequest},
    telemetry,
    types::CollectionId,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tune HNSW search params of serialized query plans")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite a serialized plan and write the tuned plan to stdout
    Optimize {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long, default_value_t = 1)]
        channels: i64,
        /// Per-shard segment estimate; falls back to the configured default
        #[arg(long)]
        segments: Option<usize>,
        #[arg(long, default_value_t = 0)]
        collection: i64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the ef and topK the tuner would pick
    Estimate {
        #[arg(long)]
        topk: i64,
        #[arg(long, default_value_t = 1)]
        segments: usize,
        #[arg(long, default_value_t = 1)]
        level: i64,
        #[arg(long)]
        filter: bool,
    },
    /// Print the engine parameters configured for an index type and stage
    IndexParams {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        index_type: String,
        #[arg(long)]
        stage: Stage,
    },
}

fn main() -> ExitCode {
    telemetry::init_subscriber();
    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Optimize {
            plan,
            channels,
            segments,
            collection,
            config,
        } => {
            let config = match config {
                Some(path) => TunerConfig::load(path)?,
                None => TunerConfig::default(),
            };
            let mut req = SearchRequest {
                collection_id: CollectionId(collection),
                total_channel_num: channels,
                serialized_expr_plan: Some(std::fs::read(plan)?),
            };
            let num_segments = segments.unwrap_or(config.default_num_segments);
            match optimize_search_params(&mut req, None, num_segments)? {
                Outcome::Tuned(estimate) => {
                    info!(ef = estimate.ef, topk = estimate.topk, "plan tuned")
                }
                Outcome::Unsupported => info!("plan left unchanged"),
            }
            let mut stdout = io::stdout().lock();
            stdout.write_all(req.serialized_expr_plan.as_deref().unwrap_or_default())?;
            stdout.flush()?;
        }
        Commands::Estimate {
            topk,
            segments,
            level,
            filter,
        } => {
            let estimate = estimate_ef(topk, segments, level, filter);
            println!("ef={} topk={}", estimate.ef, estimate.topk);
        }
        Commands::IndexParams {
            config,
            index_type,
            stage,
        } => {
            let config = TunerConfig::load(config)?;
            let params = config.index_engine.index_params(&index_type, stage);
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }
    Ok(())
}
