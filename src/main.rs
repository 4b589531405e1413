mod api;
mod server;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::api::{ChangesResponse, ScoreResponse, UgcRequest, UgcResponse};
use demand_radar::intent::{collect_insights, common_themes};
use demand_radar::sources::{FileSource, FixtureSource, SignalSource};
use demand_radar::{
    format_percent, format_score, ChangeDetector, Competitor, CompetitorSnapshot, Mention,
    RadarConfig, RadarError, ScoringEngine,
};

const DETAIL_MENTIONS: usize = 5;
const DETAIL_THEMES: usize = 10;

#[derive(Parser)]
#[command(name = "demand-radar", about = "Market gap scoring and competitor change detection")]
struct Cli {
    /// TOML config file (defaults to $RADAR_CONFIG_PATH or config/radar.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a signal bundle
    Score(ScoreArgs),
    /// Diff two competitor snapshots
    Changes(ChangesArgs),
    /// Score one UGC asset
    Ugc(UgcArgs),
    /// Print or write the effective config
    Config(ConfigArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long, conflicts_with = "fixture")]
    input: Option<PathBuf>,
    /// Use deterministic synthetic signals instead of a file
    #[arg(long)]
    fixture: bool,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    json: bool,
    /// Print insights from the top mentions and common title themes
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct ChangesArgs {
    #[arg(long)]
    competitor_id: String,
    #[arg(long)]
    previous: PathBuf,
    #[arg(long)]
    current: PathBuf,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct UgcArgs {
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    #[arg(long)]
    write: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RadarError> {
    let cli = Cli::parse();
    let (config, config_path) = RadarConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Changes(args) => run_changes(args, &config),
        Command::Ugc(args) => run_ugc(args, &config),
        Command::Config(args) => run_config(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

fn run_score(args: ScoreArgs, config: &RadarConfig) -> Result<(), RadarError> {
    let now = Utc::now();
    let source: Box<dyn SignalSource> = match (args.input, args.fixture) {
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, true) => Box::new(FixtureSource::new(args.seed, now)),
        (None, false) => {
            return Err(RadarError::InvalidInput(
                "pass --input FILE or --fixture".to_string(),
            ))
        }
    };
    let bundle = source.load()?;
    if bundle.is_empty() {
        tracing::warn!(source = %source.label(), "signal bundle is empty");
    }
    let engine = ScoringEngine::from_config(config);
    let response = ScoreResponse::compute(&engine, &bundle, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let scores = response.scores;
    println!("Source: {}", source.label());
    println!(
        "Signals: {} ads | {} mentions | {} clusters | {} gaps",
        bundle.ads.len(),
        bundle.mentions.len(),
        bundle.clusters.len(),
        bundle.gaps.len()
    );
    println!(
        "Opportunity: {} (confidence {})",
        format_score(scores.opportunity),
        format_percent(scores.confidence)
    );
    println!(
        "Components: longevity {} | dissatisfaction {} | misalignment {} | saturation {}",
        format_score(scores.longevity),
        format_score(scores.dissatisfaction),
        format_score(scores.misalignment),
        format_score(scores.saturation)
    );
    let intents = response.intents;
    println!(
        "Mention intents: {} questions | {} complaints | {} requests | {} showcases | {} other",
        intents.question, intents.complaint, intents.request, intents.showcase, intents.discussion
    );

    if args.details {
        print_details(&bundle.mentions);
    }

    Ok(())
}

fn print_details(mentions: &[Mention]) {
    let mut ranked: Vec<&Mention> = mentions.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    let top: Vec<Mention> = ranked.into_iter().take(DETAIL_MENTIONS).cloned().collect();
    let insights = collect_insights(&top);

    for (heading, lines) in [
        ("Pain points", &insights.pain_points),
        ("Questions", &insights.questions),
        ("Requests", &insights.requests),
        ("Solutions in use", &insights.solutions),
        ("Beliefs", &insights.beliefs),
    ] {
        if lines.is_empty() {
            continue;
        }
        println!("\n{}:", heading);
        for line in lines {
            println!("- {}", line);
        }
    }

    let themes = common_themes(mentions, DETAIL_THEMES);
    if !themes.is_empty() {
        let rendered: Vec<String> = themes
            .iter()
            .map(|(word, count)| format!("{} ({})", word, count))
            .collect();
        println!("\nCommon themes: {}", rendered.join(", "));
    }
}

fn run_changes(args: ChangesArgs, config: &RadarConfig) -> Result<(), RadarError> {
    let previous: CompetitorSnapshot = read_json(&args.previous)?;
    let current: CompetitorSnapshot = read_json(&args.current)?;
    let competitor = Competitor::new(args.competitor_id);

    let detector = ChangeDetector::new(config.changes.clone());
    let events = detector.detect(&competitor, &previous, &current, Utc::now());

    if args.json {
        let response = ChangesResponse {
            competitor_id: competitor.id,
            events,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No changes detected for {}", competitor.id);
        return Ok(());
    }
    for event in &events {
        println!(
            "[{}] {} {}",
            event.significance.label(),
            event.change_type.label(),
            serde_json::to_string(&event.data)?
        );
    }
    Ok(())
}

fn run_ugc(args: UgcArgs, config: &RadarConfig) -> Result<(), RadarError> {
    let request: UgcRequest = read_json(&args.input)?;
    request.validate().map_err(RadarError::InvalidInput)?;
    let engine = ScoringEngine::from_config(config);
    let scores = engine.ugc(
        &request.asset,
        &request.metrics,
        request.trend_factor.unwrap_or(0.0),
        Utc::now(),
    );
    let response = UgcResponse {
        asset_id: request.asset.id,
        scores,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_config(args: ConfigArgs, config: &RadarConfig) -> Result<(), RadarError> {
    match args.write {
        Some(path) => {
            config.write(&path)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RadarError> {
    let data = std::fs::read_to_string(path).map_err(|err| RadarError::io(path, err))?;
    Ok(serde_json::from_str(&data)?)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("demand_radar=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
