use std::path::PathBuf;

use aoire_client::{Client, Config, HubConnection, PlayerReport, Session};
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// A single agent joins the room and plays
    Play,
    /// Local agents play each other, driven one after another
    Session,
    /// Local agents play each other, each on its own thread
    Concurrent,
}

#[derive(Parser)]
struct Args {
    /// Address of the game hub
    #[arg(long, default_value = "localhost:8080")]
    host: String,

    /// Room to join (random if not given)
    #[arg(long)]
    room: Option<String>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Path to a config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = if let Some(path) = &args.config {
        Config::load(path)?
    } else {
        Config::default()
    };
    let room = args
        .room
        .unwrap_or_else(|| rand::thread_rng().gen_range(100..1000).to_string());
    info!(host = %args.host, %room, num_games = args.num_games, mode = ?args.mode, "Starting");

    let report = run(args.mode, &args.host, &room, args.num_games, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn run(mode: Mode, host: &str, room: &str, num_games: usize, config: Config) -> anyhow::Result<PlayerReport> {
    if let Mode::Play = mode {
        let mut client = Client::new(HubConnection::new(host)?, config);
        return Ok(client.play_games(room, num_games)?);
    }

    let participants = (0..config.game.num_players)
        .map(|_| -> anyhow::Result<_> { Ok(Client::new(HubConnection::new(host)?, config.clone())) })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut session = Session::new(room, participants, num_games)?;
    let report = match mode {
        Mode::Concurrent => session.run_concurrently()?,
        _ => session.run()?,
    };
    Ok(report)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
