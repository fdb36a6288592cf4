use std::process;

use clap::{ArgAction, Parser};
use colored::Colorize;
use serde::Serialize;

use crate::cards::{parse_board, parse_hole, Card, HoleCards};
use crate::display::{pretty_cards, pretty_hole, results_table};
use crate::equity::{compute_odds, EquityResult, OddsConfig, Strategy};
use crate::error::{OddsError, OddsResult};

#[derive(Parser, Debug)]
#[command(name = "odds", version, about = "Heads-up Texas Hold'em odds calculator")]
pub struct Cli {
    /// Your hole cards, e.g. AsAh
    #[arg(long, visible_alias = "self")]
    pub hero: String,

    /// Opponent's hole cards, e.g. KsKh
    #[arg(long, visible_alias = "opp")]
    pub villain: String,

    /// Board cards (0, 3, 4 or 5), e.g. 2s7h9d
    #[arg(long, default_value = "")]
    pub board: String,

    /// Use Monte Carlo with this many trials
    #[arg(short = 'n', long, conflicts_with = "exact")]
    pub trials: Option<usize>,

    /// Enumerate every board completion
    #[arg(long)]
    pub exact: bool,

    /// Seed for Monte Carlo sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Run on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// More logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn strategy(&self) -> OddsResult<Option<Strategy>> {
        match (self.trials, self.exact) {
            (Some(0), _) => Err(OddsError::InvalidTrials(0)),
            (Some(trials), _) => Ok(Some(Strategy::MonteCarlo { trials })),
            (None, true) => Ok(Some(Strategy::Exact)),
            (None, false) => Ok(None),
        }
    }

    pub fn config(&self) -> OddsResult<OddsConfig> {
        Ok(OddsConfig {
            strategy: self.strategy()?,
            seed: self.seed,
            parallel: !self.sequential,
        })
    }
}

#[derive(Serialize)]
struct JsonReport {
    hero: String,
    villain: String,
    board: Vec<String>,
    strategy: Strategy,
    equity: f64,
    #[serde(flatten)]
    result: EquityResult,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn render_json<T: Serialize>(report: &T) -> OddsResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn execute(cli: &Cli) -> OddsResult<()> {
    let hero: HoleCards = parse_hole(&cli.hero)?;
    let villain: HoleCards = parse_hole(&cli.villain)?;
    let board: Vec<Card> = parse_board(&cli.board)?;
    let config = cli.config()?;
    let strategy = config.resolve_strategy(board.len());

    if let Some(threads) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            log::warn!("could not size thread pool: {}", e);
        }
    }

    log::info!(
        "hero {} vs villain {} on [{}] using {}",
        hero,
        villain,
        board.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "),
        strategy
    );
    let result = compute_odds(&config, &hero, &villain, &board)?;
    log::info!("{}", result);

    if cli.json {
        let report = JsonReport {
            hero: hero.to_string(),
            villain: villain.to_string(),
            board: board.iter().map(|c| c.to_string()).collect(),
            strategy,
            equity: result.equity(),
            result,
        };
        println!("{}", render_json(&report)?);
    } else {
        println!("{} {}", "Your cards:".bold(), pretty_hole(&hero));
        println!("{} {}", "Opponent's cards:".bold(), pretty_hole(&villain));
        if !board.is_empty() {
            println!("{} {}", "Board:".bold(), pretty_cards(&board));
        }
        println!("{}", results_table(&hero, &villain, &board, strategy, &result)?);
    }
    Ok(())
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = execute(&cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}
