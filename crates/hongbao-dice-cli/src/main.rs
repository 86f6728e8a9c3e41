//! Hongbao Dice CLI
//!
//! Roll the five red envelope dice in a terminal. Each die spins with the same
//! eased animation as the 3D version, drawn as a progress line.

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use hongbao_dice_core::{
    ease_out_cubic, greeting_text, Completion, GameConfig, GameSession, Hint, IgnoreReason, Place,
    ResultPanel, RollRequest, SessionEvent, DICE_COUNT,
};

/// Roughly one display refresh
const FRAME: Duration = Duration::from_millis(16);

const BAR_WIDTH: usize = 24;

/// Hongbao Dice - roll five dice to decide your red envelope
#[derive(Parser)]
#[command(name = "hongbao")]
#[command(
    author,
    version,
    about = "Hongbao Dice - roll five dice to decide your New Year red envelope"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the spin animation
    #[arg(long)]
    instant: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick dice one at a time (default)
    Play,

    /// Roll all five dice in order and print the result
    Roll {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A line typed during interactive play
#[derive(Debug, PartialEq, Eq)]
enum PlayCommand {
    Roll(usize),
    Reset,
    Share,
    Quit,
}

fn parse_play_command(line: &str) -> Result<PlayCommand, String> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "r" | "reset" | "restart" => Ok(PlayCommand::Reset),
        "s" | "share" => Ok(PlayCommand::Share),
        "q" | "quit" | "exit" => Ok(PlayCommand::Quit),
        other => {
            let number: usize = other
                .parse()
                .map_err(|_| format!("Unknown command: {}. Use 1-5, r, s or q", other))?;
            if (1..=DICE_COUNT).contains(&number) {
                Ok(PlayCommand::Roll(number - 1))
            } else {
                Err(format!("Pick a die between 1 and {}", DICE_COUNT))
            }
        }
    }
}

#[derive(Serialize)]
struct PlaceSummary {
    place: Place,
    label: &'static str,
    value: u8,
}

#[derive(Serialize)]
struct RollSummary {
    values: Vec<u8>,
    total: u32,
    amount: String,
    breakdown: Vec<PlaceSummary>,
    greeting: String,
}

impl RollSummary {
    fn from_completion(completion: &Completion) -> Self {
        Self {
            values: completion.values.iter().map(|v| v.get()).collect(),
            total: completion.total,
            amount: completion.formatted_total(),
            breakdown: completion
                .breakdown()
                .iter()
                .map(|r| PlaceSummary {
                    place: r.place,
                    label: r.place.label(),
                    value: r.value.get(),
                })
                .collect(),
            greeting: greeting_text(completion),
        }
    }
}

fn die_label(die: usize) -> String {
    match Place::for_die(die) {
        Some(place) => format!("{} ({})", place.label(), place.english_name()),
        None => format!("#{}", die + 1),
    }
}

fn render_progress(die: usize, progress: f32, x: f32, y: f32) -> String {
    let filled = (ease_out_cubic(progress) * BAR_WIDTH as f32).round() as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled.min(BAR_WIDTH)),
        "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );
    format!(
        "  🎲 {:<18} [{}] x={:>7.1}° y={:>7.1}°",
        die_label(die),
        bar,
        x,
        y
    )
}

fn print_board(session: &GameSession) {
    let slots: Vec<String> = (0..DICE_COUNT)
        .map(|die| {
            let label = Place::for_die(die).map(Place::label).unwrap_or("?");
            match session.value(die) {
                Some(value) => format!("{} {}", label, value.to_string().bold().yellow()),
                None => format!("{} {}", label, "?".dimmed()),
            }
        })
        .collect();
    println!("  [{}]", slots.join(" | "));
}

fn print_completion(completion: &Completion) {
    println!();
    println!("{}", "═══════════════════════════════".red());
    println!(
        "  🧧 {} {}",
        "Red envelope:".bold(),
        completion.formatted_total().bold().yellow()
    );
    for entry in completion.breakdown() {
        println!("     {}", entry);
    }
    println!("{}", "═══════════════════════════════".red());
}

fn print_hint(hint: Hint) {
    if hint != Hint::Done {
        println!("{}", hint.to_string().cyan());
    }
}

/// One frame of the session, with the roll progress reached after it
fn advance_frame(session: &mut GameSession) -> (Vec<SessionEvent>, f32) {
    let events = session.advance(FRAME);
    let progress = session.animation().map(|a| a.progress()).unwrap_or(1.0);
    (events, progress)
}

/// Step the session until the roll lands and any pending reveal has shown.
fn run_animation(session: &mut GameSession, instant: bool) {
    loop {
        let panel_pending = matches!(session.panel(), ResultPanel::Pending { .. });
        if !session.is_busy() && !panel_pending {
            break;
        }

        let (events, progress) = advance_frame(session);
        for event in events {
            match event {
                SessionEvent::Frame { die, orientation } => {
                    if !instant {
                        print!(
                            "\r{}",
                            render_progress(die, progress, orientation.x, orientation.y)
                        );
                        let _ = io::stdout().flush();
                    }
                }
                SessionEvent::Landed {
                    die,
                    value,
                    orientation,
                } => {
                    if !instant {
                        println!(
                            "\r{}",
                            render_progress(die, 1.0, orientation.x, orientation.y)
                        );
                    }
                    println!(
                        "  {} {} → {}",
                        "Landed:".green(),
                        die_label(die),
                        value.to_string().bold().yellow()
                    );
                }
                SessionEvent::Revealed(completion) => print_completion(&completion),
            }
        }

        if !instant {
            std::thread::sleep(FRAME);
        }
    }
}

fn run_play(mut session: GameSession, mut rng: StdRng, instant: bool) -> io::Result<()> {
    println!("{}", "🧧 新年擲骰子 - Hongbao Dice 🧧".red().bold());
    println!("Pick a die with 1-5, 'r' to restart, 's' for the share text, 'q' to quit.");
    print_board(&session);
    print_hint(session.hint());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_play_command(&line) {
            Ok(PlayCommand::Roll(die)) => match session.roll(die, &mut rng) {
                RollRequest::Started { .. } => {
                    run_animation(&mut session, instant);
                    print_board(&session);
                    print_hint(session.hint());
                }
                RollRequest::Ignored(IgnoreReason::AlreadyResolved) => {
                    println!("{}", format!("{} is already rolled", die_label(die)).dimmed());
                }
                RollRequest::Ignored(reason) => {
                    log::debug!("Roll of die {} ignored: {:?}", die, reason);
                }
            },
            Ok(PlayCommand::Reset) => {
                session.reset();
                print_board(&session);
                print_hint(session.hint());
            }
            Ok(PlayCommand::Share) => match session.completion() {
                Some(completion) => println!("\n{}\n", greeting_text(&completion)),
                None => println!("{}", "Roll all five dice first".dimmed()),
            },
            Ok(PlayCommand::Quit) => break,
            Err(msg) => println!("{}", msg.red()),
        }
    }

    Ok(())
}

fn run_roll(mut session: GameSession, mut rng: StdRng, instant: bool, json: bool) -> Result<(), String> {
    for die in 0..DICE_COUNT {
        if let RollRequest::Ignored(reason) = session.roll(die, &mut rng) {
            return Err(format!("Roll of {} was refused: {:?}", die_label(die), reason));
        }
        if json {
            while session.is_busy() || matches!(session.panel(), ResultPanel::Pending { .. }) {
                session.advance(FRAME);
            }
        } else {
            run_animation(&mut session, instant);
        }
    }

    let completion = session
        .completion()
        .ok_or_else(|| "Game did not finish".to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&RollSummary::from_completion(&completion))
            .map_err(|e| format!("Failed to encode JSON: {e}"))?;
        println!("{}", out);
    } else {
        println!("\n{}", greeting_text(&completion));
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{} {}: {}", "Error:".red().bold(), path.display(), err);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::new(&config);

    let result = match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play(session, rng, cli.instant).map_err(|e| e.to_string()),
        Commands::Roll { json } => run_roll(session, rng, cli.instant, json),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
