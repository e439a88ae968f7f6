#![deny(unsafe_code)]
//! CLI binary for the value trainer.
//!
//! Subcommands:
//! - `play` - interactive guessing rounds in the terminal
//! - `sample` - print generated colors for a bin
//! - `bins` - list the value scale with anchor grays
//! - `value <hex>` - luminance and bin of a color
//! - `stats` / `reset-stats` - show or zero the stored record

mod error;
mod game;
mod swatch;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tracing::Level;
use value_trainer_core::{
    gray_hex_for_bin, hex_decode, luminance_to_bin, Bin, Generator, GeneratorConfig, StatsRecord,
    StatsStore, Xorshift64,
};

#[derive(Parser)]
#[command(name = "value-trainer", about = "Train your eye for color value")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Key-value file holding the stats record.
    #[arg(long, global = true, default_value = "value-trainer-stats.json")]
    stats_file: PathBuf,

    /// Generator parameters as a JSON string.
    #[arg(long, global = true, default_value = "{}")]
    params: String,

    /// Plain hex codes instead of ANSI color swatches.
    #[arg(long, global = true)]
    no_color: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds: see a color, guess its value from 1 (white) to 10 (black).
    Play {
        /// PRNG seed for a repeatable session.
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many rounds.
        #[arg(long)]
        rounds: Option<usize>,
    },
    /// Generate colors and print them with their bins.
    Sample {
        /// Target bin. Random per sample when omitted.
        #[arg(short, long)]
        bin: Option<Bin>,

        /// PRNG seed for deterministic output.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of samples.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// List the ten value bins with their anchor grays.
    Bins,
    /// Print luminance and bin of a hex color.
    Value {
        /// Color as `#rrggbb` or `rrggbb`.
        hex: String,
    },
    /// Show the stored stats record.
    Stats,
    /// Zero the stored stats record.
    ResetStats,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_generator(params: &str) -> Result<Generator, CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    Ok(Generator::new(GeneratorConfig::from_json(&params))?)
}

fn seeded(seed: Option<u64>) -> Xorshift64 {
    seed.map(Xorshift64::new).unwrap_or_else(Xorshift64::from_clock)
}

/// Runs a play session. With `json` the transcript goes to `transcript` and
/// `out` receives only the final record; otherwise everything goes to `out`.
fn play_session<R: BufRead, T: Write, O: Write>(
    session: game::Session<'_>,
    input: R,
    transcript: &mut T,
    out: &mut O,
    json: bool,
) -> Result<StatsRecord, CliError> {
    if !json {
        return game::play(session, input, out);
    }
    let stats = game::play(session, input, transcript)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    Ok(stats)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = StatsStore::open(&cli.stats_file);

    match cli.command {
        Command::Play { seed, rounds } => {
            let generator = build_generator(&cli.params)?;
            let on_terminal = if cli.json {
                std::io::stderr().is_terminal()
            } else {
                std::io::stdout().is_terminal()
            };
            let session = game::Session {
                generator: &generator,
                rng: seeded(seed),
                store: &store,
                painter: swatch::Painter::new(!cli.no_color && on_terminal),
                max_rounds: rounds,
            };
            play_session(
                session,
                std::io::stdin().lock(),
                &mut std::io::stderr().lock(),
                &mut std::io::stdout().lock(),
                cli.json,
            )?;
        }
        Command::Sample { bin, seed, count } => {
            let generator = build_generator(&cli.params)?;
            let mut rng = seeded(seed);
            let samples: Vec<_> = (0..count)
                .map(|_| {
                    let target = bin.unwrap_or_else(|| Bin::random(&mut rng));
                    generator.generate(target, &mut rng)
                })
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&samples)?);
            } else {
                let color = !cli.no_color && std::io::stdout().is_terminal();
                let painter = swatch::Painter::new(color);
                for s in &samples {
                    println!(
                        "{}  {}  L={:.4}  bin {:>2}  gray {}",
                        painter.block(s.rgb(), 6),
                        s.hex(),
                        s.luminance(),
                        s.bin().get(),
                        s.gray_hex()
                    );
                }
            }
        }
        Command::Bins => {
            if cli.json {
                let bins: Vec<_> = Bin::all()
                    .map(|b| {
                        serde_json::json!({
                            "bin": b,
                            "anchorLuminance": b.anchor_luminance(),
                            "grayHex": gray_hex_for_bin(b),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&bins)?);
            } else {
                for b in Bin::all() {
                    println!(
                        "{:>2}  L={:.4}  {}",
                        b.get(),
                        b.anchor_luminance(),
                        gray_hex_for_bin(b)
                    );
                }
            }
        }
        Command::Value { hex } => {
            let rgb = hex_decode(&hex)?;
            let luminance = rgb.luminance();
            let bin = luminance_to_bin(luminance);
            if cli.json {
                let info = serde_json::json!({
                    "hex": rgb.hex(),
                    "luminance": luminance,
                    "bin": bin,
                    "grayHex": value_trainer_core::gray_hex_from_luminance(luminance),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}  L={luminance:.4}  bin {bin}", rgb.hex());
            }
        }
        Command::Stats => {
            let stats = store.load();
            if cli.json {
                let info = serde_json::json!({
                    "roundsPlayed": stats.rounds_played,
                    "cumulativeOffset": stats.cumulative_offset,
                    "lastOffset": stats.last_offset,
                    "averageOffset": stats.average_offset(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                game::write_stats(&mut std::io::stdout().lock(), &stats)?;
            }
        }
        Command::ResetStats => {
            let stats = store.reset()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                eprintln!("stats reset in {}", store.path().display());
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sample_with_bin_and_count() {
        let cli = Cli::try_parse_from(["value-trainer", "sample", "--bin", "7", "-n", "3"]).unwrap();
        match cli.command {
            Command::Sample { bin, seed, count } => {
                assert_eq!(bin, Some(Bin::new(7).unwrap()));
                assert_eq!(seed, None);
                assert_eq!(count, 3);
            }
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn rejects_out_of_range_bin() {
        assert!(Cli::try_parse_from(["value-trainer", "sample", "--bin", "11"]).is_err());
        assert!(Cli::try_parse_from(["value-trainer", "sample", "--bin", "0"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "value-trainer",
            "stats",
            "--json",
            "--stats-file",
            "x.json",
            "-vv",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.stats_file, PathBuf::from("x.json"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn bad_params_json_is_an_input_error() {
        let err = build_generator("{nope").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn out_of_range_params_are_an_input_error() {
        let err = build_generator(r#"{"min_saturation": 0.9, "max_saturation": 0.1}"#).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn params_override_generator_config() {
        let generator = build_generator(r#"{"attempt_budget": 5}"#).unwrap();
        assert_eq!(generator.config().attempt_budget, 5);
    }

    #[test]
    fn reset_stats_writes_zeroed_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let cli = Cli::try_parse_from([
            "value-trainer",
            "reset-stats",
            "--stats-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();
        let store = StatsStore::open(&path);
        assert!(path.exists());
        assert_eq!(store.load(), StatsRecord::default());
    }

    fn session_for<'a>(generator: &'a Generator, store: &'a StatsStore) -> game::Session<'a> {
        game::Session {
            generator,
            rng: Xorshift64::new(3),
            store,
            painter: swatch::Painter::new(false),
            max_rounds: Some(1),
        }
    }

    #[test]
    fn json_play_keeps_stdout_parseable() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::open(dir.path().join("stats.json"));
        let generator = Generator::default();
        let (mut transcript, mut out) = (Vec::new(), Vec::new());

        let stats = play_session(
            session_for(&generator, &store),
            std::io::Cursor::new("5\n"),
            &mut transcript,
            &mut out,
            true,
        )
        .unwrap();

        let parsed: StatsRecord = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, stats);
        assert_eq!(parsed.rounds_played, 1);
        let transcript = String::from_utf8(transcript).unwrap();
        assert!(transcript.contains("You guessed: 5"), "transcript:\n{transcript}");
    }

    #[test]
    fn plain_play_writes_transcript_to_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::open(dir.path().join("stats.json"));
        let generator = Generator::default();
        let (mut transcript, mut out) = (Vec::new(), Vec::new());

        play_session(
            session_for(&generator, &store),
            std::io::Cursor::new("5\n"),
            &mut transcript,
            &mut out,
            false,
        )
        .unwrap();

        assert!(transcript.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("You guessed: 5"));
    }

    #[test]
    fn value_with_bad_hex_fails_as_input() {
        let cli = Cli::try_parse_from(["value-trainer", "value", "#12345"]).unwrap();
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }
}
