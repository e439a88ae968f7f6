//! Interactive play loop over any line-based reader and writer.

use crate::error::CliError;
use crate::swatch::Painter;
use std::io::{BufRead, Write};
use value_trainer_core::{Bin, Generator, Round, StatsRecord, StatsStore, Xorshift64};

/// Rows of the color swatch shown each round.
const SWATCH_ROWS: usize = 4;

/// Guess taken when the player just presses enter.
const DEFAULT_GUESS: Bin = Bin::MIDDLE;

/// Everything a play session needs besides its terminal.
pub struct Session<'a> {
    pub generator: &'a Generator,
    pub rng: Xorshift64,
    pub store: &'a StatsStore,
    pub painter: Painter,
    /// Stop after this many revealed rounds. `None` plays until `q` or EOF.
    pub max_rounds: Option<usize>,
}

/// Plays rounds until the player quits, input ends or `max_rounds` is reached.
///
/// Stats are loaded once up front and saved after every reveal; a failed save
/// is logged and play continues. Returns the final record.
pub fn play<R: BufRead, W: Write>(
    mut session: Session<'_>,
    mut input: R,
    out: &mut W,
) -> Result<StatsRecord, CliError> {
    let mut stats = session.store.load();
    writeln!(
        out,
        "Guess the value of each color: 1 = white ... 10 = black. Enter q to quit."
    )?;
    write_stats(out, &stats)?;

    let mut played = 0usize;
    while session.max_rounds.map_or(true, |max| played < max) {
        let mut round = Round::start(session.generator, &mut session.rng);
        writeln!(out)?;
        for line in session.painter.swatch(round.sample().hex(), SWATCH_ROWS) {
            writeln!(out, "  {line}")?;
        }

        let Some(guess) = read_guess(&mut input, out)? else {
            break;
        };

        let result = round.reveal(guess)?;
        let reveal = session.painter.split(
            &result.guessed_gray_hex,
            &result.actual_gray_hex,
            SWATCH_ROWS,
        );
        for line in reveal {
            writeln!(out, "  {line}")?;
        }
        writeln!(
            out,
            "You guessed: {} · Actual: {} · Off by: {}",
            result.guessed, result.actual, result.offset
        )?;

        stats.record(&result);
        if let Err(e) = session.store.save(&stats) {
            tracing::warn!(error = %e, "could not save stats");
        }
        write_stats(out, &stats)?;
        played += 1;
    }

    writeln!(out, "Bye.")?;
    Ok(stats)
}

/// Prompts until a valid bin is entered. An empty line picks [`DEFAULT_GUESS`].
/// `None` on `q` or end of input.
fn read_guess<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Bin>, CliError> {
    loop {
        write!(out, "Value (1-10) [{DEFAULT_GUESS}]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(Some(DEFAULT_GUESS));
        }
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match answer.parse::<Bin>() {
            Ok(bin) => return Ok(Some(bin)),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

/// Writes a stats summary line.
pub fn write_stats<W: Write>(out: &mut W, stats: &StatsRecord) -> std::io::Result<()> {
    let avg = stats
        .average_offset()
        .map_or_else(|| "–".to_string(), |a| a.to_string());
    let last = stats
        .last_offset
        .map_or_else(|| "–".to_string(), |l| l.to_string());
    writeln!(
        out,
        "Rounds: {} · Avg off: {avg} · Last off: {last}",
        stats.rounds_played
    )
}
