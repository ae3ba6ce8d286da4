//! Line protocol for `chordcli listen`.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! vel 100      # set the velocity used by following pitches
//! 60           # deliver pitch 60 at the current velocity
//! pitch 64     # same, spelled out
//! on 67 90     # note on (velocity defaults to 100)
//! off 60       # note off
//! reset        # release every voice
//! ```

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use chord_finder::{ChordEngine, ChordReport};
use tracing::warn;

pub const DEFAULT_VELOCITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Velocity(u8),
    Pitch(u8),
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff(u8),
    Reset,
}

/// Parse one line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or_default();
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["vel" | "velocity", v] => Command::Velocity(midi_value(v, "velocity")?),
        ["pitch", p] => Command::Pitch(midi_value(p, "pitch")?),
        ["on", p] => Command::NoteOn {
            pitch: midi_value(p, "pitch")?,
            velocity: DEFAULT_VELOCITY,
        },
        ["on", p, v] => Command::NoteOn {
            pitch: midi_value(p, "pitch")?,
            velocity: midi_value(v, "velocity")?,
        },
        ["off", p] => Command::NoteOff(midi_value(p, "pitch")?),
        ["reset"] => Command::Reset,
        [p] => Command::Pitch(
            midi_value(p, "pitch").with_context(|| format!("unknown command '{}'", p))?,
        ),
        _ => bail!("unrecognized line '{}'", line.trim()),
    };
    Ok(Some(command))
}

fn midi_value(word: &str, what: &str) -> Result<u8> {
    let value: u8 = word
        .parse()
        .map_err(|_| anyhow!("{} '{}' is not a number", what, word))?;
    if value > 127 {
        bail!("{} {} is out of range 0..=127", what, value);
    }
    Ok(value)
}

/// Apply a command. Returns the report to print, if any.
pub fn apply(engine: &mut ChordEngine, command: Command) -> Option<ChordReport> {
    match command {
        Command::Velocity(v) => {
            engine.set_velocity(v);
            None
        }
        Command::Pitch(p) => engine.pitch(p),
        Command::NoteOn { pitch, velocity } => engine.note_on(pitch, velocity),
        Command::NoteOff(p) => engine.note_off(p),
        Command::Reset => Some(engine.all_notes_off()),
    }
}

/// Run the protocol until `input` is exhausted. Returns the number of labels written.
pub fn run<R: BufRead, W: Write>(
    engine: &mut ChordEngine,
    input: R,
    output: &mut W,
    json: bool,
) -> Result<usize> {
    let mut emitted = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading input")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = index + 1, "skipping malformed input");
                eprintln!("line {}: {:#}", index + 1, e);
                continue;
            }
        };
        if let Some(report) = apply(engine, command) {
            crate::write_report(output, &report, json)?;
            output.flush()?;
            emitted += 1;
        }
    }
    Ok(emitted)
}
