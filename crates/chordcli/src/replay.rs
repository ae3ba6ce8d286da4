//! Feed a Standard MIDI File through the engine.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chord_finder::{ChordEngine, ChordReport};
use midly::{MidiMessage, Smf, TrackEventKind};
use serde::Serialize;
use tracing::info;

/// A note on (velocity > 0) or off (velocity 0) at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub tick: u64,
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
}

#[derive(Debug, Serialize)]
struct ReplayLine<'a> {
    tick: u64,
    #[serde(flatten)]
    report: &'a ChordReport,
}

/// Note events from every track, merged in tick order.
///
/// Events on the same tick keep track order, then file order.
pub fn extract_note_events(smf: &Smf, channel: Option<u8>) -> Vec<NoteEvent> {
    let mut events = Vec::new();

    for track in &smf.tracks {
        let mut current_tick: u64 = 0;
        for event in track {
            current_tick += event.delta.as_int() as u64;

            let TrackEventKind::Midi { channel: ch, message } = event.kind else {
                continue;
            };
            let ch = ch.as_int();
            if channel.is_some_and(|wanted| wanted != ch) {
                continue;
            }
            let (pitch, velocity) = match message {
                MidiMessage::NoteOn { key, vel } => (key.as_int(), vel.as_int()),
                MidiMessage::NoteOff { key, .. } => (key.as_int(), 0),
                _ => continue,
            };
            events.push(NoteEvent {
                tick: current_tick,
                channel: ch,
                pitch,
                velocity,
            });
        }
    }

    events.sort_by_key(|e| e.tick);
    events
}

pub fn replay_file<W: Write>(
    engine: &mut ChordEngine,
    path: &Path,
    channel: Option<u8>,
    output: &mut W,
    json: bool,
) -> Result<usize> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let smf = Smf::parse(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let events = extract_note_events(&smf, channel);
    info!(
        path = %path.display(),
        tracks = smf.tracks.len(),
        events = events.len(),
        "replaying MIDI file"
    );
    replay_events(engine, &events, output, json)
}

pub fn replay_events<W: Write>(
    engine: &mut ChordEngine,
    events: &[NoteEvent],
    output: &mut W,
    json: bool,
) -> Result<usize> {
    let mut emitted = 0;
    for event in events {
        engine.set_velocity(event.velocity);
        let Some(report) = engine.pitch(event.pitch) else {
            continue;
        };
        if json {
            let line = ReplayLine {
                tick: event.tick,
                report: &report,
            };
            writeln!(output, "{}", serde_json::to_string(&line)?)?;
        } else {
            writeln!(output, "{}\t{}", event.tick, report.label)?;
        }
        emitted += 1;
    }
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chord_finder::EngineConfig;
    use pretty_assertions::assert_eq;

    /// Format 1 file: track 0 holds C and E, track 1 holds G, all on tick 0,
    /// released at tick 480. The release of E is a zero-velocity note on.
    fn c_major_smf() -> Vec<u8> {
        let header = [
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, // chunk
            0, 1, // format 1
            0, 2, // two tracks
            0x01, 0xE0, // 480 ticks per quarter
        ];
        let track0: &[u8] = &[
            0x00, 0x90, 60, 100, // C on
            0x00, 0x90, 64, 100, // E on
            0x83, 0x60, 0x80, 60, 0, // +480 C off
            0x00, 0x90, 64, 0, // E off (velocity 0)
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let track1: &[u8] = &[
            0x00, 0x91, 67, 90, // G on, channel 1
            0x83, 0x60, 0x81, 67, 0, // +480 G off
            0x00, 0xFF, 0x2F, 0x00,
        ];

        let mut bytes = header.to_vec();
        for track in [track0, track1] {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
            bytes.extend_from_slice(track);
        }
        bytes
    }

    #[test]
    fn merges_tracks_by_tick() {
        let bytes = c_major_smf();
        let smf = Smf::parse(&bytes).unwrap();
        let events = extract_note_events(&smf, None);

        let summary: Vec<_> = events
            .iter()
            .map(|e| (e.tick, e.pitch, e.velocity))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 60, 100),
                (0, 64, 100),
                (0, 67, 90),
                (480, 60, 0),
                (480, 64, 0),
                (480, 67, 0),
            ]
        );
    }

    #[test]
    fn filters_by_channel() {
        let bytes = c_major_smf();
        let smf = Smf::parse(&bytes).unwrap();
        let events = extract_note_events(&smf, Some(1));
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.pitch == 67));
    }

    #[test]
    fn replays_labels_with_ticks() {
        let bytes = c_major_smf();
        let smf = Smf::parse(&bytes).unwrap();
        let events = extract_note_events(&smf, None);
        let mut engine = ChordEngine::new(EngineConfig {
            default_chord_name: "-".to_string(),
            ..EngineConfig::default()
        })
        .unwrap();

        let mut out = Vec::new();
        let emitted = replay_events(&mut engine, &events, &mut out, false).unwrap();
        assert_eq!(emitted, 6);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], "0\tC major");
        assert_eq!(lines[5], "480\t-");
    }
}
