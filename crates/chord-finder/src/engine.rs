//! Note events in, chord labels out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{ChordClassification, Classifier};
use crate::error::{EngineConfigError, VoiceError};
use crate::namer::render;
use crate::pitch::{PitchClassSet, Spelling};
use crate::tables::ChordTables;
use crate::voices::{PitchRange, VoiceAllocator};

/// Upper limit used when none is configured.
pub const DEFAULT_UPPER_LIMIT: u8 = 128;

/// Settings fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub lower_limit: u8,
    /// 0 means unset and is treated as 128.
    pub upper_limit: u8,
    pub default_chord_name: String,
    pub spelling: Spelling,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lower_limit: 0,
            upper_limit: DEFAULT_UPPER_LIMIT,
            default_chord_name: String::new(),
            spelling: Spelling::Flat,
        }
    }
}

impl EngineConfig {
    pub fn range(&self) -> PitchRange {
        let upper = if self.upper_limit == 0 {
            DEFAULT_UPPER_LIMIT
        } else {
            self.upper_limit
        };
        PitchRange::new(self.lower_limit, upper)
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let range = self.range();
        if range.lower > range.upper {
            return Err(EngineConfigError::InvertedRange {
                lower: range.lower,
                upper: range.upper,
            });
        }
        Ok(())
    }
}

/// One emitted chord label with the data behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordReport {
    pub label: String,
    pub classification: ChordClassification,
    pub pitch_classes: Vec<u8>,
    pub bass: Option<u8>,
}

/// A single chord-tracking instance.
///
/// Events follow a two-step protocol: [`set_velocity`](Self::set_velocity)
/// stores a velocity, then [`pitch`](Self::pitch) delivers a pitch with it.
/// Velocity 0 turns the pitch off.
#[derive(Debug, Clone)]
pub struct ChordEngine {
    config: EngineConfig,
    range: PitchRange,
    voices: VoiceAllocator,
    classifier: Classifier,
    velocity: u8,
}

impl ChordEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        Self::with_tables(config, ChordTables::shared())
    }

    pub fn with_tables(
        config: EngineConfig,
        tables: Arc<ChordTables>,
    ) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self {
            range: config.range(),
            config,
            voices: VoiceAllocator::new(),
            classifier: Classifier::with_tables(tables),
            velocity: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_velocity(&mut self, velocity: u8) {
        self.velocity = velocity;
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Deliver a pitch at the current velocity.
    ///
    /// Returns a report for every accepted event. Out-of-range pitches,
    /// unmatched note-offs and note-ons past the polyphony limit return `None`.
    pub fn pitch(&mut self, pitch: u8) -> Option<ChordReport> {
        match self.voices.apply(pitch, self.velocity, self.range) {
            Ok(Some(set)) => Some(self.report(&set)),
            Ok(None) => None,
            Err(VoiceError::UnmatchedNoteOff { pitch }) => {
                warn!(pitch, "note off with no matching note on");
                None
            }
            Err(VoiceError::PolyphonyExceeded { pitch, limit }) => {
                warn!(pitch, limit, "polyphony exceeded, note dropped");
                None
            }
        }
    }

    pub fn note_on(&mut self, pitch: u8, velocity: u8) -> Option<ChordReport> {
        self.set_velocity(velocity);
        self.pitch(pitch)
    }

    pub fn note_off(&mut self, pitch: u8) -> Option<ChordReport> {
        self.set_velocity(0);
        self.pitch(pitch)
    }

    /// Release every voice and report the now-empty chord.
    pub fn all_notes_off(&mut self) -> ChordReport {
        self.voices.clear();
        self.report(&PitchClassSet::new())
    }

    /// Report for the voices sounding now.
    pub fn current(&self) -> ChordReport {
        self.report(&self.voices.pitch_classes())
    }

    pub fn active_voices(&self) -> usize {
        self.voices.active_count()
    }

    /// Classify an arbitrary set with this engine's naming settings.
    pub fn classify_set(&self, set: &PitchClassSet) -> ChordReport {
        self.report(set)
    }

    fn report(&self, set: &PitchClassSet) -> ChordReport {
        let classification = self.classifier.classify(set);
        let label = render(
            &classification,
            self.config.spelling,
            &self.config.default_chord_name,
        );
        debug!(set = %set, label = %label, "chord");
        ChordReport {
            label,
            classification,
            pitch_classes: set.members(),
            bass: set.bass(),
        }
    }
}
