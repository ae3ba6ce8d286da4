//! Live chord identification.
//!
//! Note events feed a [`VoiceAllocator`]; the sounding pitch classes are looked
//! up in interval-vector tables by a [`Classifier`] and named by [`render`].
//! [`ChordEngine`] wires these together behind a velocity/pitch event protocol.
//!
//! ```
//! use chord_finder::{ChordEngine, EngineConfig};
//!
//! let mut engine = ChordEngine::new(EngineConfig::default()).unwrap();
//! engine.set_velocity(100);
//! engine.pitch(60);
//! engine.pitch(64);
//! let report = engine.pitch(67).unwrap();
//! assert_eq!(report.label, "C major");
//! ```

pub mod catalog;
pub mod classify;
pub mod data;
pub mod engine;
pub mod error;
pub mod namer;
pub mod pitch;
pub mod tables;
pub mod voices;

pub use catalog::{ChordType, Inversion};
pub use classify::{circular_distance, most_redundant_member, ChordClassification, Classifier};
pub use engine::{ChordEngine, ChordReport, EngineConfig};
pub use error::{EngineConfigError, Error, Result, TableError, VoiceError};
pub use namer::render;
pub use pitch::{note_name, parse_note_name, PitchClassSet, Spelling};
pub use tables::{ChordTables, IntervalKey, IntervalTable, LookupEntry, TableDefect, TableStats};
pub use voices::{PitchRange, VoiceAllocator, MAX_POLY};
