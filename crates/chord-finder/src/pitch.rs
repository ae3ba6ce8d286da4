//! Pitch classes, pitch-class sets and note spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number of pitch classes in an octave.
pub const PITCH_CLASSES: usize = 12;

const NOTE_NAMES_FLAT: [&str; PITCH_CLASSES] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
const NOTE_NAMES_SHARP: [&str; PITCH_CLASSES] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// How black-key roots are spelled in labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Flat,
    Sharp,
}

impl FromStr for Spelling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "flats" | "b" => Ok(Spelling::Flat),
            "sharp" | "sharps" | "#" => Ok(Spelling::Sharp),
            other => Err(Error::UnknownSpelling(other.to_string())),
        }
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spelling::Flat => write!(f, "flat"),
            Spelling::Sharp => write!(f, "sharp"),
        }
    }
}

pub fn note_name(pitch_class: u8, spelling: Spelling) -> &'static str {
    let idx = (pitch_class as usize) % PITCH_CLASSES;
    match spelling {
        Spelling::Flat => NOTE_NAMES_FLAT[idx],
        Spelling::Sharp => NOTE_NAMES_SHARP[idx],
    }
}

/// Parse a note name ("C", "eb", "F#", "Bbb") or a number into a pitch class.
///
/// Numbers are taken as MIDI pitches or pitch classes and reduced mod 12.
pub fn parse_note_name(name: &str) -> Result<u8, Error> {
    let name = name.trim();
    if let Ok(n) = name.parse::<u8>() {
        return Ok(n % PITCH_CLASSES as u8);
    }

    let mut chars = name.chars();
    let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(Error::NoteName(name.to_string())),
    };

    let mut offset = 0i32;
    for c in chars {
        match c {
            '#' | '♯' => offset += 1,
            'b' | '♭' => offset -= 1,
            _ => return Err(Error::NoteName(name.to_string())),
        }
    }

    Ok((base + offset).rem_euclid(PITCH_CLASSES as i32) as u8)
}

/// The set of pitch classes currently sounding.
///
/// Membership is a 12-bit mask. For classes added from absolute pitches the
/// lowest absolute pitch mapping to each class is kept alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PitchClassSet {
    mask: u16,
    lowest: [Option<u8>; PITCH_CLASSES],
}

impl PitchClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pitch_classes<I: IntoIterator<Item = u8>>(pitch_classes: I) -> Self {
        let mut set = Self::new();
        for pc in pitch_classes {
            set.insert(pc);
        }
        set
    }

    pub fn from_pitches<I: IntoIterator<Item = u8>>(pitches: I) -> Self {
        let mut set = Self::new();
        for pitch in pitches {
            set.insert_pitch(pitch);
        }
        set
    }

    /// Add a pitch class without absolute pitch information.
    pub fn insert(&mut self, pitch_class: u8) {
        self.mask |= 1 << (pitch_class as usize % PITCH_CLASSES);
    }

    /// Add an absolute pitch, keeping the lowest pitch seen for its class.
    pub fn insert_pitch(&mut self, pitch: u8) {
        let pc = pitch as usize % PITCH_CLASSES;
        self.mask |= 1 << pc;
        self.lowest[pc] = Some(match self.lowest[pc] {
            Some(existing) => existing.min(pitch),
            None => pitch,
        });
    }

    pub fn remove(&mut self, pitch_class: u8) {
        let pc = pitch_class as usize % PITCH_CLASSES;
        self.mask &= !(1 << pc);
        self.lowest[pc] = None;
    }

    pub fn contains(&self, pitch_class: u8) -> bool {
        self.mask & (1 << (pitch_class as usize % PITCH_CLASSES)) != 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn mask(&self) -> u16 {
        self.mask
    }

    /// Present pitch classes in ascending order.
    pub fn members(&self) -> Vec<u8> {
        (0..PITCH_CLASSES as u8).filter(|&pc| self.contains(pc)).collect()
    }

    /// Lowest present pitch class (first in ascending scan).
    pub fn lowest_class(&self) -> Option<u8> {
        if self.mask == 0 {
            None
        } else {
            Some(self.mask.trailing_zeros() as u8)
        }
    }

    /// Lowest absolute pitch recorded for a pitch class.
    pub fn lowest_pitch(&self, pitch_class: u8) -> Option<u8> {
        self.lowest[pitch_class as usize % PITCH_CLASSES]
    }

    /// Lowest absolute pitch across all classes.
    pub fn bass(&self) -> Option<u8> {
        self.lowest.iter().flatten().copied().min()
    }

    /// Shift every pitch class up by `semitones`. Absolute pitches are not carried.
    pub fn transposed(&self, semitones: u8) -> Self {
        Self::from_pitch_classes(self.members().into_iter().map(|pc| (pc + semitones % 12) % 12))
    }
}

impl fmt::Display for PitchClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self
            .members()
            .into_iter()
            .map(|pc| note_name(pc, Spelling::Flat))
            .collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
