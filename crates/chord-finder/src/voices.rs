//! Sounding-voice bookkeeping.

use serde::{Deserialize, Serialize};

use crate::error::VoiceError;
use crate::pitch::PitchClassSet;

/// Maximum simultaneously sounding voices.
pub const MAX_POLY: usize = 32;

/// Inclusive pitch window. Events outside it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRange {
    pub lower: u8,
    pub upper: u8,
}

impl PitchRange {
    pub fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, pitch: u8) -> bool {
        (self.lower..=self.upper).contains(&pitch)
    }
}

impl Default for PitchRange {
    fn default() -> Self {
        Self::new(0, 128)
    }
}

/// Fixed slots of sounding pitches.
///
/// The same pitch may occupy several slots; a note-off frees the first one.
#[derive(Debug, Clone)]
pub struct VoiceAllocator {
    slots: [Option<u8>; MAX_POLY],
    active: usize,
}

impl Default for VoiceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceAllocator {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_POLY],
            active: 0,
        }
    }

    /// Apply one note event. Velocity 0 is a note-off.
    ///
    /// Returns `Ok(None)` when the pitch is outside `range` and nothing changed,
    /// `Ok(Some(set))` with the recomputed pitch classes after an accepted event.
    /// Rejected events leave the voices untouched.
    pub fn apply(
        &mut self,
        pitch: u8,
        velocity: u8,
        range: PitchRange,
    ) -> Result<Option<PitchClassSet>, VoiceError> {
        if !range.contains(pitch) {
            return Ok(None);
        }
        if velocity == 0 {
            self.release(pitch)?;
        } else {
            self.allocate(pitch)?;
        }
        Ok(Some(self.pitch_classes()))
    }

    fn allocate(&mut self, pitch: u8) -> Result<usize, VoiceError> {
        if self.active >= MAX_POLY {
            return Err(VoiceError::PolyphonyExceeded {
                pitch,
                limit: MAX_POLY,
            });
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(VoiceError::PolyphonyExceeded {
                pitch,
                limit: MAX_POLY,
            })?;
        self.slots[slot] = Some(pitch);
        self.active += 1;
        Ok(slot)
    }

    fn release(&mut self, pitch: u8) -> Result<usize, VoiceError> {
        let slot = self
            .slots
            .iter()
            .position(|s| *s == Some(pitch))
            .ok_or(VoiceError::UnmatchedNoteOff { pitch })?;
        self.slots[slot] = None;
        self.active -= 1;
        Ok(slot)
    }

    /// Pitch classes of every occupied slot, recomputed from scratch.
    pub fn pitch_classes(&self) -> PitchClassSet {
        PitchClassSet::from_pitches(self.slots.iter().flatten().copied())
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Sounding pitches in slot order.
    pub fn active_pitches(&self) -> Vec<u8> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn clear(&mut self) {
        self.slots = [None; MAX_POLY];
        self.active = 0;
    }
}
