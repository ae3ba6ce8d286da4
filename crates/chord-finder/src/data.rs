//! Static chord table data.
//!
//! Dyads, triads and quartads are authored cell by cell as ragged rows indexed
//! by interval key: row `i` of the triad table holds every key `(i, j)` that
//! fits in an octave, so it has `10 - i` cells. Each cell is
//! `(chord type, root member index)`.
//!
//! Five- and six-note chords are declared as voicings (semitones above the
//! root) and expanded into all their rotations when the tables are built.

use crate::catalog::ChordType::{self, *};

/// A named chord declared by its tones, in semitones above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordVoicing {
    pub chord_type: ChordType,
    pub tones: &'static [u8],
}

impl ChordVoicing {
    pub const fn new(chord_type: ChordType, tones: &'static [u8]) -> Self {
        Self { chord_type, tones }
    }

    pub fn arity(&self) -> usize {
        self.tones.len()
    }

    /// Pitch classes of the rotation that starts on tone `start`, transposed
    /// so that tone sits on 0. Ascending.
    pub fn rotation(&self, start: usize) -> Vec<u8> {
        let origin = self.tones[start];
        let mut members: Vec<u8> = self
            .tones
            .iter()
            .map(|&t| (t + 12 - origin) % 12)
            .collect();
        members.sort_unstable();
        members
    }

    /// Index of the root within the rotation that starts on tone `start`.
    pub fn root_member(&self, start: usize) -> u8 {
        let n = self.arity();
        ((n - start) % n) as u8
    }
}

pub(crate) const DYADS: [(ChordType, u8); 11] = [
    (Major7, 1),
    (Dominant7, 1),
    (Minor, 0),
    (Major, 0),
    (Major, 1),
    (Dominant7, 0),
    (Major, 0),
    (Major, 1),
    (Minor, 1),
    (Dominant7, 0),
    (Major7, 0),
];

pub(crate) const TRIADS: &[&[(ChordType, u8)]] = &[
    &[
        (Major7Flat9, 1),
        (Major9, 1),
        (MinorMajor7, 1),
        (Major7, 1),
        (Dominant7Sharp11, 2),
        (DominantFlat9, 0),
        (Major7, 1),
        (Major7Sharp5, 1),
        (Minor9, 2),
        (Major7Flat9, 0),
    ],
    &[
        (Minor9, 0),
        (Dominant9, 0),
        (Minor7, 1),
        (Dominant7, 1),
        (Dominant9, 0),
        (HalfDiminished7, 1),
        (Dominant7, 1),
        (Dominant9, 2),
        (Major9, 0),
    ],
    &[
        (Major7Sharp5, 2),
        (Dominant7, 2),
        (Diminished, 0),
        (Minor, 0),
        (Major, 2),
        (Diminished, 2),
        (Minor7, 0),
        (MinorMajor7, 0),
    ],
    &[
        (Major7, 2),
        (HalfDiminished7, 2),
        (Major, 0),
        (Augmented, 0),
        (Minor, 2),
        (Dominant7, 0),
        (Major7, 0),
    ],
    &[
        (DominantFlat9, 1),
        (Dominant9, 1),
        (Minor, 1),
        (Major, 1),
        (Dominant9, 2),
        (Dominant7Sharp11, 1),
    ],
    &[
        (Dominant7Sharp11, 0),
        (Dominant7, 2),
        (Diminished, 1),
        (HalfDiminished7, 0),
        (DominantFlat9, 2),
    ],
    &[
        (Major7, 2),
        (Minor7, 2),
        (Dominant7, 0),
        (Major7, 0),
    ],
    &[
        (MinorMajor7, 2),
        (Dominant9, 1),
        (Major7Sharp5, 0),
    ],
    &[
        (Major9, 2),
        (Minor9, 1),
    ],
    &[
        (Major7Flat9, 2),
    ],
];

pub(crate) const QUARTADS: &[&[&[(ChordType, u8)]]] = &[
    &[
        &[(Major7Flat9Sharp13, 2), (MinorMajorFlat9, 1), (Major7Flat9, 1), (Major7Sharp13, 2), (DiminishedMajor7Flat9, 1), (Major7Flat9, 1), (Major7Sharp13, 2), (Major7Flat9Add13, 1), (Major7Flat9Sharp13, 1)],
        &[(MinorMajor9, 1), (Major9, 1), (HalfDiminishedFlat9, 0), (Minor7Flat9, 0), (Major9, 1), (Diminished7Flat9, 0), (Minor7Flat9, 0), (MinorMajorFlat9, 0)],
        &[(Major7Sharp9, 1), (Dominant7Sharp11, 3), (DominantFlat9, 0), (MinorMajor7, 1), (Dominant7Sharp9, 3), (DominantFlat9, 0), (Major7Flat9, 0)],
        &[(Major11, 1), (Major7Flat5, 1), (Major7, 1), (Major7Sharp5, 1), (Minor9, 3), (Major7Sharp13, 1)],
        &[(DiminishedMajor9, 3), (Dominant11, 3), (Diminished7Flat9, 0), (HalfDiminishedFlat9, 0), (DiminishedMajor7Flat9, 0)],
        &[(Major11, 3), (Dominant7Sharp9, 3), (DominantFlat9, 0), (Major7Flat9, 0)],
        &[(Major7Sharp9, 3), (Minor9, 3), (Major7Sharp13, 1)],
        &[(MinorMajor9, 3), (Major7Flat9Add13, 0)],
        &[(Major7Flat9Sharp13, 0)],
    ],
    &[
        &[(Major7Flat9Add13, 2), (Minor7Flat9, 1), (DominantFlat9, 1), (Minor9, 0), (HalfDiminishedFlat9, 1), (DominantFlat9, 1), (Minor9, 0), (MinorMajor9, 0)],
        &[(Minor9, 1), (Dominant9, 1), (Dominant9, 0), (Dominant7Sharp5, 2), (Dominant9, 1), (Dominant9, 0), (Major9, 0)],
        &[(Dominant7Sharp9, 1), (Dominant11, 3), (HalfDiminished7, 1), (Minor7, 1), (Dominant9, 3), (HalfDiminishedFlat9, 3)],
        &[(Dominant11, 1), (Dominant7Flat5, 3), (Dominant7, 1), (Dominant7Sharp5, 1), (Minor7Flat9, 3)],
        &[(Major7Flat5, 3), (Dominant11, 1), (Dominant9, 0), (Major9, 0)],
        &[(Dominant7Sharp11, 1), (Dominant9, 3), (Diminished7Flat9, 3)],
        &[(Major9, 3), (Minor7Flat9, 3)],
        &[(MinorMajorFlat9, 3)],
    ],
    &[
        &[(Major7Sharp13, 3), (Diminished7Flat9, 1), (Dominant7Sharp9, 0), (Major7Sharp5, 2), (Diminished7Flat9, 1), (Dominant7Sharp9, 0), (Major7Sharp9, 0)],
        &[(DominantFlat9, 2), (Dominant9, 2), (Minor7, 2), (Dominant7, 2), (Dominant11, 2), (Dominant7Sharp11, 2)],
        &[(Diminished7Flat9, 2), (Dominant7, 3), (Diminished7, 0), (HalfDiminished7, 0), (DominantFlat9, 3)],
        &[(Major7, 3), (HalfDiminished7, 3), (Minor7, 0), (MinorMajor7, 0)],
        &[(DominantFlat9, 2), (Dominant9, 2), (Dominant7Sharp9, 2)],
        &[(HalfDiminishedFlat9, 2), (DominantFlat9, 3)],
        &[(Major7Flat9, 3)],
    ],
    &[
        &[(Major7Flat9, 2), (Major9, 2), (MinorMajor7, 2), (Major7, 2), (Dominant11, 0), (Major11, 0)],
        &[(HalfDiminishedFlat9, 2), (Dominant7Sharp5, 3), (HalfDiminished7, 2), (Dominant7Flat5, 0), (Major7Flat5, 0)],
        &[(Major7Sharp5, 3), (Minor7, 3), (Dominant7, 0), (Major7, 0)],
        &[(MinorMajor7, 3), (Dominant7Sharp5, 0), (Major7Sharp5, 0)],
        &[(Minor7Flat9, 2), (Minor9, 2)],
        &[(Major7Sharp13, 0)],
    ],
    &[
        &[(DiminishedMajor7Flat9, 2), (Minor7Flat9, 1), (DominantFlat9, 1), (Major7Flat5, 2), (DiminishedMajor9, 0)],
        &[(Minor9, 1), (Dominant9, 1), (Dominant11, 0), (Dominant11, 2)],
        &[(Dominant7Sharp9, 1), (Dominant9, 3), (Diminished7Flat9, 3)],
        &[(Major9, 3), (HalfDiminishedFlat9, 3)],
        &[(DiminishedMajor7Flat9, 3)],
    ],
    &[
        &[(Major7Sharp13, 3), (HalfDiminishedFlat9, 1), (Dominant7Sharp11, 0), (Major11, 2)],
        &[(DominantFlat9, 2), (Dominant9, 2), (Dominant7Sharp9, 2)],
        &[(Diminished7Flat9, 2), (DominantFlat9, 3)],
        &[(Major7Flat9, 3)],
    ],
    &[
        &[(Major7Flat9, 2), (Major9, 2), (Major7Sharp9, 2)],
        &[(Minor7Flat9, 2), (Minor9, 2)],
        &[(Major7Sharp13, 0)],
    ],
    &[
        &[(MinorMajorFlat9, 2), (MinorMajor9, 2)],
        &[(Major7Flat9Add13, 3)],
    ],
    &[
        &[(Major7Flat9Sharp13, 3)],
    ],
];

pub(crate) const QUINTAD_VOICINGS: &[ChordVoicing] = &[
    ChordVoicing::new(Major9, &[0, 2, 4, 7, 11]),
    ChordVoicing::new(Dominant9, &[0, 2, 4, 7, 10]),
    ChordVoicing::new(Minor9, &[0, 2, 3, 7, 10]),
    ChordVoicing::new(HalfDiminished9, &[0, 2, 3, 6, 10]),
    ChordVoicing::new(MinorMajor9, &[0, 2, 3, 7, 11]),
    ChordVoicing::new(DiminishedMajor9, &[0, 2, 3, 6, 11]),
    ChordVoicing::new(Major9Flat5, &[0, 2, 4, 6, 11]),
    ChordVoicing::new(Dominant9Flat5, &[0, 2, 4, 6, 10]),
    ChordVoicing::new(MinorMajor9Flat11, &[0, 2, 3, 4, 11]),
    ChordVoicing::new(Major7Flat9, &[0, 1, 4, 7, 11]),
    ChordVoicing::new(Major7Sharp5Flat9, &[0, 1, 4, 8, 11]),
    ChordVoicing::new(Dominant7Flat9, &[0, 1, 4, 7, 10]),
    ChordVoicing::new(Minor7Flat9, &[0, 1, 3, 7, 10]),
    ChordVoicing::new(MinorFlat9Sharp11, &[0, 1, 3, 6, 7]),
    ChordVoicing::new(HalfDiminishedFlat9, &[0, 1, 3, 6, 10]),
    ChordVoicing::new(MinorMajorFlat9, &[0, 1, 3, 7, 11]),
    ChordVoicing::new(DiminishedMajor7Flat9, &[0, 1, 3, 6, 11]),
    ChordVoicing::new(Diminished7Flat9, &[0, 1, 3, 6, 9]),
    ChordVoicing::new(Major7Sharp9, &[0, 3, 4, 7, 11]),
    ChordVoicing::new(Dominant7Sharp9, &[0, 3, 4, 7, 10]),
    ChordVoicing::new(Major7Sharp11, &[0, 4, 6, 7, 11]),
    ChordVoicing::new(Dominant9Flat13, &[0, 2, 4, 7, 8]),
    ChordVoicing::new(Major9Sharp13, &[0, 2, 7, 10, 11]),
    ChordVoicing::new(Major9Sharp13, &[0, 2, 4, 10, 11]),
    ChordVoicing::new(MajorSharp9Sharp11, &[0, 3, 4, 6, 7]),
    ChordVoicing::new(HalfDiminishedFlat11, &[0, 3, 4, 6, 10]),
    ChordVoicing::new(Major11, &[0, 4, 5, 7, 11]),
    ChordVoicing::new(Major11, &[0, 2, 4, 5, 11]),
    ChordVoicing::new(Dominant11, &[0, 4, 5, 7, 10]),
    ChordVoicing::new(Dominant11, &[0, 2, 4, 5, 7]),
    ChordVoicing::new(Dominant11, &[0, 2, 4, 5, 10]),
    ChordVoicing::new(Minor11, &[0, 3, 5, 7, 10]),
    ChordVoicing::new(Minor11, &[0, 2, 3, 5, 7]),
    ChordVoicing::new(Diminished11, &[0, 2, 3, 5, 6]),
    ChordVoicing::new(MinorMajor11, &[0, 3, 5, 7, 11]),
    ChordVoicing::new(DiminishedMajor11, &[0, 3, 5, 6, 11]),
    ChordVoicing::new(Major11Flat5, &[0, 4, 5, 6, 11]),
    ChordVoicing::new(Major11Sharp5, &[0, 4, 5, 8, 11]),
    ChordVoicing::new(Major11Flat9, &[0, 1, 4, 5, 11]),
    ChordVoicing::new(Major11Sharp9, &[0, 3, 4, 5, 11]),
    ChordVoicing::new(Major11Sharp13, &[0, 4, 5, 10, 11]),
    ChordVoicing::new(Dominant11Flat5, &[0, 4, 5, 6, 10]),
    ChordVoicing::new(Dominant11Flat9, &[0, 1, 4, 5, 10]),
    ChordVoicing::new(Dominant11Flat9, &[0, 1, 4, 5, 7]),
    ChordVoicing::new(Dominant11Sharp9, &[0, 3, 4, 5, 10]),
    ChordVoicing::new(Dominant7Sharp11, &[0, 4, 6, 7, 10]),
    ChordVoicing::new(Minor7Sharp11, &[0, 3, 6, 7, 10]),
    ChordVoicing::new(Dominant13Sharp11, &[0, 6, 7, 9, 10]),
    ChordVoicing::new(Major7Flat9Sharp13, &[0, 1, 4, 10, 11]),
    ChordVoicing::new(Dominant7Flat13, &[0, 4, 7, 8, 10]),
];

pub(crate) const SEXTAD_VOICINGS: &[ChordVoicing] = &[
    ChordVoicing::new(Dominant9Flat13, &[0, 2, 4, 7, 8, 10]),
    ChordVoicing::new(Minor9Sharp11, &[0, 2, 3, 6, 7, 10]),
    ChordVoicing::new(Major11, &[0, 2, 4, 5, 7, 11]),
    ChordVoicing::new(Dominant11, &[0, 2, 4, 5, 7, 10]),
    ChordVoicing::new(HalfDiminished11, &[0, 2, 3, 5, 6, 10]),
    ChordVoicing::new(Major11Flat5, &[0, 2, 4, 5, 6, 11]),
    ChordVoicing::new(Major11Flat5Flat9, &[0, 1, 4, 5, 6, 11]),
    ChordVoicing::new(Major11Sharp13, &[0, 2, 4, 5, 10, 11]),
    ChordVoicing::new(HalfDiminished11Flat9, &[0, 1, 3, 5, 6, 10]),
    ChordVoicing::new(Major11Flat13, &[0, 4, 5, 7, 8, 11]),
    ChordVoicing::new(Dominant11Flat5, &[0, 2, 4, 5, 6, 10]),
    ChordVoicing::new(Dominant11Sharp9, &[0, 3, 4, 5, 7, 10]),
    ChordVoicing::new(MinorFlat9Sharp11, &[0, 1, 3, 6, 7, 10]),
    ChordVoicing::new(Dominant7Sharp11, &[0, 2, 4, 6, 7, 10]),
    ChordVoicing::new(Dominant13Sharp11, &[0, 4, 6, 7, 9, 10]),
];

/// Declared voicings for the given arity (5 or 6).
pub fn voicings(arity: usize) -> &'static [ChordVoicing] {
    match arity {
        5 => QUINTAD_VOICINGS,
        6 => SEXTAD_VOICINGS,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voicings_are_ascending_within_octave() {
        for v in QUINTAD_VOICINGS.iter().chain(SEXTAD_VOICINGS) {
            assert_eq!(v.tones[0], 0, "{:?} must start on its root", v);
            assert!(v.tones.windows(2).all(|w| w[0] < w[1]), "{:?}", v);
            assert!(v.tones.iter().all(|&t| t < 12), "{:?}", v);
        }
    }

    #[test]
    fn voicing_arities_match_tables() {
        assert!(QUINTAD_VOICINGS.iter().all(|v| v.arity() == 5));
        assert!(SEXTAD_VOICINGS.iter().all(|v| v.arity() == 6));
    }

    #[test]
    fn rotation_places_root_at_root_member() {
        let maj9 = ChordVoicing::new(Major9, &[0, 2, 4, 7, 11]);
        // Starting on B: B C D E G, root C is member 1
        assert_eq!(maj9.rotation(4), vec![0, 1, 3, 5, 8]);
        assert_eq!(maj9.root_member(4), 1);
        assert_eq!(maj9.rotation(0), vec![0, 2, 4, 7, 11]);
        assert_eq!(maj9.root_member(0), 0);
    }

    #[test]
    fn hand_tables_fill_the_octave() {
        assert_eq!(TRIADS.len(), 10);
        for (i, row) in TRIADS.iter().enumerate() {
            assert_eq!(row.len(), 10 - i);
        }
        assert_eq!(QUARTADS.len(), 9);
        for (i, plane) in QUARTADS.iter().enumerate() {
            assert_eq!(plane.len(), 9 - i);
            for (j, row) in plane.iter().enumerate() {
                assert_eq!(row.len(), 9 - i - j);
            }
        }
    }
}
