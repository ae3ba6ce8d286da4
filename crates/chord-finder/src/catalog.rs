//! The closed set of chord qualities the finder can name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chord quality produced by classification.
///
/// Besides the named qualities there are three sentinels:
/// `Unknown` (the interval pattern has no chord), `Chromatic` (more than six
/// distinct pitch classes) and `Empty` (no active notes at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    Unison,
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Dominant7,
    Minor7,
    HalfDiminished7,
    Diminished7,
    MinorMajor7,
    Major7Sharp5,
    Major7Flat5,
    Dominant7Sharp5,
    Dominant7Flat5,
    DominantFlat9,
    Major9,
    Dominant9,
    Minor9,
    HalfDiminished9,
    MinorMajor9,
    DiminishedMajor9,
    Major9Flat5,
    Dominant9Flat5,
    Dominant9Flat13,
    Minor9Sharp11,
    MinorMajor9Flat11,
    Major7Flat9,
    Major7Sharp5Flat9,
    Dominant7Flat9,
    Minor7Flat9,
    MinorFlat9Sharp11,
    HalfDiminishedFlat9,
    Diminished7Flat9,
    MinorMajorFlat9,
    DiminishedMajor7Flat9,
    Major7Sharp9,
    Dominant7Sharp9,
    Major7Sharp11,
    MajorSharp9Sharp11,
    HalfDiminishedFlat11,
    Major11,
    Dominant11,
    Minor11,
    HalfDiminished11,
    Diminished11,
    MinorMajor11,
    DiminishedMajor11,
    Major11Flat5,
    Major11Sharp5,
    Major11Flat9,
    Major11Sharp9,
    Major11Flat13,
    Major11Sharp13,
    Major11Flat5Flat9,
    Dominant11Flat5,
    Dominant11Flat9,
    Dominant11Sharp9,
    HalfDiminished11Flat9,
    Dominant7Sharp11,
    Minor7Sharp11,
    Dominant13Sharp11,
    Major7Flat9Add13,
    Major7Sharp13,
    Major9Sharp13,
    Major7Flat9Sharp13,
    Dominant7Flat13,
    Chromatic,
    Unknown,
    Empty,
}

impl ChordType {
    /// Every named quality, in catalog order. Sentinels are not included.
    pub const ALL: [ChordType; 67] = [
        ChordType::Unison,
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Major7,
        ChordType::Dominant7,
        ChordType::Minor7,
        ChordType::HalfDiminished7,
        ChordType::Diminished7,
        ChordType::MinorMajor7,
        ChordType::Major7Sharp5,
        ChordType::Major7Flat5,
        ChordType::Dominant7Sharp5,
        ChordType::Dominant7Flat5,
        ChordType::DominantFlat9,
        ChordType::Major9,
        ChordType::Dominant9,
        ChordType::Minor9,
        ChordType::HalfDiminished9,
        ChordType::MinorMajor9,
        ChordType::DiminishedMajor9,
        ChordType::Major9Flat5,
        ChordType::Dominant9Flat5,
        ChordType::Dominant9Flat13,
        ChordType::Minor9Sharp11,
        ChordType::MinorMajor9Flat11,
        ChordType::Major7Flat9,
        ChordType::Major7Sharp5Flat9,
        ChordType::Dominant7Flat9,
        ChordType::Minor7Flat9,
        ChordType::MinorFlat9Sharp11,
        ChordType::HalfDiminishedFlat9,
        ChordType::Diminished7Flat9,
        ChordType::MinorMajorFlat9,
        ChordType::DiminishedMajor7Flat9,
        ChordType::Major7Sharp9,
        ChordType::Dominant7Sharp9,
        ChordType::Major7Sharp11,
        ChordType::MajorSharp9Sharp11,
        ChordType::HalfDiminishedFlat11,
        ChordType::Major11,
        ChordType::Dominant11,
        ChordType::Minor11,
        ChordType::HalfDiminished11,
        ChordType::Diminished11,
        ChordType::MinorMajor11,
        ChordType::DiminishedMajor11,
        ChordType::Major11Flat5,
        ChordType::Major11Sharp5,
        ChordType::Major11Flat9,
        ChordType::Major11Sharp9,
        ChordType::Major11Flat13,
        ChordType::Major11Sharp13,
        ChordType::Major11Flat5Flat9,
        ChordType::Dominant11Flat5,
        ChordType::Dominant11Flat9,
        ChordType::Dominant11Sharp9,
        ChordType::HalfDiminished11Flat9,
        ChordType::Dominant7Sharp11,
        ChordType::Minor7Sharp11,
        ChordType::Dominant13Sharp11,
        ChordType::Major7Flat9Add13,
        ChordType::Major7Sharp13,
        ChordType::Major9Sharp13,
        ChordType::Major7Flat9Sharp13,
        ChordType::Dominant7Flat13,
    ];

    /// Display string appended after the root name in a chord label.
    ///
    /// `Empty` has no display string of its own; the namer substitutes the
    /// configured default chord name instead.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChordType::Unison => "unison",
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Diminished => "diminished",
            ChordType::Augmented => "augmented",
            ChordType::Major7 => "major 7th",
            ChordType::Dominant7 => "dominant 7th",
            ChordType::Minor7 => "minor 7th",
            ChordType::HalfDiminished7 => "half diminished 7th",
            ChordType::Diminished7 => "diminished 7th",
            ChordType::MinorMajor7 => "minor major 7th",
            ChordType::Major7Sharp5 => "major 7th #5",
            ChordType::Major7Flat5 => "major 7th b5",
            ChordType::Dominant7Sharp5 => "dominant 7th #5",
            ChordType::Dominant7Flat5 => "dominant 7th b5",
            ChordType::DominantFlat9 => "dominant b9",
            ChordType::Major9 => "major 9th",
            ChordType::Dominant9 => "dominant 9th",
            ChordType::Minor9 => "minor 9th",
            ChordType::HalfDiminished9 => "half diminished 9th",
            ChordType::MinorMajor9 => "minor major 9th",
            ChordType::DiminishedMajor9 => "diminished major 9th",
            ChordType::Major9Flat5 => "major 9th b5",
            ChordType::Dominant9Flat5 => "dominant 9th b5",
            ChordType::Dominant9Flat13 => "dominant 9th b13",
            ChordType::Minor9Sharp11 => "minor 9th #11",
            ChordType::MinorMajor9Flat11 => "minor/maj 9th b11",
            ChordType::Major7Flat9 => "major 7th b9",
            ChordType::Major7Sharp5Flat9 => "major 7th #5 b9",
            ChordType::Dominant7Flat9 => "dominant 7th b9",
            ChordType::Minor7Flat9 => "minor 7th b9",
            ChordType::MinorFlat9Sharp11 => "minor b9 #11",
            ChordType::HalfDiminishedFlat9 => "half diminished b9",
            ChordType::Diminished7Flat9 => "diminished b9",
            ChordType::MinorMajorFlat9 => "minor major b9",
            ChordType::DiminishedMajor7Flat9 => "diminished M7 b9",
            ChordType::Major7Sharp9 => "major 7th #9",
            ChordType::Dominant7Sharp9 => "dominant #9",
            ChordType::Major7Sharp11 => "major 7th #11",
            ChordType::MajorSharp9Sharp11 => "major #9 #11",
            ChordType::HalfDiminishedFlat11 => "half diminished b11",
            ChordType::Major11 => "major 11th",
            ChordType::Dominant11 => "dominant 11th",
            ChordType::Minor11 => "minor 11th",
            ChordType::HalfDiminished11 => "half diminished 11th",
            ChordType::Diminished11 => "diminished 11th",
            ChordType::MinorMajor11 => "minor major 11th",
            ChordType::DiminishedMajor11 => "diminished maj 11th",
            ChordType::Major11Flat5 => "major 11th b5",
            ChordType::Major11Sharp5 => "major 11th #5",
            ChordType::Major11Flat9 => "major 11th b9",
            ChordType::Major11Sharp9 => "major 11th #9",
            ChordType::Major11Flat13 => "major 11th b13",
            ChordType::Major11Sharp13 => "major 11th #13",
            ChordType::Major11Flat5Flat9 => "major 11th b5 b9",
            ChordType::Dominant11Flat5 => "dominant 11th b5",
            ChordType::Dominant11Flat9 => "dominant 11th b9",
            ChordType::Dominant11Sharp9 => "dominant 11th #9",
            ChordType::HalfDiminished11Flat9 => "half dim 11th b9",
            ChordType::Dominant7Sharp11 => "dominant #11",
            ChordType::Minor7Sharp11 => "minor 7th #11",
            ChordType::Dominant13Sharp11 => "dominant 13th #11",
            ChordType::Major7Flat9Add13 => "major 7 b9 13",
            ChordType::Major7Sharp13 => "major 7th #13",
            ChordType::Major9Sharp13 => "major 9th #13",
            ChordType::Major7Flat9Sharp13 => "major 7 b9 #13",
            ChordType::Dominant7Flat13 => "dominant 7th b13",
            ChordType::Chromatic => "chromatic",
            ChordType::Unknown => "unknown",
            ChordType::Empty => "",
        }
    }

    /// True for `Unknown`, `Chromatic` and `Empty`.
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            ChordType::Unknown | ChordType::Chromatic | ChordType::Empty
        )
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// State of inversion of a classified chord.
///
/// Larger chords reuse `Second` for every inversion above the first, so the
/// lowest pitch class of a ninth chord sitting on its seventh is still `Second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inversion {
    #[default]
    Root,
    First,
    Second,
}

impl Inversion {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Inversion::Root),
            1 => Some(Inversion::First),
            2 => Some(Inversion::Second),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
        }
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inversion::Root => write!(f, "root position"),
            Inversion::First => write!(f, "first inversion"),
            Inversion::Second => write!(f, "second inversion"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_no_duplicate_display_names() {
        let names: HashSet<_> = ChordType::ALL.iter().map(|t| t.display_name()).collect();
        assert_eq!(names.len(), ChordType::ALL.len());
    }

    #[test]
    fn catalog_excludes_sentinels() {
        assert!(ChordType::ALL.iter().all(|t| !t.is_sentinel()));
        assert!(!ChordType::ALL.contains(&ChordType::Unknown));
    }

    #[test]
    fn display_uses_catalog_strings() {
        assert_eq!(ChordType::Major.to_string(), "major");
        assert_eq!(ChordType::HalfDiminished11Flat9.to_string(), "half dim 11th b9");
        assert_eq!(ChordType::MinorMajor9Flat11.to_string(), "minor/maj 9th b11");
        assert_eq!(ChordType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ChordType::Dominant7Sharp9).unwrap();
        assert_eq!(json, "\"dominant7_sharp9\"");
        let back: ChordType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChordType::Dominant7Sharp9);
    }

    #[test]
    fn inversion_index_roundtrip() {
        for i in 0..3 {
            assert_eq!(Inversion::from_index(i).map(|inv| inv.index()), Some(i));
        }
        assert_eq!(Inversion::from_index(3), None);
    }
}
