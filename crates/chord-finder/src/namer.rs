//! Classification to text.

use crate::catalog::ChordType;
use crate::classify::ChordClassification;
use crate::pitch::{note_name, Spelling};

/// Render a classification as a chord label, e.g. `"Eb minor 7th"`.
///
/// An empty classification renders as `default_chord_name` unchanged.
pub fn render(
    classification: &ChordClassification,
    spelling: Spelling,
    default_chord_name: &str,
) -> String {
    if classification.chord_type == ChordType::Empty {
        return default_chord_name.to_string();
    }
    let root = match classification.root {
        Some(pc) => note_name(pc, spelling),
        None => "no root",
    };
    format!("{} {}", root, classification.chord_type.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Inversion;

    fn rooted(chord_type: ChordType, root: u8) -> ChordClassification {
        ChordClassification {
            chord_type,
            root: Some(root),
            inversion: Inversion::Root,
        }
    }

    #[test]
    fn root_then_quality() {
        let label = render(&rooted(ChordType::Minor7, 3), Spelling::Flat, "");
        assert_eq!(label, "Eb minor 7th");
    }

    #[test]
    fn sharp_spelling() {
        let label = render(&rooted(ChordType::Major, 6), Spelling::Sharp, "");
        assert_eq!(label, "F# major");
    }

    #[test]
    fn empty_uses_default_name_verbatim() {
        let label = render(&ChordClassification::empty(), Spelling::Flat, "  N.C. ");
        assert_eq!(label, "  N.C. ");
        assert_eq!(render(&ChordClassification::empty(), Spelling::Flat, ""), "");
    }

    #[test]
    fn unknown_without_root() {
        let label = render(&ChordClassification::unknown(), Spelling::Flat, "-");
        assert_eq!(label, "no root unknown");
    }

    #[test]
    fn chromatic_names_lowest_class() {
        let label = render(&rooted(ChordType::Chromatic, 0), Spelling::Flat, "");
        assert_eq!(label, "C chromatic");
    }
}
