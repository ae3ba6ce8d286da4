//! Whole-table properties of classification, checked over every pitch-class set.

use chord_finder::data::voicings;
use chord_finder::{ChordTables, ChordType, Classifier, PitchClassSet};

fn all_sets_of_size(n: usize) -> impl Iterator<Item = PitchClassSet> {
    (0u16..1 << 12)
        .filter(move |mask| mask.count_ones() as usize == n)
        .map(|mask| PitchClassSet::from_pitch_classes((0..12u8).filter(|pc| mask & (1 << pc) != 0)))
}

/// A set that maps onto itself under some non-trivial transposition has no
/// single root that moves with it.
fn is_symmetric(set: &PitchClassSet) -> bool {
    (1..12).any(|t| set.transposed(t) == *set)
}

#[test]
fn tables_build_cleanly() {
    let tables = ChordTables::build_checked().expect("chord tables have authoring defects");
    for stats in tables.stats() {
        assert!(stats.assigned > 0, "{}-note table is empty", stats.arity);
    }
}

#[test]
fn every_single_class_is_unison() {
    let classifier = Classifier::new();
    for pc in 0..12 {
        let c = classifier.classify(&PitchClassSet::from_pitch_classes([pc]));
        assert_eq!(c.chord_type, ChordType::Unison);
        assert_eq!(c.root, Some(pc));
    }
}

#[test]
fn small_sets_always_have_a_chord() {
    let classifier = Classifier::new();
    for n in 2..=4 {
        for set in all_sets_of_size(n) {
            let c = classifier.classify(&set);
            assert_ne!(c.chord_type, ChordType::Unknown, "no chord for {}", set);
            assert!(c.root.is_some(), "no root for {}", set);
        }
    }
}

#[test]
fn small_sets_are_transposition_invariant() {
    let classifier = Classifier::new();
    for n in 2..=4 {
        for set in all_sets_of_size(n) {
            let base = classifier.classify(&set);
            let symmetric = is_symmetric(&set);
            for t in 1..12u8 {
                let shifted = classifier.classify(&set.transposed(t));
                assert_eq!(
                    shifted.chord_type, base.chord_type,
                    "{} transposed by {}",
                    set, t
                );
                if symmetric {
                    continue;
                }
                let (Some(a), Some(b)) = (base.root, shifted.root) else {
                    panic!("missing root for {}", set);
                };
                assert_eq!((a + t) % 12, b, "root of {} transposed by {}", set, t);
            }
        }
    }
}

#[test]
fn every_declared_rotation_classifies_as_declared() {
    let classifier = Classifier::new();
    for arity in [5, 6] {
        for voicing in voicings(arity) {
            for start in 0..arity {
                let members = voicing.rotation(start);
                let root = (12 - voicing.tones[start]) % 12;
                for t in 0..12u8 {
                    let set = PitchClassSet::from_pitch_classes(members.iter().copied())
                        .transposed(t);
                    let c = classifier.classify(&set);
                    assert_eq!(
                        c.chord_type, voicing.chord_type,
                        "rotation {} of {:?} at +{}",
                        start, voicing.tones, t
                    );
                    assert_eq!(c.root, Some((root + t) % 12));
                }
            }
        }
    }
}

#[test]
fn dense_sets_resolve_through_elimination() {
    let classifier = Classifier::new();
    let mut misses = 0;
    for set in all_sets_of_size(6) {
        let c = classifier.classify(&set);
        assert_ne!(c.chord_type, ChordType::Unknown, "no chord for {}", set);

        if let Some(dropped) = classifier.eliminate(&set) {
            misses += 1;
            let mut reduced = set;
            reduced.remove(dropped);
            assert_eq!(c, classifier.classify(&reduced), "fallback for {}", set);
        }
    }
    assert_eq!(misses, 744);
}

#[test]
fn elimination_is_deterministic() {
    let classifier = Classifier::new();
    let set = PitchClassSet::from_pitch_classes([0, 1, 3, 4, 6, 9]);
    let first = classifier.classify(&set);
    let dropped = classifier.eliminate(&set);
    for _ in 0..100 {
        assert_eq!(classifier.classify(&set), first);
        assert_eq!(classifier.eliminate(&set), dropped);
    }
    assert_eq!(dropped, Some(1));

    let fresh = Classifier::with_tables(std::sync::Arc::new(ChordTables::build()));
    assert_eq!(fresh.classify(&set), first);
}
