//! End-to-end note-event scenarios through `ChordEngine`.

use chord_finder::{ChordEngine, ChordType, EngineConfig, Inversion, PitchClassSet, MAX_POLY};
use pretty_assertions::assert_eq;

fn engine_with_default(name: &str) -> ChordEngine {
    ChordEngine::new(EngineConfig {
        default_chord_name: name.to_string(),
        ..EngineConfig::default()
    })
    .expect("default config is valid")
}

fn play(engine: &mut ChordEngine, pitches: &[u8]) -> String {
    pitches
        .iter()
        .filter_map(|&p| engine.note_on(p, 100))
        .last()
        .map(|r| r.label)
        .unwrap_or_default()
}

fn label_of(pcs: &[u8]) -> String {
    engine_with_default("")
        .classify_set(&PitchClassSet::from_pitch_classes(pcs.iter().copied()))
        .label
}

#[test]
fn silence_uses_default_chord_name() {
    let mut engine = engine_with_default("no chord");
    assert_eq!(engine.current().label, "no chord");
    engine.note_on(60, 100);
    assert_eq!(engine.note_off(60).map(|r| r.label).as_deref(), Some("no chord"));
}

#[test]
fn single_c_is_unison() {
    let mut engine = engine_with_default("");
    assert_eq!(play(&mut engine, &[60]), "C unison");
}

#[test]
fn c_major_root_position() {
    let mut engine = engine_with_default("");
    assert_eq!(play(&mut engine, &[60, 64, 67]), "C major");
    assert_eq!(engine.current().classification.inversion, Inversion::Root);
}

#[test]
fn arrival_order_is_irrelevant() {
    let mut ordered = engine_with_default("");
    let mut shuffled = engine_with_default("");
    play(&mut ordered, &[60, 64, 67]);
    play(&mut shuffled, &[64, 67, 60]);
    assert_eq!(ordered.current(), shuffled.current());
}

#[test]
fn seven_class_cluster_is_chromatic() {
    let mut engine = engine_with_default("");
    assert_eq!(play(&mut engine, &[60, 61, 62, 63, 64, 65, 66]), "C chromatic");
    assert_eq!(
        engine.current().classification.chord_type,
        ChordType::Chromatic
    );
}

#[test]
fn unmatched_sextad_names_its_reduced_set() {
    let mut engine = engine_with_default("");
    let label = play(&mut engine, &[60, 62, 64, 65, 67, 69]);
    assert_eq!(label, label_of(&[0, 2, 5, 7, 9]));
    assert_eq!(label, "D minor 11th");
}

#[test]
fn labels_for_common_chords() {
    let cases: &[(&[u8], &str)] = &[
        (&[0, 7], "C major"),
        (&[4, 10], "C dominant 7th"),
        (&[0, 6], "Ab dominant 7th"),
        (&[0, 4, 7, 11], "C major 7th"),
        (&[2, 5, 7, 11], "G dominant 7th"),
        (&[0, 2, 4, 7, 11], "C major 9th"),
        (&[0, 2, 4, 7, 10], "C dominant 9th"),
        (&[0, 4, 5, 7, 11], "C major 11th"),
        (&[0, 2, 4, 7, 9], "A minor 11th"),
        (&[0, 1, 2, 3, 4], "Db minor major 9th"),
        (&[0, 2, 4, 7, 9, 11], "E minor 11th"),
        (&[0, 1, 2, 3, 4, 5], "Db minor/maj 9th b11"),
        (&[0, 1, 3, 4, 6, 9], "Eb diminished b9"),
        (&[0, 2, 4, 6, 8, 10], "E dominant 9th b5"),
        (&[0, 1, 2, 3, 4, 8], "E dominant 7th #5"),
        (&[0, 1, 2, 3, 4, 10], "C dominant #9"),
        (&[0, 1, 2, 3, 4, 5, 6], "C chromatic"),
    ];
    for (pcs, expected) in cases {
        assert_eq!(&label_of(pcs), expected, "{:?}", pcs);
    }
}

#[test]
fn polyphony_limit_drops_extra_notes() {
    let mut engine = engine_with_default("");
    for p in 0..MAX_POLY as u8 {
        assert!(engine.note_on(40 + p, 100).is_some());
    }
    assert!(engine.note_on(100, 100).is_none());
    assert_eq!(engine.active_voices(), MAX_POLY);

    assert!(engine.note_off(40).is_some());
    assert_eq!(engine.active_voices(), MAX_POLY - 1);
}

#[test]
fn out_of_range_notes_change_nothing() {
    let mut engine = ChordEngine::new(EngineConfig {
        lower_limit: 48,
        upper_limit: 72,
        ..EngineConfig::default()
    })
    .expect("valid range");
    engine.note_on(60, 100);
    let before = engine.current();

    assert!(engine.note_on(47, 100).is_none());
    assert!(engine.note_on(73, 100).is_none());
    assert_eq!(engine.current(), before);
    assert_eq!(engine.active_voices(), 1);
}

#[test]
fn bass_follows_lowest_sounding_pitch() {
    let mut engine = engine_with_default("");
    play(&mut engine, &[64, 67, 72]);
    let report = engine.current();
    assert_eq!(report.label, "C major");
    assert_eq!(report.bass, Some(64));
}
