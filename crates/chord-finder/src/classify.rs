//! Pitch-class set to chord classification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{ChordType, Inversion};
use crate::pitch::PitchClassSet;
use crate::tables::{inversion_for, ChordTables, IntervalKey, MAX_ARITY};

/// Reduced dyad interval of a tritone. Its implied root is not one of the two
/// sounding notes but a major third below the lower one.
const TRITONE_GAP: u8 = 5;

/// What a pitch-class set was identified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordClassification {
    pub chord_type: ChordType,
    pub root: Option<u8>,
    pub inversion: Inversion,
}

impl ChordClassification {
    pub fn empty() -> Self {
        Self {
            chord_type: ChordType::Empty,
            root: None,
            inversion: Inversion::Root,
        }
    }

    pub fn unknown() -> Self {
        Self {
            chord_type: ChordType::Unknown,
            root: None,
            inversion: Inversion::Root,
        }
    }

    fn rooted(chord_type: ChordType, root: u8, inversion: Inversion) -> Self {
        Self {
            chord_type,
            root: Some(root),
            inversion,
        }
    }
}

/// Classifies pitch-class sets against a set of interval tables.
///
/// Stateless between calls; cloning shares the tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: Arc<ChordTables>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier over the process-wide tables.
    pub fn new() -> Self {
        Self::with_tables(ChordTables::shared())
    }

    pub fn with_tables(tables: Arc<ChordTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Arc<ChordTables> {
        &self.tables
    }

    pub fn classify(&self, set: &PitchClassSet) -> ChordClassification {
        let members = set.members();
        match members.len() {
            0 => ChordClassification::empty(),
            1 => ChordClassification::rooted(ChordType::Unison, members[0], Inversion::Root),
            n if n > MAX_ARITY => {
                ChordClassification::rooted(ChordType::Chromatic, members[0], Inversion::Root)
            }
            n => match self.lookup(&members) {
                Some(found) => found,
                None if n >= 5 => self.classify_reduced(set, &members),
                None => ChordClassification::unknown(),
            },
        }
    }

    /// The pitch class the elimination fallback would drop from `set`.
    ///
    /// `None` unless the set has five or six members and no table entry.
    pub fn eliminate(&self, set: &PitchClassSet) -> Option<u8> {
        let members = set.members();
        if !(5..=MAX_ARITY).contains(&members.len()) || self.lookup(&members).is_some() {
            return None;
        }
        most_redundant_member(&members).map(|i| members[i])
    }

    fn lookup(&self, members: &[u8]) -> Option<ChordClassification> {
        let key = IntervalKey::from_members(members)?;
        let table = self.tables.for_arity(members.len())?;
        let entry = table.lookup(&key);
        let root_member = entry.root_member?;
        let root = if members.len() == 2 && key.gaps()[0] == TRITONE_GAP {
            (members[0] + 8) % 12
        } else {
            *members.get(root_member as usize)?
        };
        Some(ChordClassification::rooted(
            entry.chord_type,
            root,
            inversion_for(members.len(), root_member),
        ))
    }

    fn classify_reduced(&self, set: &PitchClassSet, members: &[u8]) -> ChordClassification {
        let Some(index) = most_redundant_member(members) else {
            return ChordClassification::unknown();
        };
        let dropped = members[index];
        let mut reduced = *set;
        reduced.remove(dropped);
        debug!(
            members = ?members,
            dropped,
            "no {}-note chord for set, eliminating most redundant member",
            members.len()
        );
        self.classify(&reduced)
    }
}

/// Index of the member whose summed circular distance to all others is
/// smallest. Ties go to the earliest member.
pub fn most_redundant_member(members: &[u8]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &a) in members.iter().enumerate() {
        let total: u32 = members
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &b)| circular_distance(a, b) as u32)
            .sum();
        match best {
            Some((_, lowest)) if total >= lowest => {}
            _ => best = Some((i, total)),
        }
    }
    best.map(|(i, _)| i)
}

/// Shortest distance between two pitch classes around the octave (0..=6).
pub fn circular_distance(a: u8, b: u8) -> u8 {
    let d = (a % 12).abs_diff(b % 12);
    if d > 6 {
        12 - d
    } else {
        d
    }
}
