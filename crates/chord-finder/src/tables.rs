//! Interval-vector lookup tables.
//!
//! A set of `n` distinct pitch classes is keyed by the gaps between its
//! ascending members, each reduced by one so that adjacent semitones map to 0.
//! The key depends on which member comes first in the scan, so one chord
//! appears under several keys (one per rotation) with a different root member.
//!
//! Tables are built once and never mutated afterwards. A second write to an
//! assigned cell means two chords were declared with the same key; the first
//! write is kept and the collision is recorded as a [`TableDefect`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use thiserror::Error;
use tracing::{error, info};

use crate::catalog::{ChordType, Inversion};
use crate::data::{self, ChordVoicing};
use crate::error::TableError;

pub const MIN_ARITY: usize = 2;
pub const MAX_ARITY: usize = 6;

/// Canonical interval pattern of an ascending pitch-class set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalKey {
    gaps: [u8; MAX_ARITY - 1],
    len: u8,
}

impl IntervalKey {
    /// Key for ascending, distinct pitch classes. `None` unless 2..=6 members.
    pub fn from_members(members: &[u8]) -> Option<Self> {
        if !(MIN_ARITY..=MAX_ARITY).contains(&members.len()) {
            return None;
        }
        let mut gaps = [0u8; MAX_ARITY - 1];
        for (i, pair) in members.windows(2).enumerate() {
            if pair[1] <= pair[0] || pair[1] >= 12 {
                return None;
            }
            gaps[i] = pair[1] - pair[0] - 1;
        }
        Some(Self {
            gaps,
            len: (members.len() - 1) as u8,
        })
    }

    pub fn from_gaps(gaps: &[u8]) -> Option<Self> {
        if gaps.is_empty() || gaps.len() > MAX_ARITY - 1 {
            return None;
        }
        let mut buf = [0u8; MAX_ARITY - 1];
        buf[..gaps.len()].copy_from_slice(gaps);
        Some(Self {
            gaps: buf,
            len: gaps.len() as u8,
        })
    }

    pub fn gaps(&self) -> &[u8] {
        &self.gaps[..self.len as usize]
    }

    pub fn arity(&self) -> usize {
        self.len as usize + 1
    }

    /// The pitch-class set this key describes when its first member is C.
    pub fn members(&self) -> Vec<u8> {
        let mut members = vec![0u8];
        for &gap in self.gaps() {
            let last = members[members.len() - 1];
            members.push(last + gap + 1);
        }
        members
    }
}

impl fmt::Display for IntervalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.gaps())
    }
}

/// A table cell: chord type plus which ascending member is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupEntry {
    pub chord_type: ChordType,
    pub root_member: Option<u8>,
}

impl LookupEntry {
    pub const UNASSIGNED: LookupEntry = LookupEntry {
        chord_type: ChordType::Unknown,
        root_member: None,
    };

    pub fn new(chord_type: ChordType, root_member: u8) -> Self {
        Self {
            chord_type,
            root_member: Some(root_member),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.root_member.is_some()
    }
}

/// Inversion implied by the root's position among `arity` ascending members.
///
/// Root on the first member is root position, root on the last member is
/// first inversion, anything in between counts as second inversion.
pub fn inversion_for(arity: usize, root_member: u8) -> Inversion {
    let root_member = root_member as usize;
    if root_member == 0 {
        Inversion::Root
    } else if root_member + 1 == arity {
        Inversion::First
    } else {
        Inversion::Second
    }
}

/// Dense lookup table for one arity: `arity - 1` axes of `13 - arity` cells.
#[derive(Debug, Clone)]
pub struct IntervalTable {
    arity: usize,
    extent: usize,
    cells: Vec<LookupEntry>,
}

impl IntervalTable {
    pub fn new(arity: usize) -> Self {
        let extent = 13 - arity;
        let size = extent.pow((arity - 1) as u32);
        Self {
            arity,
            extent,
            cells: vec![LookupEntry::UNASSIGNED; size],
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, key: &IntervalKey) -> Option<usize> {
        if key.arity() != self.arity {
            return None;
        }
        key.gaps().iter().try_fold(0usize, |acc, &gap| {
            let gap = gap as usize;
            (gap < self.extent).then_some(acc * self.extent + gap)
        })
    }

    fn key_at(&self, mut index: usize) -> IntervalKey {
        let mut gaps = [0u8; MAX_ARITY - 1];
        for slot in (0..self.arity - 1).rev() {
            gaps[slot] = (index % self.extent) as u8;
            index /= self.extent;
        }
        IntervalKey {
            gaps,
            len: (self.arity - 1) as u8,
        }
    }

    pub fn get(&self, key: &IntervalKey) -> Option<&LookupEntry> {
        self.index(key).map(|i| &self.cells[i])
    }

    /// Cell for `key`, or `UNASSIGNED` when the key does not fit this table.
    pub fn lookup(&self, key: &IntervalKey) -> LookupEntry {
        self.get(key).copied().unwrap_or(LookupEntry::UNASSIGNED)
    }

    pub fn assigned(&self) -> impl Iterator<Item = (IntervalKey, LookupEntry)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_assigned())
            .map(|(i, entry)| (self.key_at(i), *entry))
    }

    pub fn assigned_count(&self) -> usize {
        self.cells.iter().filter(|e| e.is_assigned()).count()
    }
}

/// A data-authoring problem found while building the tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableDefect {
    #[error("redefining chord: {incoming} at {arity}-note key {key} already holds {existing} (voicing {tones:?})")]
    Collision {
        arity: usize,
        key: IntervalKey,
        existing: ChordType,
        incoming: ChordType,
        tones: Vec<u8>,
    },

    #[error("{arity}-note table row {path:?} has {found} cells, expected {expected}")]
    Shape {
        arity: usize,
        path: Vec<usize>,
        expected: usize,
        found: usize,
    },

    #[error("{chord_type} voicing {tones:?} does not fit the {arity}-note table")]
    OutOfRange {
        arity: usize,
        chord_type: ChordType,
        tones: Vec<u8>,
    },

    #[error("{chord_type} at {arity}-note key {key} names root member {root_member}")]
    RootOutOfRange {
        arity: usize,
        key: IntervalKey,
        chord_type: ChordType,
        root_member: u8,
    },
}

/// Assigned-cell counts for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub arity: usize,
    pub cells: usize,
    pub assigned: usize,
}

/// All five lookup tables, built together.
#[derive(Debug, Clone)]
pub struct ChordTables {
    dyad: IntervalTable,
    triad: IntervalTable,
    quartad: IntervalTable,
    quintad: IntervalTable,
    sextad: IntervalTable,
    defects: Vec<TableDefect>,
}

static SHARED: OnceLock<Arc<ChordTables>> = OnceLock::new();

impl ChordTables {
    /// Build fresh tables. Defects are logged and kept in [`defects`](Self::defects).
    pub fn build() -> Self {
        let mut builder = Builder::default();

        let dyad = builder.hand_dyads();
        let triad = builder.hand_triads();
        let quartad = builder.hand_quartads();
        let quintad = builder.rotations(5, data::voicings(5));
        let sextad = builder.rotations(6, data::voicings(6));

        let tables = Self {
            dyad,
            triad,
            quartad,
            quintad,
            sextad,
            defects: builder.defects,
        };

        info!(
            assigned = tables.stats().iter().map(|s| s.assigned).sum::<usize>(),
            defects = tables.defects.len(),
            "chord tables built"
        );
        tables
    }

    /// Build fresh tables, failing if any authoring defect was found.
    pub fn build_checked() -> Result<Self, TableError> {
        let tables = Self::build();
        if tables.defects.is_empty() {
            Ok(tables)
        } else {
            Err(TableError::from_defects(tables.defects))
        }
    }

    /// Process-wide tables, built on first use.
    pub fn shared() -> Arc<Self> {
        SHARED.get_or_init(|| Arc::new(Self::build())).clone()
    }

    pub fn for_arity(&self, arity: usize) -> Option<&IntervalTable> {
        match arity {
            2 => Some(&self.dyad),
            3 => Some(&self.triad),
            4 => Some(&self.quartad),
            5 => Some(&self.quintad),
            6 => Some(&self.sextad),
            _ => None,
        }
    }

    pub fn defects(&self) -> &[TableDefect] {
        &self.defects
    }

    pub fn stats(&self) -> Vec<TableStats> {
        (MIN_ARITY..=MAX_ARITY)
            .filter_map(|arity| self.for_arity(arity))
            .map(|table| TableStats {
                arity: table.arity(),
                cells: table.len(),
                assigned: table.assigned_count(),
            })
            .collect()
    }
}

#[derive(Default)]
struct Builder {
    defects: Vec<TableDefect>,
}

impl Builder {
    fn defect(&mut self, defect: TableDefect) {
        error!("chord table: {}", defect);
        self.defects.push(defect);
    }

    fn declare(&mut self, table: &mut IntervalTable, key: IntervalKey, entry: LookupEntry, tones: &[u8]) {
        let Some(index) = table.index(&key) else {
            self.defect(TableDefect::OutOfRange {
                arity: table.arity,
                chord_type: entry.chord_type,
                tones: tones.to_vec(),
            });
            return;
        };

        if let Some(root_member) = entry.root_member {
            if root_member as usize >= table.arity {
                self.defect(TableDefect::RootOutOfRange {
                    arity: table.arity,
                    key,
                    chord_type: entry.chord_type,
                    root_member,
                });
                return;
            }
        }

        let cell = &mut table.cells[index];
        if cell.is_assigned() {
            let existing = cell.chord_type;
            self.defect(TableDefect::Collision {
                arity: table.arity,
                key,
                existing,
                incoming: entry.chord_type,
                tones: tones.to_vec(),
            });
            return;
        }
        *cell = entry;
    }

    fn check_len(&mut self, arity: usize, path: Vec<usize>, expected: usize, found: usize) {
        if expected != found {
            self.defect(TableDefect::Shape {
                arity,
                path,
                expected,
                found,
            });
        }
    }

    fn hand_cell(&mut self, table: &mut IntervalTable, gaps: &[u8], (chord_type, root): (ChordType, u8)) {
        let Some(key) = IntervalKey::from_gaps(gaps) else {
            return;
        };
        let members = key.members();
        self.declare(table, key, LookupEntry::new(chord_type, root), &members);
    }

    fn hand_dyads(&mut self) -> IntervalTable {
        let mut table = IntervalTable::new(2);
        self.check_len(2, vec![], table.extent, data::DYADS.len());
        for (i, &cell) in data::DYADS.iter().enumerate() {
            self.hand_cell(&mut table, &[i as u8], cell);
        }
        table
    }

    fn hand_triads(&mut self) -> IntervalTable {
        let mut table = IntervalTable::new(3);
        self.check_len(3, vec![], table.extent, data::TRIADS.len());
        for (i, row) in data::TRIADS.iter().enumerate() {
            self.check_len(3, vec![i], table.extent - i, row.len());
            for (j, &cell) in row.iter().enumerate() {
                self.hand_cell(&mut table, &[i as u8, j as u8], cell);
            }
        }
        table
    }

    fn hand_quartads(&mut self) -> IntervalTable {
        let mut table = IntervalTable::new(4);
        self.check_len(4, vec![], table.extent, data::QUARTADS.len());
        for (i, plane) in data::QUARTADS.iter().enumerate() {
            self.check_len(4, vec![i], table.extent - i, plane.len());
            for (j, row) in plane.iter().enumerate() {
                self.check_len(4, vec![i, j], table.extent - i - j, row.len());
                for (k, &cell) in row.iter().enumerate() {
                    self.hand_cell(&mut table, &[i as u8, j as u8, k as u8], cell);
                }
            }
        }
        table
    }

    /// Write every rotation of every voicing, rooted at the rotation's root member.
    fn rotations(&mut self, arity: usize, voicings: &[ChordVoicing]) -> IntervalTable {
        let mut table = IntervalTable::new(arity);
        for voicing in voicings {
            if voicing.arity() != arity {
                self.defect(TableDefect::OutOfRange {
                    arity,
                    chord_type: voicing.chord_type,
                    tones: voicing.tones.to_vec(),
                });
                continue;
            }
            for start in 0..arity {
                let members = voicing.rotation(start);
                match IntervalKey::from_members(&members) {
                    Some(key) => self.declare(
                        &mut table,
                        key,
                        LookupEntry::new(voicing.chord_type, voicing.root_member(start)),
                        voicing.tones,
                    ),
                    None => self.defect(TableDefect::OutOfRange {
                        arity,
                        chord_type: voicing.chord_type,
                        tones: voicing.tones.to_vec(),
                    }),
                }
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interval_key_from_members() {
        let key = IntervalKey::from_members(&[0, 4, 7]).unwrap();
        assert_eq!(key.gaps(), &[3, 2]);
        assert_eq!(key.arity(), 3);
        assert_eq!(key.members(), vec![0, 4, 7]);
    }

    #[test]
    fn interval_key_rejects_bad_input() {
        assert!(IntervalKey::from_members(&[0]).is_none());
        assert!(IntervalKey::from_members(&[0, 1, 2, 3, 4, 5, 6]).is_none());
        assert!(IntervalKey::from_members(&[4, 0]).is_none());
        assert!(IntervalKey::from_members(&[3, 3]).is_none());
    }

    #[test]
    fn interval_key_ignores_transposition_not_rotation() {
        let c = IntervalKey::from_members(&[0, 4, 7]).unwrap();
        let d = IntervalKey::from_members(&[2, 6, 9]).unwrap();
        let first_inversion = IntervalKey::from_members(&[0, 3, 8]).unwrap();
        assert_eq!(c, d);
        assert_ne!(c, first_inversion);
    }

    #[test]
    fn table_extents_match_arity() {
        let tables = ChordTables::build();
        let stats = tables.stats();
        let cells: Vec<_> = stats.iter().map(|s| s.cells).collect();
        assert_eq!(cells, vec![11, 100, 729, 4096, 16807]);
    }

    #[test]
    fn tables_build_without_defects() {
        let tables = ChordTables::build_checked().unwrap();
        assert!(tables.defects().is_empty());
    }

    #[test]
    fn hand_tables_cover_every_reachable_key() {
        let tables = ChordTables::build();
        let stats = tables.stats();
        // 11 dyads, C(11,2) = 55 triad keys, C(11,3) = 165 quartad keys
        assert_eq!(stats[0].assigned, 11);
        assert_eq!(stats[1].assigned, 55);
        assert_eq!(stats[2].assigned, 165);
    }

    #[test]
    fn rotation_tables_hold_every_rotation() {
        let tables = ChordTables::build();
        let stats = tables.stats();
        assert_eq!(stats[3].assigned, data::voicings(5).len() * 5);
        assert_eq!(stats[4].assigned, data::voicings(6).len() * 6);
    }

    #[test]
    fn duplicate_voicing_is_reported_and_first_write_kept() {
        let mut builder = Builder::default();
        let voicings = [
            ChordVoicing::new(ChordType::Major9, &[0, 2, 4, 7, 11]),
            ChordVoicing::new(ChordType::Dominant9, &[0, 2, 4, 7, 11]),
        ];
        let table = builder.rotations(5, &voicings);

        assert_eq!(builder.defects.len(), 5);
        assert!(matches!(
            builder.defects[0],
            TableDefect::Collision {
                existing: ChordType::Major9,
                incoming: ChordType::Dominant9,
                ..
            }
        ));
        let key = IntervalKey::from_members(&[0, 2, 4, 7, 11]).unwrap();
        assert_eq!(table.lookup(&key), LookupEntry::new(ChordType::Major9, 0));
    }

    #[test]
    fn wrong_arity_voicing_is_reported() {
        let mut builder = Builder::default();
        let voicings = [ChordVoicing::new(ChordType::Major, &[0, 4, 7])];
        let table = builder.rotations(5, &voicings);
        assert_eq!(table.assigned_count(), 0);
        assert!(matches!(builder.defects[0], TableDefect::OutOfRange { arity: 5, .. }));
    }

    #[test]
    fn collision_message_names_both_chords() {
        let defect = TableDefect::Collision {
            arity: 5,
            key: IntervalKey::from_gaps(&[1, 1, 2, 3]).unwrap(),
            existing: ChordType::Major9,
            incoming: ChordType::Dominant9,
            tones: vec![0, 2, 4, 7, 11],
        };
        let message = defect.to_string();
        assert!(message.contains("major 9th"));
        assert!(message.contains("dominant 9th"));
        assert!(message.contains("[1, 1, 2, 3]"));
    }

    #[test]
    fn lookup_outside_table_is_unassigned() {
        let table = IntervalTable::new(3);
        let too_wide = IntervalKey::from_gaps(&[10, 0]).unwrap();
        assert_eq!(table.get(&too_wide), None);
        assert_eq!(table.lookup(&too_wide), LookupEntry::UNASSIGNED);
        let wrong_arity = IntervalKey::from_gaps(&[1]).unwrap();
        assert_eq!(table.get(&wrong_arity), None);
    }

    #[test]
    fn assigned_keys_decode_back_to_their_cells() {
        let tables = ChordTables::build();
        let triads = tables.for_arity(3).unwrap();
        for (key, entry) in triads.assigned() {
            assert_eq!(triads.lookup(&key), entry);
        }
    }

    #[test]
    fn inversion_mapping_per_arity() {
        assert_eq!(inversion_for(2, 1), Inversion::First);
        assert_eq!(inversion_for(3, 1), Inversion::Second);
        assert_eq!(inversion_for(3, 2), Inversion::First);
        assert_eq!(inversion_for(4, 2), Inversion::Second);
        assert_eq!(inversion_for(5, 4), Inversion::First);
        assert_eq!(inversion_for(6, 3), Inversion::Second);
        assert_eq!(inversion_for(6, 0), Inversion::Root);
    }

    #[test]
    fn shared_tables_are_built_once() {
        let a = ChordTables::shared();
        let b = ChordTables::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
