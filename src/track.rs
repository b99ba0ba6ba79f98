use crate::segment::{Row, SegmentPayload};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One entry of a segment track: a payload anchored at a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<T> {
    pub row: Row,
    pub payload: T,
}

/// Before/after record for one row touched by a `modify` batch. `None` means
/// no segment existed (before) or the segment was deleted (after).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry<T> {
    pub row: Row,
    pub before: Option<T>,
    pub after: Option<T>,
}

/// Self-contained diff produced by `SegmentTrack::modify`. The external
/// history manager stores these and replays them in either direction; nothing
/// inside borrows from the track, so a `Change` stays valid across later
/// edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change<T> {
    entries: Vec<ChangeEntry<T>>,
}

impl<T: Clone> Change<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ChangeEntry<T>] {
        &self.entries
    }

    /// The batch that re-applies this change.
    pub fn redo_edits(&self) -> Vec<(Row, Option<T>)> {
        self.entries.iter().map(|e| (e.row, e.after.clone())).collect()
    }

    /// The batch that reverts this change.
    pub fn undo_edits(&self) -> Vec<(Row, Option<T>)> {
        self.entries.iter().rev().map(|e| (e.row, e.before.clone())).collect()
    }

    /// The same change with before/after swapped, so that `modify(redo_edits)`
    /// of the inverse undoes the original.
    pub fn inverted(mut self) -> Self {
        self.entries.reverse();
        for e in &mut self.entries {
            std::mem::swap(&mut e.before, &mut e.after);
        }
        self
    }
}

/// Row-ordered collection of segments of a single type. Rows are strictly
/// increasing; at most one segment per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTrack<T: SegmentPayload> {
    segments: Vec<Segment<T>>,
}

impl<T: SegmentPayload> Default for SegmentTrack<T> {
    fn default() -> Self {
        Self { segments: Vec::new() }
    }
}

impl<T: SegmentPayload> SegmentTrack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk construction for load collaborators. Later duplicates of a row win,
    /// matching `modify`'s last-write rule.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Row, T)>,
    {
        let mut track = Self::new();
        for (row, payload) in rows {
            track.put(row, Some(payload));
        }
        track
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Value effective at `row`. Persistent types report the payload of the
    /// last segment at or before `row`; isolated types only an exact-row hit.
    pub fn get(&self, row: Row) -> Option<&T> {
        let idx = self.segments.partition_point(|s| s.row <= row);
        if idx == 0 {
            return None;
        }
        let seg = &self.segments[idx - 1];
        if T::PERSISTENT || seg.row == row {
            Some(&seg.payload)
        } else {
            None
        }
    }

    /// The segment stored at exactly `row`, regardless of payload kind.
    pub fn get_at(&self, row: Row) -> Option<&Segment<T>> {
        match self.segments.binary_search_by_key(&row, |s| s.row) {
            Ok(idx) => Some(&self.segments[idx]),
            Err(_) => None,
        }
    }

    /// Segments with `row_start <= row < row_end`, in row order. An inverted
    /// range is empty, never an error.
    pub fn range(&self, row_start: Row, row_end: Row) -> &[Segment<T>] {
        let lo = self.segments.partition_point(|s| s.row < row_start);
        let hi = self.segments.partition_point(|s| s.row < row_end);
        &self.segments[lo..hi.max(lo)]
    }

    /// Applies a batch of edits: `Some(payload)` inserts or overwrites,
    /// `None` deletes if present. Duplicate rows within one batch keep the
    /// last write. Returns the diff for the whole batch; rows whose value did
    /// not actually change (including deletes of absent rows) are omitted, so
    /// a pure no-op batch yields an empty `Change`.
    pub fn modify<I>(&mut self, edits: I) -> Change<T>
    where
        I: IntoIterator<Item = (Row, Option<T>)>,
    {
        let mut entries: Vec<ChangeEntry<T>> = Vec::new();
        let mut touched: FxHashMap<Row, usize> = FxHashMap::default();

        for (row, after) in edits {
            let before = self.put(row, after.clone());
            match touched.get(&row) {
                Some(&idx) => entries[idx].after = after,
                None => {
                    touched.insert(row, entries.len());
                    entries.push(ChangeEntry { row, before, after });
                }
            }
        }

        entries.retain(|e| e.before != e.after);
        Change { entries }
    }

    /// Insert/overwrite/delete at one row; returns the prior payload.
    fn put(&mut self, row: Row, value: Option<T>) -> Option<T> {
        let idx = self.segments.partition_point(|s| s.row < row);
        let hit = idx < self.segments.len() && self.segments[idx].row == row;
        match (hit, value) {
            (true, Some(payload)) => {
                Some(std::mem::replace(&mut self.segments[idx].payload, payload))
            }
            (true, None) => Some(self.segments.remove(idx).payload),
            (false, Some(payload)) => {
                self.segments.insert(idx, Segment { row, payload });
                None
            }
            (false, None) => None,
        }
    }
}
