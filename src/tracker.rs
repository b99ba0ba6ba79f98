use crate::segment::{Row, row_to_beat};
use crate::timing::TimingData;

// Forward steps resolved linearly before falling back to binary search.
const LINEAR_SCAN_LIMIT: usize = 8;

/// Stateful sequential cursor over a timing source.
///
/// `advance` requires non-decreasing rows across calls on one instance; call
/// `reset` after any seek, loop, or timing rebuild. Violating the precondition
/// trips a debug assertion; release builds return an unspecified value without
/// corrupting the cursor. One tracker per consumer (notefield, audio, ...).
pub trait Tracker {
    /// Time of `row`, moving the cursor forward. Amortized O(1) for the small
    /// forward steps of scrolling and playback.
    fn advance(&mut self, row: Row) -> f32;

    /// Same value as `advance` without disturbing the cursor, for peeking at
    /// upcoming rows (render culling).
    fn look_ahead(&self, row: Row) -> f32;

    /// Rewinds the cursor to the start.
    fn reset(&mut self);
}

/// BPM-aware tracker: returns exactly what `TimingData::row_to_time` would,
/// but resumes the boundary scan where the previous call left off.
pub struct TimeTracker<'td> {
    timing: &'td TimingData,
    cursor: usize,
    last_row: Row,
}

impl<'td> TimeTracker<'td> {
    pub fn new(timing: &'td TimingData) -> Self {
        Self { timing, cursor: 0, last_row: Row::MIN }
    }

    fn seek(&self, mut cursor: usize, row: Row) -> usize {
        let boundaries = self.timing.boundaries();
        let mut steps = 0;
        while cursor < boundaries.len() && boundaries[cursor].row <= row {
            cursor += 1;
            steps += 1;
            if steps == LINEAR_SCAN_LIMIT {
                return cursor + boundaries[cursor..].partition_point(|b| b.row <= row);
            }
        }
        cursor
    }
}

impl Tracker for TimeTracker<'_> {
    fn advance(&mut self, row: Row) -> f32 {
        debug_assert!(
            row >= self.last_row,
            "advance() rows must be non-decreasing ({row} after {})",
            self.last_row
        );
        self.cursor = self.seek(self.cursor, row);
        self.last_row = row;
        self.timing.time_at_partition(self.cursor, row)
    }

    fn look_ahead(&self, row: Row) -> f32 {
        if row >= self.last_row {
            let idx = self.seek(self.cursor, row);
            self.timing.time_at_partition(idx, row)
        } else {
            self.timing.row_to_time(row)
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.last_row = Row::MIN;
    }
}

/// Constant-rate tracker: the returned value is just the row scaled by a
/// fixed seconds-per-row, for notefields running in row mode. Satisfies the
/// same contract so callers stay agnostic to which tracker is active.
pub struct RowTracker {
    seconds_per_row: f32,
    last_row: Row,
}

impl RowTracker {
    pub fn new(seconds_per_row: f32) -> Self {
        Self { seconds_per_row, last_row: Row::MIN }
    }

    /// Rate matching a fixed BPM, the usual way hosts configure row mode.
    pub fn from_bpm(bpm: f32) -> Self {
        let bps = bpm / 60.0;
        Self::new(if bps > 0.0 { row_to_beat(1) / bps } else { 0.0 })
    }
}

impl Tracker for RowTracker {
    fn advance(&mut self, row: Row) -> f32 {
        debug_assert!(
            row >= self.last_row,
            "advance() rows must be non-decreasing ({row} after {})",
            self.last_row
        );
        self.last_row = row;
        row as f32 * self.seconds_per_row
    }

    fn look_ahead(&self, row: Row) -> f32 {
        row as f32 * self.seconds_per_row
    }

    fn reset(&mut self) {
        self.last_row = Row::MIN;
    }
}
