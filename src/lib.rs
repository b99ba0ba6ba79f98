//! Tempo-segment model and row↔time conversion engine for rhythm-game chart
//! editors.
//!
//! A [`Tempo`] owns one [`SegmentGroup`]: a row-ordered [`SegmentTrack`] per
//! segment type (BPM changes, stops, delays, warps, time signatures, tick
//! counts, combo multipliers, speeds, scrolls, fakes, labels). Edits go
//! through [`SegmentTrack::modify`], which returns a self-contained
//! [`Change`] diff the host's history manager can replay in either direction.
//!
//! [`TimingData`] is the derived read model: rebuilt from a `Tempo` after any
//! mutation, it converts rows to seconds and back, handling warps, frozen
//! BPM regimes, and same-row stop/delay/BPM pileups without losing
//! monotonicity. Frame-loop consumers that scan forward (notefields, audio
//! sync) use a [`TimeTracker`] for amortized O(1) sequential queries.
//!
//! Everything is single-threaded and synchronous; the host calls from its
//! frame loop and rebuilds derived state after edits.

pub mod segment;
pub mod tempo;
pub mod timing;
pub mod track;
pub mod tracker;

pub use segment::{
    BpmChange, Combo, DEFAULT_BPM, Delay, Fake, Label, ROWS_PER_BEAT, Row, Scroll, SegmentKind,
    SegmentPayload, Speed, SpeedUnit, Stop, TickCount, TimeSignature, Warp, beat_to_row,
    row_to_beat,
};
pub use tempo::{DisplayBpm, SegmentGroup, Tempo};
pub use timing::TimingData;
pub use track::{Change, ChangeEntry, Segment, SegmentTrack};
pub use tracker::{RowTracker, TimeTracker, Tracker};
