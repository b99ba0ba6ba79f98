use serde::{Deserialize, Serialize};

/// Number of note rows per beat, the same resolution ITG-family tools use.
pub const ROWS_PER_BEAT: i32 = 48;

/// BPM assumed when a chart carries no usable BPM change at all.
pub const DEFAULT_BPM: f32 = 120.0;

/// Integer musical position: a fixed subdivision of a beat. May be negative
/// for pre-roll content placed before the start of the song.
pub type Row = i32;

#[inline(always)]
pub fn row_to_beat(row: Row) -> f32 {
    row as f32 / ROWS_PER_BEAT as f32
}

#[inline(always)]
pub fn beat_to_row(beat: f32) -> Row {
    (beat * ROWS_PER_BEAT as f32).round() as Row
}

/// Discriminant for every segment type a tempo definition can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Bpm,
    Stop,
    Delay,
    Warp,
    TimeSignature,
    TickCount,
    Combo,
    Speed,
    Scroll,
    Fake,
    Label,
}

/// Payload stored at one row of a segment track.
///
/// `PERSISTENT` payloads hold their value from their row until superseded by
/// the next segment of the same type; non-persistent (isolated) payloads apply
/// only at their exact row.
pub trait SegmentPayload: Clone + PartialEq + std::fmt::Debug {
    const KIND: SegmentKind;
    const PERSISTENT: bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpmChange {
    pub bpm: f32,
}

/// A pause in seconds taken *after* the row's own time contribution: notes on
/// the stop's row land before the pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub seconds: f32,
}

/// A pause in seconds taken *before* the row's own time contribution: notes on
/// the delay's row land after the pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    pub seconds: f32,
}

/// A span of rows crossed in zero time. Length must be non-negative;
/// `Tempo::sanitize` repairs violations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Warp {
    pub length: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: i32,
    pub denominator: i32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self { numerator: 4, denominator: 4 }
    }
}

/// Hold-tick rate in ticks per beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCount {
    pub ticks: i32,
}

/// Combo multipliers applied to hits and misses from this row on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub hit: i32,
    pub miss: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    Beats,
    Seconds,
}

/// Notefield speed multiplier that eases from the previous ratio over `delay`
/// beats or seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub ratio: f32,
    pub delay: f32,
    pub unit: SpeedUnit,
}

/// Scroll-rate multiplier; affects displayed position only, never timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub ratio: f32,
}

/// A span of rows whose notes are not judgable. Length must be non-negative;
/// `Tempo::sanitize` repairs violations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fake {
    pub length: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
}

macro_rules! impl_payload {
    ($ty:ty, $kind:ident, $persistent:literal) => {
        impl SegmentPayload for $ty {
            const KIND: SegmentKind = SegmentKind::$kind;
            const PERSISTENT: bool = $persistent;
        }
    };
}

impl_payload!(BpmChange, Bpm, true);
impl_payload!(Stop, Stop, false);
impl_payload!(Delay, Delay, false);
impl_payload!(Warp, Warp, false);
impl_payload!(TimeSignature, TimeSignature, true);
impl_payload!(TickCount, TickCount, true);
impl_payload!(Combo, Combo, true);
impl_payload!(Speed, Speed, true);
impl_payload!(Scroll, Scroll, true);
impl_payload!(Fake, Fake, false);
impl_payload!(Label, Label, false);
