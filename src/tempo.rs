use crate::segment::{
    BpmChange, Combo, DEFAULT_BPM, Delay, Fake, Label, Row, Scroll, Speed, Stop, TickCount,
    TimeSignature, Warp,
};
use crate::track::SegmentTrack;
use log::warn;
use serde::{Deserialize, Serialize};

/// Every segment track of one tempo definition. Owned by exactly one `Tempo`;
/// a chart either shares its song's group or carries its own ("split timing").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentGroup {
    pub bpms: SegmentTrack<BpmChange>,
    pub stops: SegmentTrack<Stop>,
    pub delays: SegmentTrack<Delay>,
    pub warps: SegmentTrack<Warp>,
    pub time_signatures: SegmentTrack<TimeSignature>,
    pub tick_counts: SegmentTrack<TickCount>,
    pub combos: SegmentTrack<Combo>,
    pub speeds: SegmentTrack<Speed>,
    pub scrolls: SegmentTrack<Scroll>,
    pub fakes: SegmentTrack<Fake>,
    pub labels: SegmentTrack<Label>,
}

/// How the song-select BPM readout is rendered, mirroring `#DISPLAYBPM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DisplayBpm {
    #[default]
    Actual,
    Specified {
        min: f32,
        max: f32,
    },
    Random,
}

/// A complete tempo definition: segment group, start offset, and display-BPM
/// configuration. Created with its owner (song or chart) and destroyed with
/// it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    /// Playback time of row 0, in seconds. May be negative.
    pub offset_seconds: f32,
    pub group: SegmentGroup,
    pub display_bpm: DisplayBpm,
}

impl Tempo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset_seconds: f32) -> Self {
        Self { offset_seconds, ..Self::default() }
    }

    /// Repairs structural invariant violations after a bulk load or a
    /// structural edit. Never fails; each repair is returned as a notice and
    /// logged. Conversion queries are only trustworthy after this has run.
    ///
    /// Guarantees on return:
    /// - a `BpmChange` exists at row 0 (synthesized from the first existing
    ///   change, else `DEFAULT_BPM`),
    /// - no non-finite BPM values,
    /// - no negative Warp/Fake lengths,
    /// - no non-positive time signature terms.
    pub fn sanitize(&mut self, owner: &str) -> Vec<String> {
        let mut notices = Vec::new();
        let mut notice = |msg: String| {
            warn!("{owner}: {msg}");
            notices.push(msg);
        };

        let bad_bpms: Vec<(Row, Option<BpmChange>)> = self
            .group
            .bpms
            .segments()
            .iter()
            .filter(|s| !s.payload.bpm.is_finite())
            .map(|s| (s.row, None))
            .collect();
        for (row, _) in &bad_bpms {
            notice(format!("dropped non-finite BPM change at row {row}"));
        }
        self.group.bpms.modify(bad_bpms);

        if self.group.bpms.get_at(0).is_none() {
            let bpm = self
                .group
                .bpms
                .get(0)
                .or_else(|| self.group.bpms.segments().first().map(|s| &s.payload))
                .map_or(DEFAULT_BPM, |b| b.bpm);
            self.group.bpms.modify([(0, Some(BpmChange { bpm }))]);
            notice(format!("no BPM change at row 0; inserted {bpm} BPM"));
        }

        let bad_warps: Vec<(Row, Option<Warp>)> = self
            .group
            .warps
            .segments()
            .iter()
            .filter(|s| s.payload.length < 0)
            .map(|s| (s.row, Some(Warp { length: 0 })))
            .collect();
        for (row, _) in &bad_warps {
            notice(format!("clamped negative-length warp at row {row}"));
        }
        self.group.warps.modify(bad_warps);

        let bad_fakes: Vec<(Row, Option<Fake>)> = self
            .group
            .fakes
            .segments()
            .iter()
            .filter(|s| s.payload.length < 0)
            .map(|s| (s.row, Some(Fake { length: 0 })))
            .collect();
        for (row, _) in &bad_fakes {
            notice(format!("clamped negative-length fake at row {row}"));
        }
        self.group.fakes.modify(bad_fakes);

        let bad_sigs: Vec<(Row, Option<TimeSignature>)> = self
            .group
            .time_signatures
            .segments()
            .iter()
            .filter(|s| s.payload.numerator <= 0 || s.payload.denominator <= 0)
            .map(|s| (s.row, Some(TimeSignature::default())))
            .collect();
        for (row, _) in &bad_sigs {
            notice(format!("repaired invalid time signature at row {row} to 4/4"));
        }
        self.group.time_signatures.modify(bad_sigs);

        notices
    }

    /// Deep-replaces this tempo's offset, tracks, and display-BPM settings
    /// with `other`'s. Used for "apply detected tempo" and paste-tempo; a
    /// partially populated source just leaves the missing tracks empty.
    pub fn copy_from(&mut self, other: &Tempo) {
        self.offset_seconds = other.offset_seconds;
        self.group = other.group.clone();
        self.display_bpm = other.display_bpm;
    }
}
