use crate::segment::{DEFAULT_BPM, ROWS_PER_BEAT, Row, SpeedUnit, beat_to_row, row_to_beat};
use crate::tempo::{DisplayBpm, Tempo};
use log::info;

// Epsilon in rows used when flooring an inverse lookup, so a time produced by
// row_to_time lands back on its own row despite f32 rounding.
const ROW_SNAP: f32 = 1e-3;

/// One row at which the time integration changes behavior: a BPM change, a
/// stop, a delay, or a warp edge (possibly several at once).
///
/// `arrive` is the time the row is reached, `time_in` adds any delay (the
/// time notes on this row land), `time_out` adds any stop (the time following
/// rows resume from). `bps` is the beats-per-second of the interval after the
/// row, 0.0 while frozen (inside a warp, or under a non-positive BPM).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Boundary {
    pub(crate) row: Row,
    arrive: f32,
    time_in: f32,
    time_out: f32,
    bps: f32,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    WarpEnd,
    Delay(f32),
    Bpm(f32),
    Stop(f32),
    WarpStart,
}

// Same-row precedence: close any warp, apply the delay to the arrival time,
// switch the BPM regime for the following interval, count the stop on the way
// out, then open a new warp. Keeps a same-row stop and delay in one regime.
fn rank(ev: &Event) -> u8 {
    match ev {
        Event::WarpEnd => 0,
        Event::Delay(_) => 1,
        Event::Bpm(_) => 2,
        Event::Stop(_) => 3,
        Event::WarpStart => 4,
    }
}

#[derive(Debug, Clone, Copy)]
struct SpeedSeg {
    row: Row,
    ratio: f32,
    delay: f32,
    unit: SpeedUnit,
}

#[derive(Debug, Clone, Copy)]
struct SpeedRuntime {
    start_time: f32,
    end_time: f32,
    prev_ratio: f32,
}

#[derive(Debug, Clone, Copy)]
struct ScrollPrefix {
    row: Row,
    cum_displayed: f32,
    ratio: f32,
}

/// Derived, rebuildable row↔time conversion table for one `Tempo`.
///
/// Stale after any mutation of the owning segment group; callers rebuild with
/// `from_tempo` and re-acquire any trackers. All queries are O(log n) and
/// never fail; positions outside the table extrapolate with the nearest BPM
/// regime.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    boundaries: Vec<Boundary>,
    /// Regime used before the first boundary (the first BPM value).
    bps_before: f32,
    offset: f32,
    bpms: Vec<(Row, f32)>,
    min_bpm: f32,
    max_bpm: f32,
    /// Merged warp spans as half-open [start, end) row ranges.
    warps: Vec<(Row, Row)>,
    fakes: Vec<(Row, Row)>,
    scroll_prefix: Vec<ScrollPrefix>,
    speeds: Vec<SpeedSeg>,
    speed_runtime: Vec<SpeedRuntime>,
}

fn bps_of(bpm: f32) -> f32 {
    if bpm.is_finite() && bpm > 0.0 { bpm / 60.0 } else { 0.0 }
}

fn merge_spans<I>(spans: I) -> Vec<(Row, Row)>
where
    I: IntoIterator<Item = (Row, Row)>,
{
    let mut merged: Vec<(Row, Row)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                if end > *last_end {
                    *last_end = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn span_contains(spans: &[(Row, Row)], row: Row) -> bool {
    let idx = spans.partition_point(|&(start, _)| start <= row);
    idx > 0 && row < spans[idx - 1].1
}

/// Shared lookup for a row's time given its partition index in `boundaries`.
fn time_at(boundaries: &[Boundary], bps_before: f32, base: f32, idx: usize, row: Row) -> f32 {
    let Some(first) = boundaries.first() else {
        return if bps_before > 0.0 { base + row_to_beat(row) / bps_before } else { base };
    };
    if idx == 0 {
        return if bps_before > 0.0 {
            first.arrive - row_to_beat(first.row - row) / bps_before
        } else {
            first.arrive
        };
    }
    let b = &boundaries[idx - 1];
    if b.row == row {
        b.time_in
    } else if b.bps > 0.0 {
        b.time_out + row_to_beat(row - b.row) / b.bps
    } else {
        b.time_out
    }
}

impl TimingData {
    /// Builds the merged boundary list from a tempo's segment group. The
    /// tempo should have been `sanitize`d first; an unsanitized group still
    /// produces a usable table by falling back to `DEFAULT_BPM`.
    pub fn from_tempo(tempo: &Tempo) -> Self {
        let group = &tempo.group;

        let bpms: Vec<(Row, f32)> = group
            .bpms
            .segments()
            .iter()
            .filter(|s| s.payload.bpm.is_finite())
            .map(|s| (s.row, s.payload.bpm))
            .collect();

        let warps = merge_spans(
            group
                .warps
                .segments()
                .iter()
                .filter(|s| s.payload.length > 0)
                .map(|s| (s.row, s.row + s.payload.length)),
        );
        let fakes = merge_spans(
            group
                .fakes
                .segments()
                .iter()
                .filter(|s| s.payload.length > 0)
                .map(|s| (s.row, s.row + s.payload.length)),
        );

        let mut events: Vec<(Row, Event)> = Vec::new();
        events.extend(bpms.iter().map(|&(row, bpm)| (row, Event::Bpm(bpm))));
        events.extend(
            group
                .stops
                .segments()
                .iter()
                .map(|s| (s.row, Event::Stop(s.payload.seconds))),
        );
        events.extend(
            group
                .delays
                .segments()
                .iter()
                .map(|s| (s.row, Event::Delay(s.payload.seconds))),
        );
        for &(start, end) in &warps {
            events.push((start, Event::WarpStart));
            events.push((end, Event::WarpEnd));
        }
        events.sort_unstable_by_key(|(row, ev)| (*row, rank(ev)));

        let bps_before = bps_of(bpms.first().map_or(DEFAULT_BPM, |&(_, b)| b));

        let mut boundaries: Vec<Boundary> = Vec::with_capacity(events.len());
        let mut t = 0.0_f32;
        let mut bps = bps_before;
        let mut warping = false;
        let mut prev_row = events.first().map_or(0, |&(row, _)| row);

        let mut i = 0;
        while i < events.len() {
            let row = events[i].0;
            if !warping && bps > 0.0 {
                t += row_to_beat(row - prev_row) / bps;
            }
            let arrive = t;
            let mut delay = 0.0_f32;
            let mut stop = 0.0_f32;
            while i < events.len() && events[i].0 == row {
                match events[i].1 {
                    Event::WarpEnd => warping = false,
                    // Negative pause durations would run time backwards; the
                    // timeline treats them as zero. The raw segments keep
                    // their stored values.
                    Event::Delay(d) => delay += d.max(0.0),
                    Event::Bpm(b) => bps = bps_of(b),
                    Event::Stop(s) => stop += s.max(0.0),
                    Event::WarpStart => warping = true,
                }
                i += 1;
            }
            let time_in = arrive + delay;
            let time_out = time_in + stop;
            t = time_out;
            boundaries.push(Boundary {
                row,
                arrive,
                time_in,
                time_out,
                bps: if warping { 0.0 } else { bps },
            });
            prev_row = row;
        }

        // Anchor row 0 at the song offset, then shift every boundary.
        let raw_idx = boundaries.partition_point(|b| b.row <= 0);
        let raw0 = time_at(&boundaries, bps_before, 0.0, raw_idx, 0);
        let shift = tempo.offset_seconds - raw0;
        for b in &mut boundaries {
            b.arrive += shift;
            b.time_in += shift;
            b.time_out += shift;
        }

        let mut min_bpm = f32::MAX;
        let mut max_bpm = 0.0_f32;
        for &(_, bpm) in &bpms {
            if bpm > 0.0 {
                min_bpm = min_bpm.min(bpm);
                max_bpm = max_bpm.max(bpm);
            }
        }
        if max_bpm == 0.0 {
            min_bpm = DEFAULT_BPM;
            max_bpm = DEFAULT_BPM;
        }

        let mut scroll_prefix = Vec::with_capacity(group.scrolls.len());
        let mut cum_displayed = 0.0_f32;
        let mut last_real_row = 0_i32;
        let mut last_ratio = 1.0_f32;
        for seg in group.scrolls.segments() {
            cum_displayed += (seg.row - last_real_row) as f32 * last_ratio;
            scroll_prefix.push(ScrollPrefix {
                row: seg.row,
                cum_displayed,
                ratio: seg.payload.ratio,
            });
            last_real_row = seg.row;
            last_ratio = seg.payload.ratio;
        }

        let speeds: Vec<SpeedSeg> = group
            .speeds
            .segments()
            .iter()
            .map(|s| SpeedSeg {
                row: s.row,
                ratio: s.payload.ratio,
                delay: s.payload.delay,
                unit: s.payload.unit,
            })
            .collect();

        let mut data = Self {
            boundaries,
            bps_before,
            offset: tempo.offset_seconds,
            bpms,
            min_bpm,
            max_bpm,
            warps,
            fakes,
            scroll_prefix,
            speeds,
            speed_runtime: Vec::new(),
        };

        if !data.speeds.is_empty() {
            let mut runtime = Vec::with_capacity(data.speeds.len());
            let mut prev_ratio = 1.0_f32;
            for seg in &data.speeds {
                let start_time = data.row_to_time(seg.row);
                let end_time = if seg.delay <= 0.0 {
                    start_time
                } else if seg.unit == SpeedUnit::Seconds {
                    start_time + seg.delay
                } else {
                    data.row_to_time(seg.row + beat_to_row(seg.delay))
                };
                runtime.push(SpeedRuntime { start_time, end_time, prev_ratio });
                prev_ratio = seg.ratio;
            }
            data.speed_runtime = runtime;
        }

        info!(
            "timing data rebuilt: {} boundaries, {} warp spans",
            data.boundaries.len(),
            data.warps.len()
        );
        data
    }

    pub fn offset_seconds(&self) -> f32 {
        self.offset
    }

    pub(crate) fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub(crate) fn time_at_partition(&self, idx: usize, row: Row) -> f32 {
        time_at(&self.boundaries, self.bps_before, self.offset, idx, row)
    }

    /// Elapsed playback time of `row`, in seconds. Non-decreasing over rows;
    /// strictly increasing outside warp spans and frozen regimes. Rows inside
    /// a warp all map to the warp's single time.
    pub fn row_to_time(&self, row: Row) -> f32 {
        let idx = self.boundaries.partition_point(|b| b.row <= row);
        self.time_at_partition(idx, row)
    }

    /// Inverse of `row_to_time`. Where the mapping is flat the *last* row with
    /// the queried time is returned (a warp skips to its end); during a stop
    /// or delay the paused row is returned. Extrapolates outside the table.
    pub fn time_to_row(&self, time: f32) -> Row {
        if self.boundaries.is_empty() {
            let rows = (time - self.offset) * self.bps_before * ROWS_PER_BEAT as f32;
            return (rows + ROW_SNAP).floor() as Row;
        }
        let idx = self.boundaries.partition_point(|b| b.time_out <= time);
        if idx == 0 {
            let first = &self.boundaries[0];
            if time >= first.arrive || self.bps_before <= 0.0 {
                return first.row;
            }
            let rows_back = (first.arrive - time) * self.bps_before * ROWS_PER_BEAT as f32;
            return (first.row as f32 - rows_back + ROW_SNAP).floor() as Row;
        }
        if let Some(next) = self.boundaries.get(idx) {
            if time >= next.arrive {
                // Inside the next boundary's delay or stop.
                return next.row;
            }
        }
        let b = &self.boundaries[idx - 1];
        if b.bps <= 0.0 {
            return b.row;
        }
        let mut fr = b.row as f32 + (time - b.time_out) * b.bps * ROWS_PER_BEAT as f32;
        if let Some(next) = self.boundaries.get(idx) {
            fr = fr.min(next.row as f32);
        }
        (fr + ROW_SNAP).floor() as Row
    }

    /// BPM in effect at `row` (the stored value, even if non-positive).
    pub fn bpm_at_row(&self, row: Row) -> f32 {
        if self.bpms.is_empty() {
            return DEFAULT_BPM;
        }
        let idx = self.bpms.partition_point(|&(r, _)| r <= row);
        self.bpms[idx.saturating_sub(1).min(self.bpms.len() - 1)].1
    }

    pub fn bpm_range(&self) -> (f32, f32) {
        (self.min_bpm, self.max_bpm)
    }

    /// BPM range the song wheel should show for a given display mode;
    /// `None` means the readout is randomized by the UI.
    pub fn display_bpm_range(&self, mode: DisplayBpm) -> Option<(f32, f32)> {
        match mode {
            DisplayBpm::Actual => Some((self.min_bpm, self.max_bpm)),
            DisplayBpm::Specified { min, max } => Some((min, max)),
            DisplayBpm::Random => None,
        }
    }

    pub fn capped_max_bpm(&self, cap: Option<f32>) -> f32 {
        let mut max_bpm = self.max_bpm.max(0.0);
        if let Some(cap_value) = cap {
            if cap_value > 0.0 {
                max_bpm = max_bpm.min(cap_value);
            }
        }
        if max_bpm > 0.0 { max_bpm } else { DEFAULT_BPM }
    }

    #[inline(always)]
    pub fn is_warp_at_row(&self, row: Row) -> bool {
        span_contains(&self.warps, row)
    }

    #[inline(always)]
    pub fn is_fake_at_row(&self, row: Row) -> bool {
        span_contains(&self.fakes, row)
    }

    #[inline(always)]
    pub fn is_judgable_at_row(&self, row: Row) -> bool {
        !self.is_warp_at_row(row) && !self.is_fake_at_row(row)
    }

    /// Scroll-adjusted position of `row`, in displayed rows. Identity when no
    /// scroll segments exist or before the first one.
    pub fn displayed_position(&self, row: Row) -> f32 {
        if self.scroll_prefix.is_empty() || row < self.scroll_prefix[0].row {
            return row as f32;
        }
        let idx = self.scroll_prefix.partition_point(|p| p.row <= row);
        let p = self.scroll_prefix[idx - 1];
        p.cum_displayed + (row - p.row) as f32 * p.ratio
    }

    /// Notefield speed multiplier at a position, interpolating from the
    /// previous ratio while inside a segment's easing window.
    pub fn speed_multiplier(&self, row: Row, time: f32) -> f32 {
        if self.speeds.is_empty() {
            return 1.0;
        }
        let idx = self.speeds.partition_point(|s| s.row <= row);
        if idx == 0 {
            return 1.0;
        }
        let seg = self.speeds[idx - 1];
        let rt = self.speed_runtime[idx - 1];
        if time >= rt.end_time || seg.delay <= 0.0 {
            return seg.ratio;
        }
        if time < rt.start_time {
            return rt.prev_ratio;
        }
        let progress = (time - rt.start_time) / (rt.end_time - rt.start_time);
        rt.prev_ratio + (seg.ratio - rt.prev_ratio) * progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{BpmChange, Delay, Fake, Scroll, Speed, Stop, Warp};

    const ONE_ROW_AT_120: f32 = 60.0 / (120.0 * ROWS_PER_BEAT as f32);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn tempo_120() -> Tempo {
        let mut tempo = Tempo::new();
        tempo.group.bpms.modify([(0, Some(BpmChange { bpm: 120.0 }))]);
        tempo
    }

    #[test]
    fn constant_bpm_is_linear() {
        let timing = TimingData::from_tempo(&tempo_120());
        assert_eq!(timing.row_to_time(0), 0.0);
        assert!(close(timing.row_to_time(48), 0.5));
        assert!(close(timing.row_to_time(96), 1.0));
        assert!(close(timing.row_to_time(-48), -0.5));
    }

    #[test]
    fn offset_shifts_everything() {
        let mut tempo = tempo_120();
        tempo.offset_seconds = -1.25;
        let timing = TimingData::from_tempo(&tempo);
        assert!(close(timing.row_to_time(0), -1.25));
        assert!(close(timing.row_to_time(48), -0.75));
        assert_eq!(timing.time_to_row(-0.75), 48);
    }

    #[test]
    fn stop_pauses_after_its_row() {
        let mut tempo = tempo_120();
        tempo.group.stops.modify([(48, Some(Stop { seconds: 2.0 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert!(close(timing.row_to_time(48), 0.5));
        assert!(close(timing.row_to_time(49), 2.5 + ONE_ROW_AT_120));
        // during the stop, playback sits on the stopped row
        assert_eq!(timing.time_to_row(1.3), 48);
    }

    #[test]
    fn delay_pauses_before_its_row() {
        let mut tempo = tempo_120();
        tempo.group.delays.modify([(48, Some(Delay { seconds: 1.0 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert!(close(timing.row_to_time(47), 0.5 - ONE_ROW_AT_120));
        assert!(close(timing.row_to_time(48), 1.5));
        assert!(close(timing.row_to_time(49), 1.5 + ONE_ROW_AT_120));
        assert_eq!(timing.time_to_row(0.75), 48);
    }

    #[test]
    fn same_row_delay_stop_and_bpm_change() {
        let mut tempo = tempo_120();
        tempo.group.delays.modify([(48, Some(Delay { seconds: 1.0 }))]);
        tempo.group.stops.modify([(48, Some(Stop { seconds: 2.0 }))]);
        tempo.group.bpms.modify([(48, Some(BpmChange { bpm: 60.0 }))]);
        let timing = TimingData::from_tempo(&tempo);
        // arrive 0.5 under the old regime, +1.0 delay lands the row at 1.5
        assert!(close(timing.row_to_time(48), 1.5));
        // +2.0 stop, then the new regime (60 BPM -> one beat per second)
        assert!(close(timing.row_to_time(96), 3.5 + 1.0));
    }

    #[test]
    fn warp_spans_cross_in_zero_time() {
        let mut tempo = tempo_120();
        tempo.group.warps.modify([(48, Some(Warp { length: 96 }))]);
        let timing = TimingData::from_tempo(&tempo);
        let warp_time = timing.row_to_time(48);
        assert!(close(warp_time, 0.5));
        assert!(close(timing.row_to_time(100), warp_time));
        assert!(close(timing.row_to_time(144), warp_time));
        assert!(timing.row_to_time(145) > warp_time);

        assert!(timing.is_warp_at_row(48));
        assert!(timing.is_warp_at_row(143));
        assert!(!timing.is_warp_at_row(144));
        assert!(!timing.is_judgable_at_row(100));
    }

    #[test]
    fn inverse_skips_to_warp_end() {
        let mut tempo = tempo_120();
        tempo.group.warps.modify([(48, Some(Warp { length: 96 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert_eq!(timing.time_to_row(timing.row_to_time(48)), 144);
        assert_eq!(timing.time_to_row(timing.row_to_time(100)), 144);
    }

    #[test]
    fn overlapping_warps_merge() {
        let mut tempo = tempo_120();
        tempo
            .group
            .warps
            .modify([(48, Some(Warp { length: 96 })), (96, Some(Warp { length: 96 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert!(close(timing.row_to_time(192), timing.row_to_time(48)));
        assert_eq!(timing.time_to_row(timing.row_to_time(48)), 192);
    }

    #[test]
    fn row_to_time_is_weakly_monotonic() {
        let mut tempo = tempo_120();
        tempo.group.bpms.modify([
            (96, Some(BpmChange { bpm: 200.0 })),
            (240, Some(BpmChange { bpm: 0.0 })),
            (288, Some(BpmChange { bpm: 150.0 })),
        ]);
        tempo.group.stops.modify([(96, Some(Stop { seconds: 0.5 }))]);
        tempo.group.delays.modify([(144, Some(Delay { seconds: 0.25 }))]);
        tempo.group.warps.modify([(180, Some(Warp { length: 24 }))]);
        let timing = TimingData::from_tempo(&tempo);

        let mut last = f32::MIN;
        for row in -100..400 {
            let t = timing.row_to_time(row);
            assert!(t >= last, "row {row}: {t} < {last}");
            last = t;
        }
    }

    #[test]
    fn inverse_round_trips_outside_flat_regions() {
        let mut tempo = tempo_120();
        tempo.group.bpms.modify([(96, Some(BpmChange { bpm: 150.0 }))]);
        tempo.group.stops.modify([(48, Some(Stop { seconds: 1.0 }))]);
        tempo.group.warps.modify([(192, Some(Warp { length: 48 }))]);
        let timing = TimingData::from_tempo(&tempo);

        for row in [-24, 0, 13, 48, 95, 96, 150, 191, 300] {
            let back = timing.time_to_row(timing.row_to_time(row));
            assert_eq!(back, row, "row {row} came back as {back}");
        }
        for row in 192..240 {
            assert_eq!(timing.time_to_row(timing.row_to_time(row)), 240);
        }
    }

    #[test]
    fn zero_bpm_freezes_time() {
        let mut tempo = tempo_120();
        tempo.group.bpms.modify([
            (48, Some(BpmChange { bpm: 0.0 })),
            (96, Some(BpmChange { bpm: 120.0 })),
        ]);
        let timing = TimingData::from_tempo(&tempo);
        assert!(close(timing.row_to_time(48), 0.5));
        assert!(close(timing.row_to_time(96), 0.5));
        assert!(close(timing.row_to_time(144), 1.0));
    }

    #[test]
    fn unsanitized_empty_group_still_converts() {
        let timing = TimingData::from_tempo(&Tempo::new());
        assert!(close(timing.row_to_time(48), 0.5));
        assert_eq!(timing.time_to_row(0.5), 48);
        assert_eq!(timing.bpm_at_row(0), DEFAULT_BPM);
    }

    #[test]
    fn bpm_queries() {
        let mut tempo = tempo_120();
        tempo.group.bpms.modify([(96, Some(BpmChange { bpm: 210.0 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert_eq!(timing.bpm_at_row(0), 120.0);
        assert_eq!(timing.bpm_at_row(95), 120.0);
        assert_eq!(timing.bpm_at_row(96), 210.0);
        assert_eq!(timing.bpm_range(), (120.0, 210.0));
        assert_eq!(timing.capped_max_bpm(None), 210.0);
        assert_eq!(timing.capped_max_bpm(Some(180.0)), 180.0);
        assert_eq!(
            timing.display_bpm_range(DisplayBpm::Specified { min: 70.0, max: 140.0 }),
            Some((70.0, 140.0))
        );
        assert_eq!(timing.display_bpm_range(DisplayBpm::Random), None);
    }

    #[test]
    fn fake_coverage() {
        let mut tempo = tempo_120();
        tempo.group.fakes.modify([(48, Some(Fake { length: 48 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert!(!timing.is_fake_at_row(47));
        assert!(timing.is_fake_at_row(48));
        assert!(timing.is_fake_at_row(95));
        assert!(!timing.is_fake_at_row(96));
        assert!(!timing.is_judgable_at_row(48));
        // fakes never affect timing
        assert!(close(timing.row_to_time(96), 1.0));
    }

    #[test]
    fn scroll_prefix_displayed_position() {
        let mut tempo = tempo_120();
        tempo
            .group
            .scrolls
            .modify([(0, Some(Scroll { ratio: 2.0 })), (96, Some(Scroll { ratio: 0.5 }))]);
        let timing = TimingData::from_tempo(&tempo);
        assert_eq!(timing.displayed_position(0), 0.0);
        assert_eq!(timing.displayed_position(48), 96.0);
        assert_eq!(timing.displayed_position(96), 192.0);
        assert_eq!(timing.displayed_position(192), 240.0);
        assert_eq!(timing.displayed_position(-48), -48.0);
    }

    #[test]
    fn speed_multiplier_eases_from_previous_ratio() {
        let mut tempo = tempo_120();
        tempo.group.speeds.modify([(
            96,
            Some(Speed { ratio: 3.0, delay: 2.0, unit: SpeedUnit::Seconds }),
        )]);
        let timing = TimingData::from_tempo(&tempo);
        let start = timing.row_to_time(96);

        assert_eq!(timing.speed_multiplier(0, 0.0), 1.0);
        assert!(close(timing.speed_multiplier(96, start), 1.0));
        assert!(close(timing.speed_multiplier(200, start + 1.0), 2.0));
        assert!(close(timing.speed_multiplier(200, start + 2.0), 3.0));
        assert!(close(timing.speed_multiplier(400, start + 60.0), 3.0));
    }
}
