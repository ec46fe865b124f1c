use crate::rng::SimRng;
use crate::types::{TimeRange, TimeSeriesPoint, clamp_non_negative, clamp_pct};
use crate::window::SeriesWindow;

/// Spacing between backfilled points.
pub const SAMPLE_SPACING_MS: u64 = 15 * 60 * 1000;

/// One time-series sample: base level + noise + a slow sinusoid.
///
/// Each metric has its own frequency over `phase`, so the three curves drift
/// independently. Backfill uses the step count as the phase; live ticks use
/// [`wall_clock_phase`].
pub fn sample_point(rng: &mut SimRng, ts_ms: u64, phase: f64) -> TimeSeriesPoint {
    let avg_dwell = 50.0 + rng.next() * 40.0 + (phase * 0.1).sin() * 10.0;
    let throughput = 100.0 + rng.next() * 50.0 + (phase * 0.15).cos() * 20.0;
    let occupancy = 40.0 + rng.next() * 30.0 + (phase * 0.2).sin() * 15.0;

    TimeSeriesPoint {
        ts_ms,
        avg_dwell_sec: clamp_non_negative(avg_dwell),
        throughput_veh_per_hr: clamp_non_negative(throughput),
        occupancy_pct: clamp_pct(occupancy),
    }
}

/// Sinusoid phase for a live sample taken at `now_ms`.
///
/// Driven by wall-clock time rather than tick count so a restarted session
/// does not replay the same trend.
pub fn wall_clock_phase(now_ms: u64) -> f64 {
    now_ms as f64 / 1000.0
}

/// Backfills `range.window_bound()` points at 15 minute spacing, the last one
/// stamped `now_ms`.
pub fn build_time_series(rng: &mut SimRng, range: TimeRange, now_ms: u64) -> SeriesWindow {
    let n = range.window_bound();
    let mut window = SeriesWindow::new(n);

    for steps_back in (0..n).rev() {
        let ts_ms = now_ms.saturating_sub(steps_back as u64 * SAMPLE_SPACING_MS);
        window.push(sample_point(rng, ts_ms, steps_back as f64));
    }

    window
}
