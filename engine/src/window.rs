use std::collections::VecDeque;

use crate::types::TimeSeriesPoint;

/// Count-bounded FIFO of time-series points, oldest at the front.
///
/// The bound comes from the configured time range and may change during a
/// session: shrinking evicts the oldest points immediately, growing keeps
/// what is there and lets new points accumulate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesWindow {
    points: VecDeque<TimeSeriesPoint>,
    max_points: usize,
}

impl SeriesWindow {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_points),
            max_points,
        }
    }

    /// Appends the newest point, evicting from the front past the bound.
    pub fn push(&mut self, point: TimeSeriesPoint) {
        self.points.push_back(point);
        self.evict_excess();
    }

    /// Changes the bound and trims to it.
    pub fn set_bound(&mut self, max_points: usize) {
        self.max_points = max_points;
        self.evict_excess();
    }

    fn evict_excess(&mut self) {
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    pub fn bound(&self) -> usize {
        self.max_points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&TimeSeriesPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeriesPoint> {
        self.points.iter()
    }

    /// Points oldest-first.
    pub fn to_vec(&self) -> Vec<TimeSeriesPoint> {
        self.points.iter().copied().collect()
    }
}

impl FromIterator<TimeSeriesPoint> for SeriesWindow {
    /// Collects with the bound set to the number of points collected.
    fn from_iter<I: IntoIterator<Item = TimeSeriesPoint>>(iter: I) -> Self {
        let points: VecDeque<TimeSeriesPoint> = iter.into_iter().collect();
        let max_points = points.len();
        Self { points, max_points }
    }
}
