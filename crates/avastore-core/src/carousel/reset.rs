//! Loop reset policies: where the accumulated offset wraps back to the start

use serde::{Deserialize, Serialize};

use super::driver::Axis;

/// Geometry and offset sink for whatever surface renders the carousel track
pub trait ScrollContainer {
    /// Total length of the rendered track along `axis` (scrollWidth / scrollHeight)
    fn scroll_extent(&self, axis: Axis) -> f64;

    /// Visible length along `axis` (clientWidth / clientHeight)
    fn client_extent(&self, axis: Axis) -> f64;

    /// Move the track to `offset` along `axis`
    fn apply_offset(&mut self, axis: Axis, offset: f64);
}

/// Item geometry along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub item_count: usize,
    pub item_extent: f64,
    pub gap: f64,
}

impl TrackGeometry {
    /// Length of one non-duplicated run, including the gap that separates it
    /// from the next copy
    pub fn period(&self) -> f64 {
        if self.item_count == 0 {
            return 0.0;
        }
        let period = self.item_count as f64 * (self.item_extent.max(0.0) + self.gap.max(0.0));
        if period.is_finite() {
            period
        } else {
            0.0
        }
    }

    /// Length of the full track rendered with `copies` runs
    pub fn track_extent(&self, copies: usize) -> f64 {
        if self.item_count == 0 {
            return 0.0;
        }
        // The trailing gap of the last item is not rendered
        (self.period() * copies as f64 - self.gap.max(0.0)).max(0.0)
    }
}

/// How the wrap point is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Wrap after exactly one content run
    HalfContent,
    /// Wrap at the furthest reachable offset, rounded down to whole runs
    /// (at least one)
    #[default]
    FullScrollable,
}

impl ResetPolicy {
    /// Compute the reset threshold for a track inside `container`
    ///
    /// Returns 0 when nothing can scroll (no items, or a container at least as
    /// large as its content); the driver then stays at offset 0.
    pub fn compute_reset_threshold(
        self,
        container: &dyn ScrollContainer,
        axis: Axis,
        geometry: TrackGeometry,
    ) -> f64 {
        let period = geometry.period();
        if geometry.item_count == 0 {
            return 0.0;
        }

        match self {
            ResetPolicy::HalfContent => period,
            ResetPolicy::FullScrollable => {
                let ceiling =
                    container.scroll_extent(axis) - container.client_extent(axis);
                if !ceiling.is_finite() || ceiling <= 0.0 {
                    return 0.0;
                }
                if period <= 0.0 {
                    // Geometry unknown: the raw ceiling is all we have
                    return ceiling;
                }
                // Never wrap mid-run; renderers tile the track cyclically past its end
                (ceiling / period).floor().max(1.0) * period
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedContainer {
        scroll: f64,
        client: f64,
    }

    impl ScrollContainer for FixedContainer {
        fn scroll_extent(&self, _axis: Axis) -> f64 {
            self.scroll
        }

        fn client_extent(&self, _axis: Axis) -> f64 {
            self.client
        }

        fn apply_offset(&mut self, _axis: Axis, _offset: f64) {}
    }

    fn geometry(item_count: usize) -> TrackGeometry {
        TrackGeometry {
            item_count,
            item_extent: 100.0,
            gap: 32.0,
        }
    }

    #[test]
    fn test_half_content_is_one_run() {
        let container = FixedContainer {
            scroll: 0.0,
            client: 0.0,
        };
        let threshold =
            ResetPolicy::HalfContent.compute_reset_threshold(&container, Axis::X, geometry(3));
        assert_eq!(threshold, 396.0);
    }

    #[test]
    fn test_full_scrollable_rounds_to_whole_runs() {
        let geo = geometry(3);
        // Tripled track in a 500 wide viewport
        let container = FixedContainer {
            scroll: geo.track_extent(3),
            client: 500.0,
        };
        let threshold =
            ResetPolicy::FullScrollable.compute_reset_threshold(&container, Axis::X, geo);
        // ceiling = 1156 - 500 = 656, one whole run fits
        assert_eq!(threshold, 396.0);
    }

    #[test]
    fn test_full_scrollable_matches_half_content_for_two_copies() {
        let geo = geometry(4);
        let container = FixedContainer {
            scroll: geo.track_extent(2),
            client: 300.0,
        };
        let full = ResetPolicy::FullScrollable.compute_reset_threshold(&container, Axis::X, geo);
        let half = ResetPolicy::HalfContent.compute_reset_threshold(&container, Axis::X, geo);
        assert_eq!(full, half);
    }

    #[test]
    fn test_full_scrollable_short_ceiling_uses_one_run() {
        // Four 24 wide items doubled in a 118 wide viewport: ceiling 88, run 104
        let geo = TrackGeometry {
            item_count: 4,
            item_extent: 24.0,
            gap: 2.0,
        };
        let container = FixedContainer {
            scroll: geo.track_extent(2),
            client: 118.0,
        };
        let threshold =
            ResetPolicy::FullScrollable.compute_reset_threshold(&container, Axis::X, geo);
        assert_eq!(threshold, geo.period());
        assert_eq!(threshold, 104.0);
    }

    #[test]
    fn test_full_scrollable_without_room() {
        let container = FixedContainer {
            scroll: 300.0,
            client: 800.0,
        };
        let threshold =
            ResetPolicy::FullScrollable.compute_reset_threshold(&container, Axis::X, geometry(2));
        assert_eq!(threshold, 0.0);
    }

    #[test]
    fn test_no_items_no_threshold() {
        let container = FixedContainer {
            scroll: 1000.0,
            client: 100.0,
        };
        for policy in [ResetPolicy::HalfContent, ResetPolicy::FullScrollable] {
            assert_eq!(
                policy.compute_reset_threshold(&container, Axis::Y, geometry(0)),
                0.0
            );
        }
    }
}
