//! Pointer-coordinate to value mapping for the range bar.
//!
//! All functions here are pure: they take measured geometry as
//! arguments and never touch widget state, so the boundary math can be
//! tested exhaustively without building a widget.

/// Width of the draggable value handle, in pixels.
pub const HANDLE_WIDTH: f32 = 20.0;

/// Half the handle width; pointer offsets are centered on the handle's
/// visual midpoint rather than its leading edge.
pub const HANDLE_MEDIAN: f32 = HANDLE_WIDTH / 2.0;

/// Width of each trim marker, in pixels.
pub const MARKER_WIDTH: f32 = 10.0;

/// Half the marker width; the handle's rendered position is floored at
/// this so it never overlaps the in-marker region.
pub const MARKER_MEDIAN: f32 = MARKER_WIDTH / 2.0;

/// Tolerance beyond the out-marker for externally driven value syncs.
///
/// External seeks land on rounded whole-number values, so the computed
/// pixel offset can drift slightly past the out-marker without the seek
/// being genuinely out of range.
pub const SYNC_MARGIN: f32 = MARKER_WIDTH * 0.75;

/// Effective travel width: the usable pixel range for value mapping.
#[must_use]
pub fn travel_width(container_width: f32) -> f32 {
    container_width - HANDLE_WIDTH
}

/// Convert a pointer screen coordinate into a track-local offset,
/// centered on the handle's midpoint.
#[must_use]
pub fn pointer_offset(pointer_x: f32, container_left: f32) -> f32 {
    pointer_x - container_left - HANDLE_MEDIAN
}

/// Convert a track-local offset into a whole-number value in [0, 100].
///
/// The offset is clamped to `[0, travel]` first, so out-of-track
/// pointers saturate at the ends. A non-positive travel width (zero or
/// unmeasured container) yields 0 rather than dividing by zero.
#[must_use]
pub fn value_from_offset(offset: f32, travel: f32) -> f32 {
    if travel <= 0.0 {
        return 0.0;
    }
    (offset.clamp(0.0, travel) / travel * 100.0).round()
}

/// Convert a value in [0, 100] into a pixel offset along a path of
/// `container_width - adjustment` pixels.
///
/// The adjustment differs by call site: [`MARKER_MEDIAN`] for the
/// external handle sync, [`MARKER_WIDTH`] for marker drags. The handle
/// travels a path that excludes half a marker at each end, while
/// markers are anchored by their own full width.
#[must_use]
pub fn offset_from_value(value: f32, container_width: f32, adjustment: f32) -> f32 {
    value * (container_width - adjustment) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_travel_width_excludes_handle() {
        assert!((travel_width(200.0) - 180.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pointer_offset_centers_on_handle() {
        // 200px container at x=0, pointer at local x=90.
        assert!((pointer_offset(90.0, 0.0) - 80.0).abs() < f32::EPSILON);
        // Container not at the screen origin.
        assert!((pointer_offset(190.0, 100.0) - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_value_from_offset_scenario() {
        // 200px container, 20px handle: travel 180, offset 80 -> 44.
        let value = value_from_offset(80.0, travel_width(200.0));
        assert!((value - 44.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_value_from_offset_clamps_to_track() {
        assert!((value_from_offset(-50.0, 180.0)).abs() < f32::EPSILON);
        assert!((value_from_offset(500.0, 180.0) - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_value_from_offset_zero_travel_yields_zero() {
        assert!((value_from_offset(40.0, 0.0)).abs() < f32::EPSILON);
        assert!((value_from_offset(40.0, -10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_value_from_offset_rounds_to_whole_numbers() {
        let value = value_from_offset(80.0, 180.0);
        assert!((value - value.round()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_offset_from_value_marker_path() {
        // Markers scale on the (width - MARKER_WIDTH) path.
        let offset = offset_from_value(50.0, 200.0, MARKER_WIDTH);
        assert!((offset - 95.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_offset_from_value_sync_path() {
        // External sync scales on the (width - MARKER_MEDIAN) path.
        let offset = offset_from_value(50.0, 200.0, MARKER_MEDIAN);
        assert!((offset - 97.5).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_value_always_in_range(offset in -1000.0f32..1000.0, travel in 1.0f32..2000.0) {
            let value = value_from_offset(offset, travel);
            prop_assert!((0.0..=100.0).contains(&value));
        }

        #[test]
        fn prop_value_monotonic_in_offset(
            a in -500.0f32..500.0,
            b in -500.0f32..500.0,
            travel in 1.0f32..2000.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(value_from_offset(lo, travel) <= value_from_offset(hi, travel));
        }

        #[test]
        fn prop_round_trip_within_rounding(value in 0.0f32..=100.0, width in 30.0f32..2000.0) {
            // Handle-path case: zero adjustment, path equals the travel width.
            let travel = travel_width(width);
            let offset = offset_from_value(value, width, HANDLE_WIDTH);
            let back = value_from_offset(offset, travel);
            // One unit of slack for the round() in value_from_offset plus
            // f32 division error on narrow tracks.
            prop_assert!((back - value.round()).abs() <= 1.0);
        }
    }
}
