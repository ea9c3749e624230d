//! Per-node measurement caching.
//!
//! Every node keeps one layout slot (full layout results) and a small ring
//! of measurement slots (size-only results). The oracle below decides when
//! a cached entry is guaranteed to answer a new request with the same
//! computed size, which is what makes stable re-layouts cheap.

use flex_style::{MeasureMode, approx_eq, approx_eq_f32};

/// Even the most complicated layouts tend to need well under this many
/// distinct measurements per node within one layout generation.
pub(crate) const MAX_CACHED_MEASUREMENTS: usize = 16;

/// One remembered measurement: the request that was made and the size that
/// came out of it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CachedMeasurement {
    pub available_width: Option<f32>,
    pub available_height: Option<f32>,
    pub width_mode: MeasureMode,
    pub height_mode: MeasureMode,
    pub computed_width: f32,
    pub computed_height: f32,
}

impl CachedMeasurement {
    /// Exact-match predicate used for nodes without measure functions:
    /// same modes, same available sizes (within tolerance).
    pub(crate) fn matches_request(
        &self,
        available_width: Option<f32>,
        available_height: Option<f32>,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> bool {
        approx_eq(self.available_width, available_width)
            && approx_eq(self.available_height, available_height)
            && self.width_mode == width_mode
            && self.height_mode == height_mode
    }
}

/// The new request pins the size exactly to what the cache produced.
#[inline]
fn new_size_is_exact_and_matches_old_measured_size(
    size_mode: MeasureMode,
    size: Option<f32>,
    last_computed_size: f32,
) -> bool {
    size_mode == MeasureMode::Exactly
        && size.is_some_and(|value| approx_eq_f32(value, last_computed_size))
}

/// The cache was measured without a constraint and its result still fits
/// under the new at-most bound.
#[inline]
fn old_size_is_unspecified_and_still_fits(
    size_mode: MeasureMode,
    size: Option<f32>,
    last_size_mode: MeasureMode,
    last_computed_size: f32,
) -> bool {
    size_mode == MeasureMode::AtMost
        && last_size_mode == MeasureMode::Undefined
        && size.is_some_and(|value| value >= last_computed_size)
}

/// Both requests are at-most, the new bound is tighter, and the cached
/// result already fits under it.
#[inline]
fn new_measure_size_is_stricter_and_still_valid(
    size_mode: MeasureMode,
    size: Option<f32>,
    last_size_mode: MeasureMode,
    last_size: Option<f32>,
    last_computed_size: f32,
) -> bool {
    last_size_mode == MeasureMode::AtMost
        && size_mode == MeasureMode::AtMost
        && match (last_size, size) {
            (Some(last), Some(new)) => last > new && last_computed_size <= new,
            _ => false,
        }
}

/// Whether `cached` can answer a `(mode, available)` request on both axes
/// with a result guaranteed equal to a fresh computation. Margins are
/// subtracted from the incoming available sizes because cached computed
/// sizes exclude them.
pub(crate) fn can_use_cached_measurement(
    width_mode: MeasureMode,
    available_width: Option<f32>,
    height_mode: MeasureMode,
    available_height: Option<f32>,
    cached: &CachedMeasurement,
    margin_row: f32,
    margin_column: f32,
) -> bool {
    if cached.computed_width < 0.0 || cached.computed_height < 0.0 {
        return false;
    }

    let inner_width = available_width.map(|value| value - margin_row);
    let inner_height = available_height.map(|value| value - margin_column);

    let has_same_width_spec =
        cached.width_mode == width_mode && approx_eq(cached.available_width, available_width);
    let has_same_height_spec =
        cached.height_mode == height_mode && approx_eq(cached.available_height, available_height);

    let width_is_compatible = has_same_width_spec
        || new_size_is_exact_and_matches_old_measured_size(
            width_mode,
            inner_width,
            cached.computed_width,
        )
        || old_size_is_unspecified_and_still_fits(
            width_mode,
            inner_width,
            cached.width_mode,
            cached.computed_width,
        )
        || new_measure_size_is_stricter_and_still_valid(
            width_mode,
            inner_width,
            cached.width_mode,
            cached.available_width,
            cached.computed_width,
        );

    let height_is_compatible = has_same_height_spec
        || new_size_is_exact_and_matches_old_measured_size(
            height_mode,
            inner_height,
            cached.computed_height,
        )
        || old_size_is_unspecified_and_still_fits(
            height_mode,
            inner_height,
            cached.height_mode,
            cached.computed_height,
        )
        || new_measure_size_is_stricter_and_still_valid(
            height_mode,
            inner_height,
            cached.height_mode,
            cached.available_height,
            cached.computed_height,
        );

    width_is_compatible && height_is_compatible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(
        available: (Option<f32>, Option<f32>),
        modes: (MeasureMode, MeasureMode),
        computed: (f32, f32),
    ) -> CachedMeasurement {
        CachedMeasurement {
            available_width: available.0,
            available_height: available.1,
            width_mode: modes.0,
            height_mode: modes.1,
            computed_width: computed.0,
            computed_height: computed.1,
        }
    }

    #[test]
    fn identical_request_is_compatible() {
        let entry = cached(
            (Some(100.0), Some(50.0)),
            (MeasureMode::Exactly, MeasureMode::AtMost),
            (100.0, 30.0),
        );
        assert!(can_use_cached_measurement(
            MeasureMode::Exactly,
            Some(100.0),
            MeasureMode::AtMost,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
    }

    #[test]
    fn exact_request_matching_prior_computed_size_is_compatible() {
        let entry = cached(
            (Some(300.0), Some(50.0)),
            (MeasureMode::AtMost, MeasureMode::Exactly),
            (120.0, 50.0),
        );
        // New exact width pins to the previously computed 120.
        assert!(can_use_cached_measurement(
            MeasureMode::Exactly,
            Some(120.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
    }

    #[test]
    fn unconstrained_result_fitting_new_bound_is_compatible() {
        let entry = cached(
            (None, Some(50.0)),
            (MeasureMode::Undefined, MeasureMode::Exactly),
            (80.0, 50.0),
        );
        assert!(can_use_cached_measurement(
            MeasureMode::AtMost,
            Some(100.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
        // But not if the new bound is smaller than the cached result.
        assert!(!can_use_cached_measurement(
            MeasureMode::AtMost,
            Some(60.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
    }

    #[test]
    fn tighter_at_most_bound_still_covering_result_is_compatible() {
        let entry = cached(
            (Some(200.0), Some(50.0)),
            (MeasureMode::AtMost, MeasureMode::Exactly),
            (90.0, 50.0),
        );
        assert!(can_use_cached_measurement(
            MeasureMode::AtMost,
            Some(150.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
        // A looser bound is not covered by this heuristic.
        assert!(!can_use_cached_measurement(
            MeasureMode::AtMost,
            Some(250.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            0.0,
            0.0
        ));
    }

    #[test]
    fn margins_are_subtracted_from_the_request() {
        let entry = cached(
            (Some(300.0), Some(50.0)),
            (MeasureMode::AtMost, MeasureMode::Exactly),
            (120.0, 50.0),
        );
        // 130 of available width minus a 10 margin matches computed 120.
        assert!(can_use_cached_measurement(
            MeasureMode::Exactly,
            Some(130.0),
            MeasureMode::Exactly,
            Some(50.0),
            &entry,
            10.0,
            0.0
        ));
    }

    #[test]
    fn undefined_request_only_matches_undefined_entry() {
        let entry = cached(
            (None, None),
            (MeasureMode::Undefined, MeasureMode::Undefined),
            (80.0, 20.0),
        );
        assert!(can_use_cached_measurement(
            MeasureMode::Undefined,
            None,
            MeasureMode::Undefined,
            None,
            &entry,
            0.0,
            0.0
        ));
        assert!(!can_use_cached_measurement(
            MeasureMode::Exactly,
            Some(80.0),
            MeasureMode::Undefined,
            None,
            &entry,
            5.0,
            0.0
        ));
    }
}
