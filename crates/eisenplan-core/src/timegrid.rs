//! Geometry of the day calendar: the pure mapping between pixel space and
//! hour-of-day values, quantized to half-hour slots.
//!
//! The calendar window runs 07:00–20:00; the last slot a task can start in
//! is 19:30. All conversions round to the nearest slot and clamp into the
//! window, so every value leaving this module is a valid slot time.

use chrono::NaiveTime;

/// Pixel height of one hour row. Shared with the stylesheet and the
/// terminal agenda; the pointer math breaks if the views disagree.
pub const HOUR_HEIGHT: f64 = 60.0;

/// First hour shown on the grid.
pub const GRID_START_HOUR: f64 = 7.0;

/// End of the calendar window; no task block may extend past it.
pub const GRID_END_HOUR: f64 = 20.0;

/// Slot granularity in hours.
pub const SLOT_HOURS: f64 = 0.5;

/// Latest slot a task can start in.
pub const LAST_SLOT: f64 = GRID_END_HOUR - SLOT_HOURS;

/// Smallest duration a resize can produce.
pub const MIN_DURATION: f64 = 0.5;

/// Converts a pointer offset from the top of the calendar body into a slot
/// time. Drops above or below the grid land on the first or last slot.
pub fn pixel_offset_to_hour(pixel_y: f64) -> f64 {
    let slots = (pixel_y / (HOUR_HEIGHT / 2.0)).round();
    (slots * SLOT_HOURS + GRID_START_HOUR).clamp(GRID_START_HOUR, LAST_SLOT)
}

/// Top offset in pixels of a task block. Inverse of the time portion of
/// [`pixel_offset_to_hour`]; the caller guarantees a valid slot time.
pub fn task_top_offset(scheduled_time: f64) -> f64 {
    (scheduled_time - GRID_START_HOUR) * HOUR_HEIGHT
}

/// Converts the pointer position during a resize into a candidate duration:
/// the block height from its top to the pointer, floored at half a slot and
/// rounded to half-hour steps.
pub fn pixel_delta_to_duration(pointer_y: f64, task_top: f64) -> f64 {
    let height = (pointer_y - task_top).max(HOUR_HEIGHT / 2.0);
    ((height / (HOUR_HEIGHT / 2.0)).round() * SLOT_HOURS).max(MIN_DURATION)
}

/// Whether a block starting at `start` with `duration` stays inside the
/// window. Callers reject (not clamp) anything that does not fit.
pub fn fits_in_grid(start: f64, duration: f64) -> bool {
    start + duration <= GRID_END_HOUR
}

/// The full hours rendered as grid rows, 7 through 19.
pub fn grid_hours() -> std::ops::RangeInclusive<u32> {
    (GRID_START_HOUR as u32)..=(GRID_END_HOUR as u32 - 1)
}

/// `8.5` -> `"8:30"`. Falls back to a bare decimal for values that do not
/// name a time of day, which no quantized slot ever hits.
pub fn format_hour(time: f64) -> String {
    let seconds = (time * 3600.0).round() as u32;
    match NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
        Some(t) => t.format("%-H:%M").to_string(),
        None => format!("{time:.1}"),
    }
}

/// Parses user clock input: `"8"`, `"08:30"` or `"8.5"`. Returns `None`
/// unless the value is exactly a slot inside the window.
pub fn parse_hour(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let value = if let Some((hours, minutes)) = trimmed.split_once(':') {
        let hours: u32 = hours.parse().ok()?;
        let minutes: u32 = minutes.parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        f64::from(hours) + f64::from(minutes) / 60.0
    } else {
        trimmed.parse::<f64>().ok()?
    };

    is_slot(value).then_some(value)
}

/// A valid slot is a multiple of half an hour between the first and the
/// last startable slot. Slot values are binary-exact, so `==` is safe here.
pub fn is_slot(value: f64) -> bool {
    (GRID_START_HOUR..=LAST_SLOT).contains(&value) && (value / SLOT_HOURS).fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::{
        GRID_START_HOUR, HOUR_HEIGHT, LAST_SLOT, fits_in_grid, format_hour, grid_hours, is_slot,
        parse_hour, pixel_delta_to_duration, pixel_offset_to_hour, task_top_offset,
    };

    #[test]
    fn every_pixel_maps_to_a_valid_slot() {
        let mut y = -200.0;
        while y < 1200.0 {
            let hour = pixel_offset_to_hour(y);
            assert!(is_slot(hour), "pixel {y} produced non-slot {hour}");
            y += 7.3;
        }
    }

    #[test]
    fn drops_outside_the_grid_clamp_to_the_edges() {
        assert_eq!(pixel_offset_to_hour(-500.0), GRID_START_HOUR);
        assert_eq!(pixel_offset_to_hour(0.0), GRID_START_HOUR);
        assert_eq!(pixel_offset_to_hour(99_999.0), LAST_SLOT);
    }

    #[test]
    fn drop_snaps_to_the_nearest_half_hour() {
        // 14.25 computed hours is 7.25h below the grid top, i.e. 435px.
        let y = (14.25 - GRID_START_HOUR) * HOUR_HEIGHT;
        let snapped = pixel_offset_to_hour(y);
        assert!(
            snapped == 14.0 || snapped == 14.5,
            "expected a neighbor of 14.25, got {snapped}"
        );
        // round(14.5) on the half-slot count lands on the upper neighbor.
        assert_eq!(snapped, 14.5);
    }

    #[test]
    fn top_offset_round_trips_within_one_slot() {
        let mut y = 0.0;
        while y <= task_top_offset(LAST_SLOT) {
            let back = task_top_offset(pixel_offset_to_hour(y));
            assert!(
                (back - y).abs() <= HOUR_HEIGHT / 2.0,
                "pixel {y} round-tripped to {back}"
            );
            y += 11.0;
        }
    }

    #[test]
    fn duration_is_floored_and_quantized() {
        let top = task_top_offset(9.0);
        assert_eq!(pixel_delta_to_duration(top - 400.0, top), 0.5);
        assert_eq!(pixel_delta_to_duration(top + 1.0, top), 0.5);
        assert_eq!(pixel_delta_to_duration(top + 44.0, top), 0.5);
        assert_eq!(pixel_delta_to_duration(top + 80.0, top), 1.5);
        assert_eq!(pixel_delta_to_duration(top + 150.0, top), 2.5);
    }

    #[test]
    fn grid_fit_is_a_hard_ceiling() {
        assert!(fits_in_grid(9.0, 2.5));
        assert!(fits_in_grid(19.5, 0.5));
        assert!(!fits_in_grid(9.0, 12.0));
        assert!(!fits_in_grid(19.5, 1.0));
    }

    #[test]
    fn formats_clock_times() {
        assert_eq!(format_hour(7.0), "7:00");
        assert_eq!(format_hour(8.5), "8:30");
        assert_eq!(format_hour(19.5), "19:30");
    }

    #[test]
    fn parses_clock_input_forms() {
        assert_eq!(parse_hour("8"), Some(8.0));
        assert_eq!(parse_hour("08:30"), Some(8.5));
        assert_eq!(parse_hour(" 19:30 "), Some(19.5));
        assert_eq!(parse_hour("9.5"), Some(9.5));
    }

    #[test]
    fn rejects_off_grid_and_off_slot_input() {
        assert_eq!(parse_hour("6:30"), None);
        assert_eq!(parse_hour("20:00"), None);
        assert_eq!(parse_hour("9:15"), None);
        assert_eq!(parse_hour("9:99"), None);
        assert_eq!(parse_hour("half past nine"), None);
    }

    #[test]
    fn grid_rows_cover_seven_to_nineteen() {
        let hours: Vec<u32> = grid_hours().collect();
        assert_eq!(hours.first(), Some(&7));
        assert_eq!(hours.last(), Some(&19));
        assert_eq!(hours.len(), 13);
    }
}
