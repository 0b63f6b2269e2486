//! Time-of-day sun color: night, sunrise, day, and sunset keys with
//! blended twilight windows.
//!
//! Hours wrap in `[0.0, 24.0)`. A window of half-width `w` is centered on
//! sunrise and on sunset. Inside the sunrise window the color runs
//! night → sunrise → day, reaching the sunrise key exactly at the sunrise
//! hour; the sunset window mirrors it with day → sunset → night. Outside the
//! windows the color is the day key between sunrise and sunset and the night
//! key otherwise.
//!
//! The result depends only on the hour and the [`TimeOfDayConfig`], so the
//! same inputs always produce the same color.

use aether_config::{TimeOfDayConfig, TwilightCurve, wrap_hours};
use glam::Vec4;

const HOURS_PER_DAY: f32 = 24.0;

/// Coarse classification of an hour, mostly for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayPhase {
    Night,
    Sunrise,
    Day,
    Sunset,
}

/// Sun color for the configured `time_of_day`.
pub fn sun_color(tod: &TimeOfDayConfig) -> Vec4 {
    sun_color_at(tod.time_of_day, tod)
}

/// Sun color at an arbitrary hour, using the keys and transition times of `tod`.
///
/// If the two windows overlap the sunrise window wins; `Config::validate`
/// rejects such configurations.
pub fn sun_color_at(hour: f32, tod: &TimeOfDayConfig) -> Vec4 {
    let t = wrap_hours(hour);
    let w = tod.twilight_half_width;
    let night = Vec4::from_array(tod.night_color);
    let day = Vec4::from_array(tod.daytime_color);

    if let Some(s) = window_position(t, tod.sunrise_time, w) {
        let sunrise = Vec4::from_array(tod.sunrise_color);
        return three_key_blend(night, sunrise, day, s, tod.twilight_curve);
    }
    if let Some(s) = window_position(t, tod.sunset_time, w) {
        let sunset = Vec4::from_array(tod.sunset_color);
        return three_key_blend(day, sunset, night, s, tod.twilight_curve);
    }

    if is_daylight(t, tod) { day } else { night }
}

/// Which part of the day an hour falls into.
pub fn day_phase_at(hour: f32, tod: &TimeOfDayConfig) -> DayPhase {
    let t = wrap_hours(hour);
    let w = tod.twilight_half_width;
    if window_position(t, tod.sunrise_time, w).is_some() {
        DayPhase::Sunrise
    } else if window_position(t, tod.sunset_time, w).is_some() {
        DayPhase::Sunset
    } else if is_daylight(t, tod) {
        DayPhase::Day
    } else {
        DayPhase::Night
    }
}

/// Offset from `center` to `t` along the clock, in `[-12, 12)`.
fn signed_hour_offset(t: f32, center: f32) -> f32 {
    let d = (t - center).rem_euclid(HOURS_PER_DAY);
    if d >= HOURS_PER_DAY * 0.5 {
        d - HOURS_PER_DAY
    } else {
        d
    }
}

/// Normalized position of `t` inside the window `[center - w, center + w]`,
/// or `None` if `t` is outside it. Windows may straddle midnight.
fn window_position(t: f32, center: f32, w: f32) -> Option<f32> {
    if w <= 0.0 {
        return None;
    }
    let d = signed_hour_offset(t, center);
    if d.abs() <= w {
        Some(((d + w) / (2.0 * w)).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Strictly after sunrise and strictly before sunset, going forward from sunrise.
fn is_daylight(t: f32, tod: &TimeOfDayConfig) -> bool {
    let since_sunrise = (t - tod.sunrise_time).rem_euclid(HOURS_PER_DAY);
    since_sunrise > 0.0 && since_sunrise < tod.day_length()
}

/// Piecewise blend `from → mid` over `s ∈ [0, 0.5]` and `mid → to` over `[0.5, 1]`.
fn three_key_blend(from: Vec4, mid: Vec4, to: Vec4, s: f32, curve: TwilightCurve) -> Vec4 {
    if s <= 0.5 {
        mix(from, mid, shape(s * 2.0, curve))
    } else {
        mix(mid, to, shape((s - 0.5) * 2.0, curve))
    }
}

/// Linear blend that returns `a` and `b` bit-exactly at `x = 0` and `x = 1`.
fn mix(a: Vec4, b: Vec4, x: f32) -> Vec4 {
    a * (1.0 - x) + b * x
}

fn shape(x: f32, curve: TwilightCurve) -> f32 {
    match curve {
        TwilightCurve::Linear => x,
        TwilightCurve::SmoothStep => smoothstep(0.0, 1.0, x),
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
