// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nice-number axis ticks for chart value scales.

/// Desired number of intervals between ticks.
pub const DEFAULT_TICK_COUNT: u32 = 5;

/// Significant digits kept below the step's power of ten when rounding.
const TICK_PRECISION: f64 = 6.0;

/// Fraction of a step under which a tick counts as the ceiling.
const TICK_TOLERANCE: f64 = 1e-6;

/// Rounds `value` up to 1, 2, 5 or 10 times its power of ten.
///
/// # Example
///
/// ```text
/// nice_number(87.0)  = 100.0
/// nice_number(17.4)  = 20.0
/// nice_number(0.3)   = 0.5
/// ```
#[must_use]
pub fn nice_number(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }

    let exponent: f64 = value.log10().floor();
    let magnitude: f64 = 10f64.powf(exponent);
    let fraction: f64 = value / magnitude;

    let nice: f64 = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

fn round_tick(value: f64, step: f64) -> f64 {
    let scale: f64 = 10f64.powf(TICK_PRECISION - step.log10().floor());
    let scaled: f64 = value * scale;
    if scale.is_finite() && scale > 0.0 && scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// Computes ascending chart ticks from zero through a nice ceiling.
///
/// Zero, negative and non-finite maxima yield `[0]`. The ceiling is
/// always the last tick and is never below `maximum`.
///
/// # Arguments
///
/// * `maximum` - The largest value plotted
/// * `tick_count` - Desired number of intervals (minimum 1)
///
/// # Example
///
/// ```text
/// axis_ticks(87.0, 5) = [0, 20, 40, 60, 80, 100]
/// ```
#[must_use]
pub fn axis_ticks(maximum: f64, tick_count: u32) -> Vec<f64> {
    if !maximum.is_finite() || maximum <= 0.0 {
        return vec![0.0];
    }

    let ceiling: f64 = nice_number(maximum);
    let step: f64 = nice_number(ceiling / f64::from(tick_count.max(1)));
    if step <= 0.0 {
        return vec![0.0, ceiling.max(maximum)];
    }

    let ceiling: f64 = round_tick(ceiling, step).max(maximum);
    let tolerance: f64 = step * TICK_TOLERANCE;
    let mut ticks: Vec<f64> = Vec::new();
    let mut index: u32 = 0;
    loop {
        let tick: f64 = round_tick(f64::from(index) * step, step);
        if tick >= ceiling - tolerance {
            break;
        }
        ticks.push(tick);
        index += 1;
    }

    ticks.push(ceiling);
    ticks
}
