//! Chart scaling and KPI arithmetic used by the dashboard panels.
//!
//! These are the only computations the dashboard performs on its data:
//! axis maxima, averages, bar geometry, and the employer value estimate.

/// Axis maxima are rounded up to a multiple of this.
pub const AXIS_STEP: f64 = 5.0;

/// Round the largest value up to the next multiple of [`AXIS_STEP`],
/// always leaving at least one unit of headroom.
///
/// Non-finite and negative values are ignored; an empty series scales to
/// one step.
pub fn domain_max(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    ((max + 1.0) / AXIS_STEP).ceil() * AXIS_STEP
}

/// Arithmetic mean rounded to one decimal place. `None` for no values.
pub fn mean_one_decimal(values: &[f64]) -> Option<f64> {
    let count = u32::try_from(values.len()).ok().filter(|&n| n > 0)?;
    let mean = values.iter().sum::<f64>() / f64::from(count);
    Some(round_to(mean, 1))
}

/// Height of a bar for `value` on an axis topping out at `max`, within
/// `drawable` pixels. Zero when `max` is not positive.
pub fn bar_height(value: f64, max: f64, drawable: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max) * drawable
}

/// Offset from the top of the chart of the dashed average marker.
pub fn average_marker_offset(average: f64, max: f64, chart_height: f64) -> f64 {
    if max <= 0.0 {
        return chart_height;
    }
    (1.0 - average / max) * chart_height
}

/// Estimated dollar value to employers of appointments avoided.
///
/// `avoided_per_10k` appointments of `minutes` each, valued at the QES
/// average hourly earnings, rounded to whole dollars. `None` until an
/// hourly rate is configured.
pub fn employer_value(avoided_per_10k: u32, minutes: u32, hourly_rate: Option<f64>) -> Option<f64> {
    let rate = hourly_rate.filter(|r| r.is_finite() && *r > 0.0)?;
    let hours = f64::from(minutes) / 60.0;
    Some((f64::from(avoided_per_10k) * hours * rate).round())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10.0_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const EQUITY_DNA: [f64; 5] = [3.2, 3.6, 4.1, 4.7, 5.3];

    #[test]
    fn domain_max_rounds_up_with_headroom() {
        assert!(close(domain_max(&[12.0, 3.0]), 15.0));
        assert!(close(domain_max(&[14.0]), 15.0));
        // Exactly on a step still gets headroom.
        assert!(close(domain_max(&[15.0]), 20.0));
        assert!(close(domain_max(&[]), 5.0));
        assert!(close(domain_max(&[f64::NAN, 2.0]), 5.0));
    }

    #[test]
    fn equity_average() {
        assert_eq!(mean_one_decimal(&EQUITY_DNA).map(|m| close(m, 4.2)), Some(true));
        assert!(mean_one_decimal(&[]).is_none());
    }

    #[test]
    fn bar_geometry() {
        assert!(close(bar_height(2.5, 5.0, 200.0), 100.0));
        assert!(close(bar_height(1.0, 0.0, 200.0), 0.0));
        assert!(close(average_marker_offset(4.2, 5.3, 240.0), (1.0 - 4.2 / 5.3) * 240.0));
        assert!(close(average_marker_offset(1.0, 0.0, 240.0), 240.0));
    }

    #[test]
    fn employer_value_needs_a_rate() {
        assert!(employer_value(12, 30, None).is_none());
        assert!(employer_value(12, 30, Some(0.0)).is_none());
        // 12 appointments * 0.5 h * $41/h = $246
        assert_eq!(employer_value(12, 30, Some(41.0)).map(|v| close(v, 246.0)), Some(true));
    }
}
