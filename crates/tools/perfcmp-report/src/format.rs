//! Human-readable formatting of sample values.
//!
//! Times are scaled to `sec`/`ms`/`us`/`ns` with three significant digits
//! chosen from a reference value; sizes use 1024-based `bytes`/`kB`/`MB`.
//! CSV cells carry the raw number with a precision picked from its magnitude.

use crate::suite::Unit;

const TIME_UNITS: [&str; 4] = ["sec", "ms", "us", "ns"];

/// Format time values in seconds sharing the scale and precision of the
/// first value.
///
/// `[0.0114, 0.0021]` becomes `["11.4 ms", "2.1 ms"]`.
#[must_use]
pub fn format_timedeltas(values: &[f64]) -> Vec<String> {
    let Some(&reference) = values.first() else {
        return Vec::new();
    };
    let reference = reference.abs();

    // Largest power of ten not above the reference value, clamped to 1e-9.
    let exponent = (-9..=2)
        .rev()
        .find(|&i| reference >= 10f64.powi(i))
        .unwrap_or(-9);
    let precision = usize::try_from(2 - exponent.rem_euclid(3)).unwrap_or(0);
    let scale = if exponent < 0 {
        -exponent.div_euclid(3)
    } else {
        0
    };
    let unit = TIME_UNITS[usize::try_from(scale).unwrap_or(0)];
    let factor = 10f64.powi(scale * 3);

    values
        .iter()
        .map(|v| format!("{:.precision$} {unit}", v * factor))
        .collect()
}

/// Format a single time value in seconds.
#[must_use]
pub fn format_timedelta(value: f64) -> String {
    format_timedeltas(&[value]).pop().unwrap_or_default()
}

/// Format a size in bytes.
#[must_use]
pub fn format_filesize(size: f64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    if size < 10.0 * KIB {
        if (size - 1.0).abs() < f64::EPSILON {
            return "1 byte".into();
        }
        return format!("{size:.0} bytes");
    }
    if size > 10.0 * MIB {
        return format!("{:.1} MB", size / MIB);
    }
    format!("{:.1} kB", size / KIB)
}

/// Format a group of values of `unit`; time values share one scale.
#[must_use]
pub fn format_values(unit: Unit, values: &[f64]) -> Vec<String> {
    match unit {
        Unit::Time => format_timedeltas(values),
        Unit::Memory => values.iter().map(|&v| format_filesize(v)).collect(),
    }
}

/// Format a single value of `unit`.
#[must_use]
pub fn format_value(unit: Unit, value: f64) -> String {
    match unit {
        Unit::Time => format_timedelta(value),
        Unit::Memory => format_filesize(value),
    }
}

/// Format a raw value for a CSV cell, keeping about five significant digits.
///
/// `0.0114301` becomes `0.01143`, `4.25e-6` becomes `0.00000425` and
/// `8085504` becomes `8085504.00`.
#[must_use]
pub fn format_csv_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1.0 {
        format!("{value:.2}")
    } else if magnitude >= 1e-3 {
        format!("{value:.5}")
    } else if magnitude >= 1e-6 {
        format!("{value:.8}")
    } else {
        format!("{value:.11}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milliseconds() {
        assert_eq!(format_timedeltas(&[0.01143, 0.00214]), ["11.4 ms", "2.1 ms"]);
        assert_eq!(format_timedelta(0.0013), "1.30 ms");
        assert_eq!(format_timedelta(0.250), "250 ms");
    }

    #[test]
    fn other_time_scales() {
        assert_eq!(format_timedelta(1.5), "1.50 sec");
        assert_eq!(format_timedelta(12.34), "12.3 sec");
        assert_eq!(format_timedelta(123.4), "123 sec");
        assert_eq!(format_timedelta(0.000_042), "42.0 us");
        assert_eq!(format_timedelta(0.000_000_5), "500 ns");
    }

    #[test]
    fn tiny_values_clamp_to_nanoseconds() {
        assert_eq!(format_timedelta(0.0), "0.00 ns");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_filesize(1.0), "1 byte");
        assert_eq!(format_filesize(512.0), "512 bytes");
        assert_eq!(format_filesize(7896.0 * 1024.0), "7896.0 kB");
        assert_eq!(format_filesize(20.0 * 1024.0 * 1024.0), "20.0 MB");
    }

    #[test]
    fn memory_values_format_independently() {
        assert_eq!(
            format_values(Unit::Memory, &[8_085_504.0, 512.0]),
            ["7896.0 kB", "512 bytes"]
        );
    }

    #[test]
    fn csv_precision_follows_magnitude() {
        assert_eq!(format_csv_value(0.011_430_1), "0.01143");
        assert_eq!(format_csv_value(1.234_567), "1.23");
        assert_eq!(format_csv_value(8_085_504.0), "8085504.00");
        assert_eq!(format_csv_value(4.25e-6), "0.00000425");
        assert_eq!(format_csv_value(3.2e-9), "0.00000000320");
        assert_eq!(format_csv_value(0.0), "0.00000000000");
    }
}
