//! Geometric annualization of a path of period returns

use crate::error::InvalidPathError;

/// Compound a path of period returns into a single annual rate.
///
/// `growth = Π(1 + r)` and the result is `growth^(periods_per_year / n) - 1`,
/// unrounded. Any return at or below -100% makes the path invalid. If the
/// product underflows to zero the result is clamped to `-1.0`.
pub fn annualize(path: &[f64], periods_per_year: u32) -> Result<f64, InvalidPathError> {
    if path.is_empty() {
        return Err(InvalidPathError::Empty);
    }
    if periods_per_year == 0 {
        return Err(InvalidPathError::ZeroPeriodsPerYear);
    }

    let mut growth = 1.0;
    for (period, &value) in path.iter().enumerate() {
        if !value.is_finite() {
            return Err(InvalidPathError::NonFinite { period, value });
        }
        if value <= -1.0 {
            return Err(InvalidPathError::TotalLoss { period, value });
        }
        growth *= 1.0 + value;
    }

    if growth <= 0.0 {
        return Ok(-1.0);
    }

    let exponent = f64::from(periods_per_year) / path.len() as f64;
    if growth.is_finite() {
        return Ok(growth.powf(exponent) - 1.0);
    }

    // Product overflowed; compound in log space instead
    let log_growth: f64 = path.iter().map(|r| r.ln_1p()).sum();
    Ok((log_growth * exponent).exp_m1())
}
