//! Fixed-point APR derivation from a Lido rebase report
//!
//! All intermediate products stay in 256-bit integers. The pooled ether
//! delta is carried as magnitude plus sign so a shrinking pool yields a
//! negative rate, and truncation rounds toward zero in both directions.

use web3::types::U256;

use crate::assets::ReportDelta;
use crate::constants::{BASIS_POINT_DIVISOR, SCALING_FACTOR, SECONDS_PER_YEAR};
use crate::error::{BridgeDataError, Result};

/// Annualized rate scaled by `SCALING_FACTOR`, as (negative, magnitude)
pub fn scaled_apr(delta: &ReportDelta) -> Result<(bool, U256)> {
    if delta.pre_total_pooled_ether.is_zero() {
        return Err(BridgeDataError::DivisionByZero("preTotalPooledEther is zero"));
    }
    if delta.time_elapsed.is_zero() {
        return Err(BridgeDataError::DivisionByZero("timeElapsed is zero"));
    }

    let (negative, magnitude) = if delta.post_total_pooled_ether >= delta.pre_total_pooled_ether {
        (false, delta.post_total_pooled_ether - delta.pre_total_pooled_ether)
    } else {
        (true, delta.pre_total_pooled_ether - delta.post_total_pooled_ether)
    };

    let numerator = magnitude
        .checked_mul(U256::from(SECONDS_PER_YEAR))
        .and_then(|v| v.checked_mul(U256::from(SCALING_FACTOR)))
        .ok_or_else(|| overflow("rebase delta numerator"))?;
    let denominator = delta
        .pre_total_pooled_ether
        .checked_mul(delta.time_elapsed)
        .ok_or_else(|| overflow("rebase delta denominator"))?;

    Ok((negative, numerator / denominator))
}

/// Annualized rate in percent, two-decimal precision
///
/// Scales down to basis points in integer space first, then to percent.
pub fn annualized_rate(delta: &ReportDelta) -> Result<f64> {
    let (negative, scaled) = scaled_apr(delta)?;
    let basis_points = scaled / U256::from(BASIS_POINT_DIVISOR);
    if basis_points > U256::from(i128::MAX as u128) {
        return Err(overflow("annualized rate in basis points"));
    }

    let magnitude = basis_points.as_u128() as i128;
    let basis_points = if negative { -magnitude } else { magnitude };
    Ok(basis_points as f64 / 100.0)
}

fn overflow(what: &str) -> BridgeDataError {
    BridgeDataError::ValueOutOfRange(format!("{} overflows 256 bits", what))
}
