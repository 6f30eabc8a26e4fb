// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Lenient parse for amount strings read back from storage or a backup
/// document: malformed or empty input reads as zero, never an error.
pub fn parse_amount(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Canonical encoding for stored amounts. Trailing fractional zeros are not
/// significant, so `1.50` and `1.5` encode identically.
pub fn format_amount(d: &Decimal) -> String {
    d.normalize().to_string()
}

/// Strict parse for user-entered amounts.
pub fn parse_strict(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

/// User-entered transaction amounts must be positive; sign is carried by the
/// transaction kind.
pub fn parse_positive(s: &str) -> Result<Decimal> {
    let d = parse_strict(s)?;
    if d <= Decimal::ZERO {
        bail!("Amount must be positive, got '{}'", s);
    }
    Ok(d)
}

pub fn sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |acc, d| acc + d)
}

/// Percentage share of `part` in `total`. The only point where aggregate
/// decimals are allowed to become floats.
pub fn percent_share(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part * Decimal::ONE_HUNDRED / total).to_f64().unwrap_or(0.0)
}
