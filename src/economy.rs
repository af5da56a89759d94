//! Small economy arithmetic: upgrade cost curve and display formatting.

/// Geometric upgrade cost: `base * growth^owned`, rounded up.
///
/// Saturates at `u64::MAX` once the curve outgrows the integer range.
pub fn upgrade_cost(base_cost: f64, growth: f64, owned: u32) -> u64 {
    let cost = base_cost * growth.powi(owned as i32);
    if !cost.is_finite() || cost >= u64::MAX as f64 {
        return u64::MAX;
    }
    cost.ceil().max(0.0) as u64
}

/// Format a number with abbreviated suffixes (K, M, B, T, Q).
pub fn format_number_short(n: u64) -> String {
    // (threshold, divisor, suffix)
    const TIERS: &[(u64, f64, &str)] = &[
        (1_000_000_000_000_000, 1e15, "Q"),
        (1_000_000_000_000, 1e12, "T"),
        (1_000_000_000, 1e9, "B"),
        (1_000_000, 1e6, "M"),
        (10_000, 1e3, "K"),
    ];

    for &(threshold, divisor, suffix) in TIERS {
        if n >= threshold {
            return format!("{:.1}{}", n as f64 / divisor, suffix);
        }
    }
    n.to_string()
}
