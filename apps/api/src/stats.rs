//! Small numeric helpers shared by the aggregators.

/// Rounds half-up (`floor(x + 0.5)`), so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Rounded mean of the given values, `0` when there are none.
pub fn rounded_mean<I>(values: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0_i64, 0_usize), |(sum, count), v| (sum + i64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    round_half_up(sum as f64 / count as f64)
}

/// Rounded percentage of `part` over `total`, `0` when `total` is zero.
pub fn rounded_percentage(part: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    round_half_up(part as f64 / total as f64 * 100.0)
}
