/// Median of the non-NaN values, averaging the two middle values when the
/// count is even. `None` when nothing is left to take the median of.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::median;

    #[test]
    fn odd_and_even_counts() {
        assert_eq!(Some(0.5), median([0.9, 0.5, 0.1]));
        assert_eq!(Some(0.45), median([0.9, 0.1, 0.4, 0.5]));
    }

    #[test]
    fn empty_has_no_median() {
        assert_eq!(None, median(Vec::<f64>::new()));
        assert_eq!(None, median([f64::NAN]));
    }

    #[test]
    fn skips_nan() {
        assert_eq!(Some(0.3), median([f64::NAN, 0.3]));
    }
}
