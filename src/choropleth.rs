//! Quantile bucketing of state values into the map's colour classes.

/// Colour class for states without a value
pub const NO_DATA_CLASS: &str = "c0";

const BUCKET_CLASSES: [&str; 6] = ["c0", "c1", "c2", "c3", "c4", "c5"];

/// Minimum number of known values before real quantiles are used
const MIN_VALUES_FOR_QUANTILES: usize = 5;

/// Whether `class` is one of the bucket classes this module assigns
#[must_use]
pub fn is_bucket_class(class: &str) -> bool {
    BUCKET_CLASSES.contains(&class)
}

/// Assigns values to `c1`..`c5` by quintile, `c0` when there is no value
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    breakpoints: [f64; 4],
}

impl Classifier {
    /// Build breakpoints from the known values, ignoring missing ones.
    ///
    /// With fewer than five values the breakpoints collapse to
    /// `[min, min, (min + max) / 2, max]`.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let mut known: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        known.sort_by(f64::total_cmp);

        let breakpoints = if known.len() >= MIN_VALUES_FOR_QUANTILES {
            [
                quantile(&known, 0.2),
                quantile(&known, 0.4),
                quantile(&known, 0.6),
                quantile(&known, 0.8),
            ]
        } else {
            let min = known.first().copied().unwrap_or(f64::NAN);
            let max = known.last().copied().unwrap_or(f64::NAN);
            let mid = if known.is_empty() { 0.0 } else { (min + max) / 2.0 };
            [min, min, mid, max]
        };

        Self { breakpoints }
    }

    #[must_use]
    pub fn classify(&self, value: Option<f64>) -> &'static str {
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            return NO_DATA_CLASS;
        };

        let bucket = self
            .breakpoints
            .iter()
            .position(|&edge| value <= edge)
            .map_or(5, |index| index + 1);
        BUCKET_CLASSES[bucket]
    }
}

/// Quantile of sorted, non-empty `values` with linear interpolation between
/// the closest ranks
fn quantile(values: &[f64], q: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let position = (values.len() - 1) as f64 * q;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(values.len() - 1);
    let fraction = position - position.floor();
    values[lower] + (values[upper] - values[lower]) * fraction
}

/// One decimal and a percent sign, or an em dash for missing values
#[must_use]
pub fn format_rate(value: Option<f64>) -> String {
    match value.filter(|v| !v.is_nan()) {
        Some(v) => format!("{v:.1}%"),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_close(quantile(&values, 0.2), 2.0);
        assert_close(quantile(&values, 0.4), 3.0);
        assert_close(quantile(&values, 0.5), 3.5);
        assert_close(quantile(&values, 0.8), 5.0);
        assert_close(quantile(&values, 1.0), 6.0);
    }

    #[test]
    fn test_classify_quintiles() {
        let classifier = Classifier::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0].map(Some));
        let [q1, q2, q3, q4] = classifier.breakpoints;
        assert_close(q1, 2.0);
        assert_close(q2, 3.0);
        assert_close(q3, 4.0);
        assert_close(q4, 5.0);

        assert_eq!(classifier.classify(Some(1.0)), "c1");
        assert_eq!(classifier.classify(Some(2.0)), "c1");
        assert_eq!(classifier.classify(Some(2.5)), "c2");
        assert_eq!(classifier.classify(Some(3.5)), "c3");
        assert_eq!(classifier.classify(Some(4.5)), "c4");
        assert_eq!(classifier.classify(Some(6.0)), "c5");
    }

    #[test]
    fn test_missing_values_are_ignored_and_no_data() {
        let classifier =
            Classifier::from_values([Some(1.0), None, Some(2.0), Some(f64::NAN), Some(3.0), Some(4.0), Some(5.0)]);
        assert_close(classifier.breakpoints[0], 1.8);
        assert_eq!(classifier.classify(None), "c0");
        assert_eq!(classifier.classify(Some(f64::NAN)), "c0");
    }

    #[test]
    fn test_few_values_fallback() {
        let classifier = Classifier::from_values([Some(2.0), Some(6.0)]);
        assert_eq!(classifier.breakpoints, [2.0, 2.0, 4.0, 6.0]);
        assert_eq!(classifier.classify(Some(2.0)), "c1");
        assert_eq!(classifier.classify(Some(3.0)), "c3");
        assert_eq!(classifier.classify(Some(5.0)), "c4");
        assert_eq!(classifier.classify(Some(7.0)), "c5");
    }

    #[test]
    fn test_no_values() {
        let classifier = Classifier::from_values(std::iter::empty());
        assert_eq!(classifier.breakpoints[2], 0.0);
        assert_eq!(classifier.classify(None), "c0");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(3.24)), "3.2%");
        assert_eq!(format_rate(Some(4.0)), "4.0%");
        assert_eq!(format_rate(None), "—");
        assert_eq!(format_rate(Some(f64::NAN)), "—");
    }

    #[test]
    fn test_bucket_class_names() {
        assert!(is_bucket_class("c3"));
        assert!(!is_bucket_class("c6"));
        assert!(!is_bucket_class("ca"));
    }
}
