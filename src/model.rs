use serde_json::{Map, Value};

/// One numeric form field, keyed by the dataset column name the server expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub key: &'static str,
    pub label: &'static str,
}

/// The 11 wine-chemistry inputs, in dataset order. Form order, tab order and
/// Enter-key navigation order all follow this list.
pub const FEATURES: &[Feature] = &[
    Feature { key: "fixed acidity", label: "Fixed Acidity" },
    Feature { key: "volatile acidity", label: "Volatile Acidity" },
    Feature { key: "citric acid", label: "Citric Acid" },
    Feature { key: "residual sugar", label: "Residual Sugar" },
    Feature { key: "chlorides", label: "Chlorides" },
    Feature { key: "free sulfur dioxide", label: "Free Sulfur Dioxide" },
    Feature { key: "total sulfur dioxide", label: "Total Sulfur Dioxide" },
    Feature { key: "density", label: "Density" },
    Feature { key: "pH", label: "pH" },
    Feature { key: "sulphates", label: "Sulphates" },
    Feature { key: "alcohol", label: "Alcohol" },
];

/// Quality band names for the 3-class model output, by class index.
pub const CLASS_LABELS: &[&str] = &[
    "Low quality (3-4)",
    "Medium quality (5-6)",
    "High quality (7-8)",
];

pub fn class_label(index: usize) -> String {
    CLASS_LABELS
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Class {}", index))
}

/// Build the `/predict` request body from the raw input texts, paired with
/// `FEATURES` by position. Blank or unparseable entries become JSON `null`;
/// the server treats those as missing and lets its imputer fill them.
pub fn build_payload(raw_values: &[String]) -> Map<String, Value> {
    let mut payload = Map::new();
    for (feature, raw) in FEATURES.iter().zip(raw_values) {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        payload.insert(feature.key.to_string(), value);
    }
    payload
}

/// Format a probability in [0,1] as a one-decimal percentage, e.g. `0.7` -> `"70.0%"`.
/// Midpoints round away from zero, like `toFixed(1)` in the browser, so
/// `0.0625` reads `"6.3%"` rather than the half-to-even `"6.2%"`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", (probability * 1000.0).round() / 10.0)
}

/// One rendered probability bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub percent: f64,
    pub readout: String,
}

/// Immutable view model for a successful prediction, computed once per
/// response and handed to the view layer as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub label: String,
    pub bars: Vec<BarRow>,
}

impl PredictionView {
    pub fn new(label: String, probabilities: &[f64]) -> Self {
        let bars = probabilities
            .iter()
            .enumerate()
            .map(|(index, &probability)| BarRow {
                label: class_label(index),
                percent: probability * 100.0,
                readout: format_percent(probability),
            })
            .collect();
        Self { label, bars }
    }
}

/// Whether a response for `request_id` may still update the UI. Predict
/// actions take ids from a monotonic counter; once a newer action has been
/// issued, responses to older ones are discarded rather than raced.
pub fn is_latest_request(request_id: u64, latest_issued: u64) -> bool {
    request_id == latest_issued
}

/// Controller state for one predict cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictState {
    Idle,
    Pending,
    Rendered(PredictionView),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_feature_list_covers_all_dataset_columns() {
        assert_eq!(FEATURES.len(), 11, "Form should expose all 11 dataset features");
        assert_eq!(FEATURES[0].key, "fixed acidity");
        assert_eq!(FEATURES[10].key, "alcohol");
    }

    #[test]
    fn test_payload_contains_every_feature_key() {
        let raw: Vec<String> = (0..FEATURES.len()).map(|i| i.to_string()).collect();
        let payload = build_payload(&raw);

        assert_eq!(payload.len(), FEATURES.len());
        for feature in FEATURES {
            assert!(payload.contains_key(feature.key), "Missing key: {}", feature.key);
        }
    }

    #[test]
    fn test_payload_coerces_numeric_text() {
        let mut raw = vec![String::new(); FEATURES.len()];
        raw[0] = "7.4".to_string();
        raw[10] = " 9.8 ".to_string();

        let payload = build_payload(&raw);
        assert_eq!(payload["fixed acidity"], Value::from(7.4));
        assert_eq!(payload["alcohol"], Value::from(9.8));
    }

    #[test]
    fn test_blank_and_invalid_inputs_become_null() {
        let mut raw = vec!["1.0".to_string(); FEATURES.len()];
        raw[1] = String::new();
        raw[2] = "not a number".to_string();

        let payload = build_payload(&raw);
        assert_eq!(payload["volatile acidity"], Value::Null);
        assert_eq!(payload["citric acid"], Value::Null);
        assert_eq!(payload["residual sugar"], Value::from(1.0));
    }

    #[test]
    fn test_format_percent_one_decimal() {
        assert_eq!(format_percent(0.1), "10.0%");
        assert_eq!(format_percent(0.7), "70.0%");
        assert_eq!(format_percent(0.2), "20.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.456), "45.6%");
    }

    #[test]
    fn test_format_percent_rounds_midpoints_away_from_zero() {
        // 0.0625 * 100 = 6.25 exactly; one-decimal display must round up.
        assert_eq!(format_percent(0.0625), "6.3%");
        assert_eq!(format_percent(0.1875), "18.8%");
    }

    #[test]
    fn test_prediction_view_builds_one_bar_per_class() {
        let view = PredictionView::new("6".to_string(), &[0.1, 0.7, 0.2]);

        assert_eq!(view.label, "6");
        assert_eq!(view.bars.len(), 3);
        assert_eq!(view.bars[0].label, "Low quality (3-4)");
        assert_eq!(view.bars[1].label, "Medium quality (5-6)");
        assert_eq!(view.bars[2].label, "High quality (7-8)");
        assert_eq!(view.bars[0].readout, "10.0%");
        assert_eq!(view.bars[1].readout, "70.0%");
        assert_eq!(view.bars[2].readout, "20.0%");
        assert!((view.bars[0].percent - 10.0).abs() < 1e-9);
        assert!((view.bars[1].percent - 70.0).abs() < 1e-9);
        assert!((view.bars[2].percent - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_stale_response_is_not_latest() {
        // Two submissions before either resolves: ids 1 then 2 are issued.
        let first_id = 1;
        let second_id = 2;
        let latest_issued = second_id;

        // The earlier response must be discarded; only the newest may land,
        // in whichever order the two responses arrive.
        assert!(!is_latest_request(first_id, latest_issued));
        assert!(is_latest_request(second_id, latest_issued));
    }

    #[test]
    fn test_class_label_fallback_for_unknown_index() {
        assert_eq!(class_label(1), "Medium quality (5-6)");
        assert_eq!(class_label(7), "Class 7");
    }
}
