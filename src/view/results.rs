//! Rendering of server results for the results panel.

use std::fmt;

use crate::submit::ServerResult;

pub const SUCCESS_HEADLINE: &str = "Image processed successfully!";

/// Shown while the server has no recognition model behind it.
pub const NO_MODEL_NOTICE: &str = "AI model not connected yet";

/// Prediction part of the results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub flower_type: String,
    /// Confidence as a percentage with two decimals, e.g. `95.00%`
    pub confidence: String,
    /// Extra key/value pairs the server attached
    pub details: Vec<(String, String)>,
}

/// What goes into the results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub filename: String,
    pub file_path: String,
    pub prediction: Option<PredictionView>,
}

impl ResultView {
    pub fn from_result(result: &ServerResult) -> Self {
        let prediction = result.prediction.as_ref().map(|p| PredictionView {
            flower_type: p.flower_type.clone(),
            confidence: format_confidence(p.confidence),
            details: p
                .additional_info
                .iter()
                .flatten()
                .map(|(key, value)| {
                    let value = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), value)
                })
                .collect(),
        });

        Self {
            filename: result.filename.clone().unwrap_or_default(),
            file_path: result.file_path.clone().unwrap_or_default(),
            prediction,
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SUCCESS_HEADLINE)?;
        writeln!(f, "File: {}", self.filename)?;
        writeln!(f, "Path: {}", self.file_path)?;
        match &self.prediction {
            Some(prediction) => {
                writeln!(f, "Recognition result:")?;
                writeln!(f, "  Flower type: {}", prediction.flower_type)?;
                write!(f, "  Confidence: {}", prediction.confidence)?;
                for (key, value) in &prediction.details {
                    write!(f, "\n  {}: {}", key, value)?;
                }
                Ok(())
            }
            None => write!(f, "{}", NO_MODEL_NOTICE),
        }
    }
}

/// `0.95` -> `"95.00%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: serde_json::Value) -> ServerResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_format_confidence_two_decimals() {
        assert_eq!(format_confidence(0.95), "95.00%");
        assert_eq!(format_confidence(0.876543), "87.65%");
        assert_eq!(format_confidence(1.0), "100.00%");
    }

    #[test]
    fn test_view_without_prediction() {
        let view = ResultView::from_result(&result(json!({
            "success": true,
            "filename": "a.jpg",
            "file_path": "/uploads/a.jpg"
        })));
        let text = view.to_string();
        assert!(text.starts_with(SUCCESS_HEADLINE));
        assert!(text.contains("File: a.jpg"));
        assert!(text.contains("Path: /uploads/a.jpg"));
        assert!(text.ends_with(NO_MODEL_NOTICE));
    }

    #[test]
    fn test_view_with_prediction_and_details() {
        let view = ResultView::from_result(&result(json!({
            "success": true,
            "filename": "b.jpg",
            "file_path": "/uploads/b.jpg",
            "prediction": {
                "flower_type": "Rose",
                "confidence": 0.95,
                "additional_info": {"family": "Rosaceae", "petals": 5}
            }
        })));
        let prediction = view.prediction.as_ref().unwrap();
        assert_eq!(prediction.confidence, "95.00%");
        assert!(prediction
            .details
            .contains(&("family".to_string(), "Rosaceae".to_string())));
        assert!(prediction
            .details
            .contains(&("petals".to_string(), "5".to_string())));

        let text = view.to_string();
        assert!(text.contains("Flower type: Rose"));
        assert!(text.contains("Confidence: 95.00%"));
        assert!(!text.contains(NO_MODEL_NOTICE));
    }
}
