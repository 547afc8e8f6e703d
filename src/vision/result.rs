use serde::{Deserialize, Serialize};

/// A single object reported by a vision service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Object label (person, car, dog, ...).
    pub class_name: String,
    /// Detection confidence (0.0-1.0).
    #[serde(default)]
    pub confidence: f64,
    /// Bounding box in pixel coordinates, when the service provides one.
    #[serde(default)]
    pub x_min: Option<i64>,
    #[serde(default)]
    pub y_min: Option<i64>,
    #[serde(default)]
    pub x_max: Option<i64>,
    #[serde(default)]
    pub y_max: Option<i64>,
}

impl Detection {
    /// Detection without a bounding box.
    pub fn labelled(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            x_min: None,
            y_min: None,
            x_max: None,
            y_max: None,
        }
    }

    /// Case-insensitive label comparison.
    pub fn is_class(&self, label: &str) -> bool {
        self.class_name.eq_ignore_ascii_case(label)
    }
}

/// Capabilities a vision service advertises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionProperties {
    #[serde(default)]
    pub detections_supported: bool,
    #[serde(default)]
    pub classifications_supported: bool,
    #[serde(default)]
    pub object_point_clouds_supported: bool,
}

impl VisionProperties {
    pub fn detector() -> Self {
        Self {
            detections_supported: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_parses_without_bounding_box() {
        let det: Detection =
            serde_json::from_str(r#"{"class_name": "Person", "confidence": 0.91}"#).unwrap();
        assert!(det.is_class("person"));
        assert!((det.confidence - 0.91).abs() < 1e-9);
        assert_eq!(det.x_min, None);
    }

    #[test]
    fn detection_parses_bounding_box() {
        let det: Detection = serde_json::from_str(
            r#"{"class_name": "dog", "confidence": 0.5,
                "x_min": 10, "y_min": 20, "x_max": 110, "y_max": 220}"#,
        )
        .unwrap();
        assert_eq!(det.x_min, Some(10));
        assert_eq!(det.y_max, Some(220));
        assert!(!det.is_class("person"));
    }

    #[test]
    fn properties_default_to_unsupported() {
        let props: VisionProperties = serde_json::from_str("{}").unwrap();
        assert!(!props.detections_supported);
        assert!(VisionProperties::detector().detections_supported);
    }
}
