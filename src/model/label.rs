//! Label data model for keypoint joints.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{self, Rgba};

/// Identifier of a label in the task's label taxonomy.
pub type LabelId = String;

/// A label from the task's taxonomy, copied by value into each joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Unique identifier for the label
    pub id: LabelId,
    /// Display name of the label
    pub name: String,
    /// RGBA color, serialized as a hex string
    #[serde(serialize_with = "serialize_hex", deserialize_with = "deserialize_hex")]
    pub color: Rgba,
    /// Whether this is the implicit empty/background label
    #[serde(default)]
    pub is_empty: bool,
}

impl Label {
    /// Create a new label with the given ID, name, and color.
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>, color: Rgba) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            is_empty: false,
        }
    }

    /// Create a label whose color is derived from its position in the taxonomy.
    pub fn with_default_color(id: impl Into<LabelId>, name: impl Into<String>, index: usize) -> Self {
        Self::new(id, name, color::default_label_color(index))
    }

    /// Mark this label as the empty/background label.
    pub fn as_empty(mut self) -> Self {
        self.is_empty = true;
        self
    }
}

fn serialize_hex<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color::to_hex(*color))
}

fn deserialize_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba, D::Error> {
    let hex = String::deserialize(deserializer)?;
    color::parse_hex_color(&hex)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", hex)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_json_uses_hex_color() {
        let label = Label::new("1", "head", [255, 0, 0, 255]);
        let json = serde_json::to_value(&label).unwrap();

        assert_eq!(json["color"], "#ff0000ff");
        assert_eq!(json["isEmpty"], false);

        let back: Label = serde_json::from_value(json).unwrap();
        assert_eq!(back, label);
    }

    #[test]
    fn test_label_rejects_bad_color() {
        let json = serde_json::json!({ "id": "1", "name": "head", "color": "red" });
        assert!(serde_json::from_value::<Label>(json).is_err());
    }

    #[test]
    fn test_empty_label_defaults_false() {
        let json = serde_json::json!({ "id": "1", "name": "head", "color": "#fff" });
        let label: Label = serde_json::from_value(json).unwrap();
        assert!(!label.is_empty);
        assert!(Label::new("0", "background", [0; 4]).as_empty().is_empty);
    }
}
