// Wire-level data models: the beauty configuration schema, face detection
// metadata, and the JSON response envelopes.
//
// All field names are camelCase on the wire. Every configuration field has a
// serde default so `{}` deserializes to the all-defaults config; range
// constraints are enforced separately through `validator` so that a
// syntactically valid config with out-of-range values is rejected as
// unprocessable rather than malformed.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A 2D point given as a percentage position within the image (0-100 on both
/// axes), independent of the image resolution.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct Point {
    #[validate(range(min = 0.0, max = 100.0))]
    pub x: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub y: f64,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SkinValues {
    #[validate(range(min = 0, max = 100))]
    pub smooth: u8,
    #[validate(range(min = 0, max = 100))]
    pub whiten: u8,
    #[validate(range(min = 0, max = 100))]
    pub even: u8,
    #[validate(range(min = 0, max = 100))]
    pub korean: u8,
    #[validate(range(min = 0, max = 100))]
    pub texture: u8,
}

/// Acne removal: automatic detection, manual click points, or both.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AcneMode {
    pub auto: bool,
    #[validate(nested)]
    pub manual_points: Vec<Point>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FaceValues {
    #[validate(range(min = 0, max = 100))]
    pub slim: u8,
    #[validate(range(min = 0, max = 100))]
    pub vline: u8,
    #[validate(range(min = 0, max = 100))]
    pub chin_shrink: u8,
    #[validate(range(min = 0, max = 100))]
    pub forehead: u8,
    #[validate(range(min = 0, max = 100))]
    pub jaw: u8,
    #[validate(range(min = 0, max = 100))]
    pub nose_slim: u8,
    #[validate(range(min = 0, max = 100))]
    pub nose_bridge: u8,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EyeValues {
    #[validate(range(min = 0, max = 100))]
    pub enlarge: u8,
    #[validate(range(min = 0, max = 100))]
    pub brightness: u8,
    #[validate(range(min = 0, max = 100))]
    pub dark_circle: u8,
    #[validate(range(min = 0, max = 100))]
    pub depth: u8,
    #[validate(range(min = 0, max = 100))]
    pub eyelid: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EyeMakeup {
    pub eyeliner: bool,
    /// Lens color name: "none", "blue", "green", "brown", ...
    pub lens: String,
}

impl Default for EyeMakeup {
    fn default() -> Self {
        Self {
            eyeliner: false,
            lens: "none".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MouthValues {
    #[validate(range(min = 0, max = 100))]
    pub smile: u8,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HairValues {
    #[validate(range(min = 0, max = 100))]
    pub smooth: u8,
    #[validate(range(min = 0, max = 100))]
    pub volume: u8,
    #[validate(range(min = 0, max = 100))]
    pub shine: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkinMode {
    #[default]
    Natural,
    Strong,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FaceMode {
    #[default]
    Natural,
}

/// Full configuration tree for one beauty-apply request.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BeautyConfig {
    pub skin_mode: SkinMode,
    pub face_mode: FaceMode,

    #[validate(nested)]
    pub skin_values: SkinValues,
    #[validate(nested)]
    pub acne_mode: AcneMode,
    #[validate(nested)]
    pub face_values: FaceValues,
    #[validate(nested)]
    pub eye_values: EyeValues,
    pub eye_makeup: EyeMakeup,
    #[validate(nested)]
    pub mouth_values: MouthValues,
    /// Lipstick color name: "none", "red", "pink", "coral", ...
    pub lipstick: String,
    #[validate(nested)]
    pub hair_values: HairValues,
    /// Hair color name: "none", "black", "brown", "blonde", ...
    pub hair_color: String,
}

impl Default for BeautyConfig {
    fn default() -> Self {
        Self {
            skin_mode: SkinMode::default(),
            face_mode: FaceMode::default(),
            skin_values: SkinValues::default(),
            acne_mode: AcneMode::default(),
            face_values: FaceValues::default(),
            eye_values: EyeValues::default(),
            eye_makeup: EyeMakeup::default(),
            mouth_values: MouthValues::default(),
            lipstick: "none".to_string(),
            hair_values: HairValues::default(),
            hair_color: "none".to_string(),
        }
    }
}

impl BeautyConfig {
    /// Config for the brighten-skin endpoint: only `skinValues.whiten` is set,
    /// everything else stays at its schema default.
    pub fn whiten_only(whiten: u8) -> Self {
        Self {
            skin_values: SkinValues {
                whiten,
                ..SkinValues::default()
            },
            ..Self::default()
        }
    }
}

/// One face-mesh landmark in absolute pixel coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

/// Face detection result: bounding box `[x, y, width, height]` in pixels, a
/// confidence in [0, 1] and the dense landmark set (468 points for the
/// standard face mesh topology).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FaceMeta {
    pub bbox: [i64; 4],
    pub confidence: f64,
    pub landmarks: Vec<LandmarkPoint>,
}

/// Response for `POST /api/beauty/analyze`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnalysisResponse {
    pub face_meta: Option<FaceMeta>,
}

/// Response for `POST /api/beauty/apply` and `POST /api/beauty/brighten-skin`:
/// the processed image as a base64 data URL plus the detection metadata.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BeautyResponse {
    pub image: String,
    pub face_meta: Option<FaceMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_all_defaults() {
        let config: BeautyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BeautyConfig::default());
        assert_eq!(config.skin_mode, SkinMode::Natural);
        assert_eq!(config.lipstick, "none");
        assert_eq!(config.hair_color, "none");
        assert_eq!(config.eye_makeup.lens, "none");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{
            "skinMode": "strong",
            "skinValues": {"whiten": 40},
            "acneMode": {"auto": true, "manualPoints": [{"x": 10.0, "y": 20.0}]},
            "faceValues": {"chinShrink": 5, "noseSlim": 7},
            "eyeValues": {"darkCircle": 12},
            "hairColor": "brown"
        }"#;
        let config: BeautyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.skin_mode, SkinMode::Strong);
        assert_eq!(config.skin_values.whiten, 40);
        assert!(config.acne_mode.auto);
        assert_eq!(config.acne_mode.manual_points.len(), 1);
        assert_eq!(config.face_values.chin_shrink, 5);
        assert_eq!(config.face_values.nose_slim, 7);
        assert_eq!(config.eye_values.dark_circle, 12);
        assert_eq!(config.hair_color, "brown");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_slider_above_100_fails_validation() {
        let config: BeautyConfig =
            serde_json::from_str(r#"{"skinValues": {"smooth": 101}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_point_coordinate_out_of_range_fails_validation() {
        let config: BeautyConfig =
            serde_json::from_str(r#"{"acneMode": {"manualPoints": [{"x": 100.5, "y": 0.0}]}}"#)
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nested_slider_out_of_range_fails_validation() {
        for json in [
            r#"{"faceValues": {"jaw": 200}}"#,
            r#"{"eyeValues": {"enlarge": 101}}"#,
            r#"{"mouthValues": {"smile": 101}}"#,
            r#"{"hairValues": {"shine": 101}}"#,
        ] {
            let config: BeautyConfig = serde_json::from_str(json).unwrap();
            assert!(config.validate().is_err(), "expected rejection for {json}");
        }
    }

    #[test]
    fn test_unknown_skin_mode_is_a_type_error() {
        let result = serde_json::from_str::<BeautyConfig>(r#"{"skinMode": "extreme"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_whiten_only_config() {
        let config = BeautyConfig::whiten_only(50);
        assert_eq!(config.skin_values.whiten, 50);

        // Everything except the whiten slider is at its schema default.
        let mut reference = BeautyConfig::default();
        reference.skin_values.whiten = 50;
        assert_eq!(config, reference);
    }

    #[test]
    fn test_face_meta_serializes_bbox_as_array() {
        let meta = FaceMeta {
            bbox: [10, 20, 300, 400],
            confidence: 0.92,
            landmarks: vec![LandmarkPoint { x: 1.0, y: 2.0 }],
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["bbox"], serde_json::json!([10, 20, 300, 400]));
        assert_eq!(value["landmarks"][0]["x"], 1.0);
    }

    #[test]
    fn test_response_envelope_wire_names() {
        let response = BeautyResponse {
            image: "data:image/png;base64,AAAA".to_string(),
            face_meta: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("faceMeta").is_some());
        assert!(value.get("face_meta").is_none());
    }
}
