//! Vendor payload interpretation
//!
//! Maps a raw analysis payload onto the service's normalized detection
//! result. The vendor enforces no invariants on its side, so every
//! field is treated as absent-or-present and sparse payloads fall back
//! to a neutral default instead of erroring.

use serde::Serialize;
use serde_json::Value;

/// Score above which content is reported as AI-generated
pub const AI_SCORE_THRESHOLD: f64 = 0.7;

/// Confidence reported when no model produced a usable score
pub const UNKNOWN_CONFIDENCE: f64 = 50.0;

/// Ordered fallback sources for the AI-generation score
///
/// The first path holding a numeric value decides both the verdict and
/// the confidence; later entries are consulted only when earlier ones
/// are absent or non-numeric. Adding a fallback model is one line here.
const SCORE_SOURCES: &[&[&str]] = &[
    &["type", "ai_generated"],
    &["genai", "ai_generated"],
    &["wad", "artificial"],
];

/// Normalized analysis result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Whether the winning model score exceeded the AI threshold
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    /// 0-100 scale, linearly derived from the winning model score
    pub confidence: f64,
    /// Per-category detail passed through from the vendor payload
    pub details: DetectionDetails,
    /// Always "success"; failures never produce a Detection
    pub status: String,
}

/// Per-category detail passed through from the vendor payload
///
/// Absent categories are omitted from the serialized result, never
/// emitted as null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionDetails {
    /// Raw `type.ai_generated` score, when the vendor reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nudity: Option<NudityDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drugs: Option<Value>,
}

/// Nudity scores, reduced to the three headline fields
#[derive(Debug, Clone, Serialize)]
pub struct NudityDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe: Option<f64>,
}

/// Interpret a vendor payload into a normalized detection result
///
/// Deterministic, no I/O. Scores outside [0, 1] are scaled without
/// clamping.
pub fn interpret(payload: &Value) -> Detection {
    let (is_ai_generated, confidence) = match ai_score(payload) {
        Some(score) => (score > AI_SCORE_THRESHOLD, score * 100.0),
        None => (false, UNKNOWN_CONFIDENCE),
    };

    Detection {
        is_ai_generated,
        confidence,
        details: extract_details(payload),
        status: "success".to_string(),
    }
}

/// First numeric score along the fallback chain, if any
fn ai_score(payload: &Value) -> Option<f64> {
    SCORE_SOURCES
        .iter()
        .find_map(|path| number_at(payload, path))
}

/// Numeric value at a nested field path
///
/// Non-numeric values (including numeric-looking strings) do not count
/// as present.
fn number_at(payload: &Value, path: &[&str]) -> Option<f64> {
    let mut node = payload;
    for key in path {
        node = node.get(key)?;
    }
    node.as_f64()
}

/// Copy optional per-category data out of the payload
///
/// Runs independently of the score chain: a payload can carry nudity
/// detail without any AI score and vice versa.
fn extract_details(payload: &Value) -> DetectionDetails {
    DetectionDetails {
        ai_generated: number_at(payload, &["type", "ai_generated"]),
        nudity: payload.get("nudity").map(|nudity| NudityDetail {
            raw: nudity.get("raw").and_then(Value::as_f64),
            partial: nudity.get("partial").and_then(Value::as_f64),
            safe: nudity.get("safe").and_then(Value::as_f64),
        }),
        offensive: payload.get("offensive").cloned(),
        weapon: payload.get("weapon").cloned(),
        alcohol: payload.get("alcohol").cloned(),
        drugs: payload.get("drugs").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_score_decides_verdict_and_confidence() {
        let payload = json!({ "status": "success", "type": { "ai_generated": 0.85 } });
        let detection = interpret(&payload);
        assert!(detection.is_ai_generated);
        assert_eq!(detection.confidence, 85.0);
        assert_eq!(detection.details.ai_generated, Some(0.85));
    }

    #[test]
    fn genai_score_used_when_type_absent() {
        let payload = json!({ "status": "success", "genai": { "ai_generated": 0.9 } });
        let detection = interpret(&payload);
        assert!(detection.is_ai_generated);
        assert_eq!(detection.confidence, 90.0);
        // details only carry the type-model score
        assert_eq!(detection.details.ai_generated, None);
    }

    #[test]
    fn wad_score_used_when_type_and_genai_absent() {
        let payload = json!({ "status": "success", "wad": { "artificial": 0.4 } });
        let detection = interpret(&payload);
        assert!(!detection.is_ai_generated);
        assert_eq!(detection.confidence, 40.0);
    }

    #[test]
    fn type_shadows_later_sources() {
        let payload = json!({
            "status": "success",
            "type": { "ai_generated": 0.2 },
            "genai": { "ai_generated": 0.99 },
            "wad": { "artificial": 0.99 }
        });
        let detection = interpret(&payload);
        assert!(!detection.is_ai_generated);
        assert_eq!(detection.confidence, 20.0);
    }

    #[test]
    fn sparse_payload_yields_unknown_default() {
        let detection = interpret(&json!({ "status": "success" }));
        assert!(!detection.is_ai_generated);
        assert_eq!(detection.confidence, UNKNOWN_CONFIDENCE);
    }

    #[test]
    fn threshold_is_exclusive() {
        let payload = json!({ "status": "success", "type": { "ai_generated": 0.7 } });
        assert!(!interpret(&payload).is_ai_generated);

        let payload = json!({ "status": "success", "type": { "ai_generated": 0.71 } });
        assert!(interpret(&payload).is_ai_generated);
    }

    #[test]
    fn out_of_range_score_is_not_clamped() {
        let payload = json!({ "status": "success", "type": { "ai_generated": 1.5 } });
        let detection = interpret(&payload);
        assert!(detection.is_ai_generated);
        assert_eq!(detection.confidence, 150.0);
    }

    #[test]
    fn numeric_string_does_not_count_as_numeric() {
        let payload = json!({
            "status": "success",
            "type": { "ai_generated": "0.9" },
            "wad": { "artificial": 0.2 }
        });
        let detection = interpret(&payload);
        assert!(!detection.is_ai_generated);
        assert_eq!(detection.confidence, 20.0);
    }

    #[test]
    fn nudity_detail_reduced_to_headline_fields() {
        let payload = json!({
            "status": "success",
            "nudity": { "raw": 0.01, "partial": 0.02, "safe": 0.97, "sexual_activity": 0.001 }
        });
        let details = interpret(&payload).details;
        let nudity = details.nudity.expect("nudity present in payload");
        assert_eq!(nudity.raw, Some(0.01));
        assert_eq!(nudity.partial, Some(0.02));
        assert_eq!(nudity.safe, Some(0.97));
        let serialized = serde_json::to_value(&nudity).unwrap();
        assert_eq!(
            serialized,
            json!({ "raw": 0.01, "partial": 0.02, "safe": 0.97 })
        );
    }

    #[test]
    fn absent_categories_are_omitted_not_null() {
        let detection = interpret(&json!({ "status": "success", "wad": { "artificial": 0.4 } }));
        let serialized = serde_json::to_value(&detection).unwrap();
        assert_eq!(
            serialized,
            json!({
                "isAIGenerated": false,
                "confidence": 40.0,
                "details": {},
                "status": "success"
            })
        );
    }

    #[test]
    fn full_result_shape_for_type_score() {
        let payload = json!({ "status": "success", "type": { "ai_generated": 0.85 } });
        let serialized = serde_json::to_value(interpret(&payload)).unwrap();
        assert_eq!(
            serialized,
            json!({
                "isAIGenerated": true,
                "confidence": 85.0,
                "details": { "aiGenerated": 0.85 },
                "status": "success"
            })
        );
    }

    #[test]
    fn passthrough_categories_are_copied_verbatim() {
        let payload = json!({
            "status": "success",
            "offensive": { "prob": 0.03 },
            "weapon": 0.01,
            "alcohol": 0.02,
            "drugs": 0.05
        });
        let details = interpret(&payload).details;
        assert_eq!(details.offensive, Some(json!({ "prob": 0.03 })));
        assert_eq!(details.weapon, Some(json!(0.01)));
        assert_eq!(details.alcohol, Some(json!(0.02)));
        assert_eq!(details.drugs, Some(json!(0.05)));
    }
}
