use serde::Deserialize;

use crate::parsing::blocks::types::{Chart, ChartKind, ChartPoint};

/// Why a chart fence body could not be decoded.
///
/// Never escapes the parser: the segmenter turns it into a plain code block.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("invalid chart JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart has no data points")]
    NoPoints,
}

#[derive(Deserialize)]
struct ChartSpec {
    #[serde(rename = "type")]
    kind: ChartKind,
    #[serde(default)]
    title: Option<String>,
    data: Vec<ChartPoint>,
}

/// Chart JSON decoder for ```` ```chart ```` fences.
pub struct ChartFence;

impl ChartFence {
    /// Decodes `{ "type": "bar"|"line"|"pie", "title"?: string, "data": [{ label, value, color? }] }`.
    pub fn decode(body: &str) -> Result<Chart, ChartError> {
        let spec: ChartSpec = serde_json::from_str(body.trim())?;
        if spec.data.is_empty() {
            return Err(ChartError::NoPoints);
        }
        Ok(Chart {
            kind: spec.kind,
            title: spec.title,
            points: spec.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_bar_chart() {
        let body = r##"{
            "type": "bar",
            "title": "Sales",
            "data": [
                { "label": "Q1", "value": 10 },
                { "label": "Q2", "value": 12.5, "color": "#ff0000" }
            ]
        }"##;
        let chart = ChartFence::decode(body).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title.as_deref(), Some("Sales"));
        assert_eq!(
            chart.points,
            vec![
                ChartPoint {
                    label: "Q1".into(),
                    value: 10.0,
                    color: None,
                },
                ChartPoint {
                    label: "Q2".into(),
                    value: 12.5,
                    color: Some("#ff0000".into()),
                },
            ]
        );
    }

    #[test]
    fn title_is_optional() {
        let chart =
            ChartFence::decode(r#"{"type":"pie","data":[{"label":"a","value":1}]}"#).unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.title, None);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = ChartFence::decode(r#"{"type":"radar","data":[{"label":"a","value":1}]}"#);
        assert!(matches!(err, Err(ChartError::Json(_))));
    }

    #[test]
    fn string_value_is_rejected() {
        let err = ChartFence::decode(r#"{"type":"line","data":[{"label":"a","value":"1"}]}"#);
        assert!(matches!(err, Err(ChartError::Json(_))));
    }

    #[test]
    fn truncated_json_is_rejected() {
        let err = ChartFence::decode(r#"{"type":"line","data":[{"label":"a""#);
        assert!(matches!(err, Err(ChartError::Json(_))));
    }

    #[test]
    fn empty_data_is_rejected() {
        let err = ChartFence::decode(r#"{"type":"bar","data":[]}"#);
        assert!(matches!(err, Err(ChartError::NoPoints)));
    }
}
