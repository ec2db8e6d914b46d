use serde::{Deserialize, Serialize};

use crate::model::{DrawParams, ModelVariant};

/// One call into the model, in a shape that can cross a JSON boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProbabilityQuery {
    pub model: ModelVariant,
    pub targets: i64,
    pub mulligans: i64,
    pub later_draws: i64,
}

impl ProbabilityQuery {
    pub const fn new(model: ModelVariant, targets: i64, mulligans: i64, later_draws: i64) -> Self {
        Self {
            model,
            targets,
            mulligans,
            later_draws,
        }
    }

    /// The same query with counts clamped to the variant's domain.
    pub fn clamped(self) -> Self {
        let params = DrawParams::clamped(self.model, self.targets, self.mulligans, self.later_draws);
        Self {
            model: self.model,
            targets: params.targets,
            mulligans: params.mulligans,
            later_draws: params.later_draws,
        }
    }

    pub fn evaluate(self) -> ProbabilityAnswer {
        let query = self.clamped();
        ProbabilityAnswer {
            query,
            probability: query
                .model
                .probability(query.targets, query.mulligans, query.later_draws),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityAnswer {
    pub query: ProbabilityQuery,
    pub probability: f64,
}

impl ProbabilityAnswer {
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeepMode;

    #[test]
    fn evaluate_reports_clamped_query() {
        let answer = ProbabilityQuery::new(ModelVariant::MissedOpening, 3, 7, 50).evaluate();
        assert_eq!(answer.query.mulligans, 4);
        assert_eq!(answer.query.later_draws, 40);
        assert!((0.0..=1.0).contains(&answer.probability));
    }

    #[test]
    fn percent_scales_probability() {
        let answer = ProbabilityQuery::new(ModelVariant::General(KeepMode::Keep), 3, 0, 0).evaluate();
        assert!((answer.percent() - 27.732_793_522_267_2).abs() < 1e-9);
    }

    #[test]
    fn parses_query_and_ignores_unknown_fields() {
        let json = r#"{
            "model": { "variant": "general", "policy": "no_keep" },
            "targets": 3,
            "mulligans": 2,
            "later_draws": 5,
            "chart_color": "teal"
        }"#;
        let query = ProbabilityQuery::from_json(json).unwrap();
        assert_eq!(query.model, ModelVariant::General(KeepMode::NoKeep));
        assert_eq!(query.mulligans, 2);
    }

    #[test]
    fn answer_serializes_to_json() {
        let answer = ProbabilityQuery::new(ModelVariant::MissedOpening, 0, 1, 1).evaluate();
        let json = answer.to_json().unwrap();
        assert!(json.contains("\"variant\": \"missed_opening\""));
        assert!(json.contains("\"probability\": 0.0"));
    }
}
