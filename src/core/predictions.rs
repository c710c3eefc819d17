//! Turning backend risk predictions into renderable cards.

use crate::api::PredictionSet;

pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskCard {
    pub title: String,
    pub level: RiskLevel,
    pub score: f64,
    pub recommendation: String,
}

impl RiskCard {
    pub fn score_line(&self) -> String {
        format!("Risk Score: {}%", self.score)
    }
}

/// Uppercase the first character only; the rest is left untouched.
pub fn capitalize_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn build_cards(predictions: &PredictionSet) -> Vec<RiskCard> {
    predictions
        .iter()
        .map(|(condition, prediction)| RiskCard {
            title: capitalize_first(condition),
            level: RiskLevel::classify(prediction.risk_score),
            score: prediction.risk_score,
            recommendation: prediction.recommendation.clone(),
        })
        .collect()
}

/// The results section of the health panel. Holds at most one prediction set.
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    cards: Vec<RiskCard>,
    reveal_requested: bool,
}

impl ResultsPanel {
    pub fn cards(&self) -> &[RiskCard] {
        &self.cards
    }

    pub fn has_results(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Replace everything shown with the new prediction set and ask the
    /// renderer to bring the results into view.
    pub fn replace(&mut self, predictions: &PredictionSet) {
        self.cards = build_cards(predictions);
        self.reveal_requested = true;
    }

    /// Consumed by the renderer once it has scrolled the results into view.
    pub fn take_reveal_request(&mut self) -> bool {
        std::mem::take(&mut self.reveal_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RiskPrediction;

    fn prediction(score: f64, recommendation: &str) -> RiskPrediction {
        RiskPrediction {
            risk_score: score,
            recommendation: recommendation.to_string(),
        }
    }

    #[test]
    fn thresholds_are_inclusive_at_the_lower_bound() {
        assert_eq!(RiskLevel::classify(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(100.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(69.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(39.9), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Low);
    }

    #[test]
    fn capitalizes_only_the_first_character() {
        assert_eq!(capitalize_first("diabetes"), "Diabetes");
        assert_eq!(capitalize_first("heart DISEASE"), "Heart DISEASE");
        assert_eq!(capitalize_first("éczema"), "Éczema");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn score_line_matches_plain_number_formatting() {
        let cards = build_cards(&PredictionSet(vec![
            ("diabetes".to_string(), prediction(70.0, "Consult")),
            ("hypertension".to_string(), prediction(20.5, "Fine")),
        ]));
        assert_eq!(cards[0].score_line(), "Risk Score: 70%");
        assert_eq!(cards[1].score_line(), "Risk Score: 20.5%");
        assert_eq!(cards[1].level, RiskLevel::Low);
    }

    #[test]
    fn replace_discards_previous_results() {
        let mut panel = ResultsPanel::default();
        panel.replace(&PredictionSet(vec![
            ("diabetes".to_string(), prediction(10.0, "a")),
            ("hypertension".to_string(), prediction(90.0, "b")),
        ]));
        assert_eq!(panel.cards().len(), 2);
        assert!(panel.take_reveal_request());
        assert!(!panel.take_reveal_request());

        panel.replace(&PredictionSet(vec![(
            "asthma".to_string(),
            prediction(50.0, "c"),
        )]));
        assert_eq!(panel.cards().len(), 1);
        assert_eq!(panel.cards()[0].title, "Asthma");
        assert_eq!(panel.cards()[0].level, RiskLevel::Medium);
    }
}
