use serde::Serialize;

use super::domain::{Band, Dimension};
use super::scoring::ScoreReport;

/// A templated suggestion surfaced because one or more dimensions scored
/// below the trigger threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub text: String,
    pub triggering_dimensions: Vec<Dimension>,
    pub priority: usize,
}

struct RecommendationRule {
    conditions: &'static [Dimension],
    template: &'static str,
}

/// Fixed rule table, evaluated in declaration order. A rule fires when every
/// one of its condition dimensions scores below the trigger threshold.
const RULE_TABLE: &[RecommendationRule] = &[
    RecommendationRule {
        conditions: &[Dimension::FinancialPlanning],
        template: "Build a detailed three-year financial plan with realistic assumptions.",
    },
    RecommendationRule {
        conditions: &[Dimension::MarketUnderstanding],
        template: "Run a thorough market and competitor analysis.",
    },
    RecommendationRule {
        conditions: &[Dimension::ProfessionalCompetence],
        template: "Document your professional qualifications and industry experience in detail.",
    },
    RecommendationRule {
        conditions: &[Dimension::LaunchReadiness],
        template: "Develop a concrete timeline for your first six months.",
    },
    RecommendationRule {
        conditions: &[Dimension::EntrepreneurialMindset],
        template: "Strengthen your entrepreneurial toolkit through founder training or mentoring.",
    },
    RecommendationRule {
        conditions: &[Dimension::MarketUnderstanding, Dimension::FinancialPlanning],
        template: "Validate your business model end to end, from customer demand to cost \
                   structure, before committing capital.",
    },
];

const AFFIRMATION: &str =
    "Your preparation is excellent. Focus on the formal grant application next.";

/// Deterministic mapping from a scored profile to an ordered, never-empty
/// recommendation list.
pub struct RecommendationEngine {
    trigger: f64,
}

impl RecommendationEngine {
    pub fn new(trigger: f64) -> Self {
        Self { trigger }
    }

    /// Matching rules ranked by ascending score of their weakest triggering
    /// dimension, ties broken by table order. Falls back to a single
    /// affirming entry when nothing fires.
    pub fn generate(&self, report: &ScoreReport) -> Vec<Recommendation> {
        let mut matched: Vec<(f64, usize, &RecommendationRule)> = Vec::new();

        for (index, rule) in RULE_TABLE.iter().enumerate() {
            let fires = rule.conditions.iter().all(|dimension| {
                report
                    .dimension_scores
                    .get(dimension)
                    .is_some_and(|score| *score < self.trigger)
            });
            if fires {
                let weakest = rule
                    .conditions
                    .iter()
                    .filter_map(|dimension| report.dimension_scores.get(dimension))
                    .fold(f64::INFINITY, |weakest, score| weakest.min(*score));
                matched.push((weakest, index, rule));
            }
        }

        if matched.is_empty() {
            return vec![Recommendation {
                text: AFFIRMATION.to_string(),
                triggering_dimensions: Dimension::ordered().to_vec(),
                priority: 1,
            }];
        }

        matched.sort_by(|left, right| left.0.total_cmp(&right.0).then(left.1.cmp(&right.1)));

        matched
            .into_iter()
            .enumerate()
            .map(|(rank, (_, _, rule))| Recommendation {
                text: rule.template.to_string(),
                triggering_dimensions: rule.conditions.to_vec(),
                priority: rank + 1,
            })
            .collect()
    }

    /// Actionable follow-ups for the composite band, appended to the result
    /// payload alongside the recommendations.
    pub fn next_steps(&self, band: Band) -> Vec<String> {
        let steps: &[&str] = match band {
            Band::Excellent => &[
                "Schedule an appointment with your local employment agency",
                "Finalize and format your business plan",
                "Obtain an expert body's statement on your plan",
                "Compile all required application documents",
                "Submit the grant application",
            ],
            Band::Strong => &[
                "Identify and fix the weak spots in your concept",
                "Have your business plan reviewed by an expert",
                "Close any missing qualifications",
                "Walk through the financial plan with an advisor",
                "Then submit the application to the employment agency",
            ],
            Band::Moderate | Band::Low => &[
                "Take advantage of a startup advisory service",
                "Attend a business plan workshop or course",
                "Sharpen and validate your business idea",
                "Build up the professional skills you are missing",
                "Repeat the assessment once you have prepared",
            ],
        };
        steps.iter().map(|step| (*step).to_string()).collect()
    }
}
