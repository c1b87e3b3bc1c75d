use serde::{Deserialize, Serialize};

use super::domain::{AnswerValue, Dimension, QuestionId};

/// Presentation style of a question, mirrored to clients so they can render
/// the right control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Likert,
    MultipleChoice,
    YesNo,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Likert => "likert",
            Self::MultipleChoice => "multiple_choice",
            Self::YesNo => "yes_no",
        }
    }
}

/// One permissible answer together with its score contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    pub value: AnswerValue,
    pub label: &'static str,
    pub points: u8,
}

/// Immutable definition of a single questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub code: &'static str,
    pub dimension: Dimension,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Score contribution of a submitted value, `None` when the value is not
    /// part of this question's scale.
    pub fn points_for(&self, value: &AnswerValue) -> Option<u8> {
        self.options
            .iter()
            .find(|option| option.value == *value)
            .map(|option| option.points)
    }

    pub fn accepts(&self, value: &AnswerValue) -> bool {
        self.points_for(value).is_some()
    }

    pub fn max_points(&self) -> u8 {
        self.options
            .iter()
            .map(|option| option.points)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("question {id} is not part of the catalog")]
    QuestionNotFound { id: QuestionId },
}

/// The fixed, ordered question bank. Built once at process start and shared
/// read-only from then on.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    pub fn question(&self, id: QuestionId) -> Result<&Question, CatalogError> {
        self.questions
            .iter()
            .find(|question| question.id == id)
            .ok_or(CatalogError::QuestionNotFound { id })
    }

    /// All questions in delivery order (ids 1-15).
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn dimensions(&self) -> [Dimension; 5] {
        Dimension::ordered()
    }

    /// Maximum attainable point sum for a dimension, the normalization base
    /// for its 0-100 score.
    pub fn max_points(&self, dimension: Dimension) -> u32 {
        self.questions
            .iter()
            .filter(|question| question.dimension == dimension)
            .map(|question| question.max_points() as u32)
            .sum()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn likert(id: u8, code: &'static str, dimension: Dimension, prompt: &'static str) -> Question {
    let labels = [
        "Strongly disagree",
        "Somewhat disagree",
        "Neutral",
        "Somewhat agree",
        "Strongly agree",
    ];
    Question {
        id: QuestionId(id),
        code,
        dimension,
        kind: QuestionKind::Likert,
        prompt,
        options: labels
            .into_iter()
            .zip(1u8..)
            .map(|(label, value)| AnswerOption {
                value: AnswerValue::Scale(value),
                label,
                points: value,
            })
            .collect(),
    }
}

fn keyed(
    id: u8,
    code: &'static str,
    dimension: Dimension,
    kind: QuestionKind,
    prompt: &'static str,
    options: &[(&'static str, &'static str, u8)],
) -> Question {
    Question {
        id: QuestionId(id),
        code,
        dimension,
        kind,
        prompt,
        options: options
            .iter()
            .map(|(value, label, points)| AnswerOption {
                value: AnswerValue::Choice((*value).to_string()),
                label,
                points: *points,
            })
            .collect(),
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        likert(
            1,
            "ENT-001",
            Dimension::EntrepreneurialMindset,
            "I am willing to take calculated risks to reach my business goals.",
        ),
        likert(
            2,
            "ENT-002",
            Dimension::EntrepreneurialMindset,
            "I proactively take the initiative rather than waiting to be told what to do.",
        ),
        likert(
            3,
            "ENT-003",
            Dimension::EntrepreneurialMindset,
            "I handle uncertainty well and stay motivated through setbacks.",
        ),
        keyed(
            4,
            "COMP-001",
            Dimension::ProfessionalCompetence,
            QuestionKind::MultipleChoice,
            "How much professional experience do you have in the industry of your planned venture?",
            &[
                ("no_experience", "No experience", 1),
                ("less_1_year", "Less than a year", 2),
                ("1_3_years", "1-3 years", 3),
                ("3_5_years", "3-5 years", 4),
                ("more_5_years", "More than 5 years", 5),
            ],
        ),
        keyed(
            5,
            "COMP-002",
            Dimension::ProfessionalCompetence,
            QuestionKind::YesNo,
            "Do you hold a formal qualification or training relevant to your venture?",
            &[("yes", "Yes", 5), ("no", "No", 1)],
        ),
        likert(
            6,
            "COMP-003",
            Dimension::ProfessionalCompetence,
            "I have all the professional skills needed to run my business successfully.",
        ),
        keyed(
            7,
            "MARKET-001",
            Dimension::MarketUnderstanding,
            QuestionKind::YesNo,
            "Have you completed a detailed target-group analysis and know exactly who your customers will be?",
            &[
                ("yes", "Yes, in detail", 5),
                ("partial", "Partially", 3),
                ("no", "Not yet", 1),
            ],
        ),
        keyed(
            8,
            "MARKET-002",
            Dimension::MarketUnderstanding,
            QuestionKind::YesNo,
            "Do you know your direct competitors and can you clearly state what sets your offer apart?",
            &[
                ("yes", "Yes, precisely", 5),
                ("partial", "Partially", 3),
                ("no", "No", 1),
            ],
        ),
        likert(
            9,
            "MARKET-003",
            Dimension::MarketUnderstanding,
            "I have already surveyed potential customers or validated interest in my offer.",
        ),
        keyed(
            10,
            "FIN-001",
            Dimension::FinancialPlanning,
            QuestionKind::YesNo,
            "Have you prepared a detailed financial plan covering at least the first three years?",
            &[
                ("yes", "Yes, complete", 5),
                ("partial", "Partially", 3),
                ("no", "No", 1),
            ],
        ),
        keyed(
            11,
            "FIN-002",
            Dimension::FinancialPlanning,
            QuestionKind::MultipleChoice,
            "How much capital do you estimate you need to launch?",
            &[
                ("unclear", "Still unclear", 1),
                ("under_10k", "Under \u{20ac}10,000", 4),
                ("10_30k", "\u{20ac}10,000 - \u{20ac}30,000", 5),
                ("30_50k", "\u{20ac}30,000 - \u{20ac}50,000", 4),
                ("over_50k", "Over \u{20ac}50,000", 3),
            ],
        ),
        likert(
            12,
            "FIN-003",
            Dimension::FinancialPlanning,
            "I have built revenue projections grounded in market data.",
        ),
        keyed(
            13,
            "IMPL-001",
            Dimension::LaunchReadiness,
            QuestionKind::MultipleChoice,
            "What stage is your launch preparation in?",
            &[
                ("idea", "Early idea", 2),
                ("concept", "Concept development", 3),
                ("planning", "Detailed planning", 4),
                ("ready", "Ready to launch", 5),
            ],
        ),
        keyed(
            14,
            "IMPL-002",
            Dimension::LaunchReadiness,
            QuestionKind::YesNo,
            "Have you already taken concrete steps, such as registering the business, building a website, or contacting customers?",
            &[
                ("yes", "Yes, several", 5),
                ("some", "A few", 3),
                ("no", "None yet", 1),
            ],
        ),
        likert(
            15,
            "IMPL-003",
            Dimension::LaunchReadiness,
            "I could start my self-employed venture within the next four weeks.",
        ),
    ]
}
