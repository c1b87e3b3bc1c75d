use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five scored dimensions of founder readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    EntrepreneurialMindset,
    ProfessionalCompetence,
    MarketUnderstanding,
    FinancialPlanning,
    LaunchReadiness,
}

impl Dimension {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::EntrepreneurialMindset,
            Self::ProfessionalCompetence,
            Self::MarketUnderstanding,
            Self::FinancialPlanning,
            Self::LaunchReadiness,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EntrepreneurialMindset => "Entrepreneurial Mindset",
            Self::ProfessionalCompetence => "Professional Competence",
            Self::MarketUnderstanding => "Market Understanding",
            Self::FinancialPlanning => "Financial Planning",
            Self::LaunchReadiness => "Launch Readiness",
        }
    }

    /// Reading of a banded score, phrased for the respondent-facing report.
    pub const fn interpretation(self, band: Band) -> &'static str {
        match (self, band) {
            (Self::EntrepreneurialMindset, Band::Excellent | Band::Strong) => {
                "You show pronounced entrepreneurial traits such as risk tolerance and initiative."
            }
            (Self::EntrepreneurialMindset, Band::Moderate) => {
                "Your entrepreneurial traits are well developed but can be strengthened further."
            }
            (Self::EntrepreneurialMindset, Band::Low) => {
                "Working on core entrepreneurial habits is recommended before you commit."
            }
            (Self::ProfessionalCompetence, Band::Excellent | Band::Strong) => {
                "You bring strong professional qualifications to your venture."
            }
            (Self::ProfessionalCompetence, Band::Moderate) => {
                "Your professional competence is solid; targeted training could help."
            }
            (Self::ProfessionalCompetence, Band::Low) => {
                "Professional training is recommended to improve your chances of success."
            }
            (Self::MarketUnderstanding, Band::Excellent | Band::Strong) => {
                "You have a clear picture of your target market and customers."
            }
            (Self::MarketUnderstanding, Band::Moderate) => {
                "Your market understanding is present; deeper market research would pay off."
            }
            (Self::MarketUnderstanding, Band::Low) => {
                "A much closer look at your market is essential for success."
            }
            (Self::FinancialPlanning, Band::Excellent | Band::Strong) => {
                "Your financial planning is thorough and realistic."
            }
            (Self::FinancialPlanning, Band::Moderate) => {
                "Basic financial planning is in place; the details need refinement."
            }
            (Self::FinancialPlanning, Band::Low) => {
                "Professional support with financial planning is strongly recommended."
            }
            (Self::LaunchReadiness, Band::Excellent | Band::Strong) => {
                "You are well prepared and can begin execution."
            }
            (Self::LaunchReadiness, Band::Moderate) => {
                "Some preparation remains before you can launch."
            }
            (Self::LaunchReadiness, Band::Low) => {
                "Substantial groundwork is still required for a successful launch."
            }
        }
    }
}

/// Qualitative tier assigned by thresholding a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Moderate,
    Strong,
    Excellent,
}

impl Band {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::Excellent => "Excellent",
        }
    }
}

/// Ordinal identifier of a catalog question (1-15).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct QuestionId(pub u8);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier handed to respondents when a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submitted answer value, matched against a question's answer scale.
///
/// Likert questions carry numeric values, multiple-choice and yes/no
/// questions carry the option key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scale(u8),
    Choice(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Scale(value) => write!(f, "{value}"),
            AnswerValue::Choice(value) => f.write_str(value),
        }
    }
}

/// One answer as delivered by the client, also the unit of batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
    Expired,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One respondent's run through the questionnaire.
///
/// Owned exclusively by the session store; everything handed out is a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub answers: BTreeMap<QuestionId, AnswerValue>,
}

impl Session {
    pub fn new(session_id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            session_id,
            created_at: now,
            last_activity: now,
            completed_at: None,
            status: SessionStatus::InProgress,
            answers: BTreeMap::new(),
        }
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn progress_percent(&self, total_questions: usize) -> u8 {
        if total_questions == 0 {
            return 100;
        }
        ((self.answers.len() * 100) / total_questions) as u8
    }

    /// Full answer set of a completed session.
    pub fn completed_answers(
        &self,
        expected: usize,
    ) -> Result<&BTreeMap<QuestionId, AnswerValue>, SessionNotComplete> {
        if self.status != SessionStatus::Completed {
            return Err(SessionNotComplete {
                session_id: self.session_id.clone(),
                answered: self.answers.len(),
                expected,
            });
        }
        Ok(&self.answers)
    }
}

/// Rejection of an individual answer submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswerRejection {
    #[error("question {question_id} does not accept answer '{value}' (session {session_id})")]
    ValueOutOfScale {
        session_id: SessionId,
        question_id: QuestionId,
        value: AnswerValue,
    },
    #[error("session {session_id} is {status} and no longer accepts answers")]
    SessionClosed {
        session_id: SessionId,
        status: SessionStatus,
    },
}

/// Raised when a result is requested before all questions are answered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("session {session_id} has answered {answered} of {expected} questions")]
pub struct SessionNotComplete {
    pub session_id: SessionId,
    pub answered: usize,
    pub expected: usize,
}
