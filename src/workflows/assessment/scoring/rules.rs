use std::collections::BTreeMap;

use super::super::catalog::QuestionCatalog;
use super::super::domain::{AnswerValue, Dimension, QuestionId};
use super::ScoringError;

pub(crate) struct DimensionTally {
    pub dimension: Dimension,
    pub raw_points: u32,
    pub max_points: u32,
}

/// Accumulate per-dimension point sums for a complete answer set.
///
/// Re-validates everything against the catalog: the store should already have
/// enforced these invariants, but the engine does not trust upstream state.
pub(crate) fn tally_dimensions(
    catalog: &QuestionCatalog,
    answers: &BTreeMap<QuestionId, AnswerValue>,
) -> Result<Vec<DimensionTally>, ScoringError> {
    let expected = catalog.total_questions();
    if answers.len() != expected {
        return Err(ScoringError::IncompleteAnswers {
            expected,
            found: answers.len(),
        });
    }

    for id in answers.keys() {
        if catalog.question(*id).is_err() {
            return Err(ScoringError::UnknownQuestion { id: *id });
        }
    }

    let mut raw: BTreeMap<Dimension, u32> = BTreeMap::new();
    for question in catalog.all() {
        let value = answers
            .get(&question.id)
            .ok_or(ScoringError::IncompleteAnswers {
                expected,
                found: answers.len(),
            })?;
        let points = question
            .points_for(value)
            .ok_or_else(|| ScoringError::ValueOutOfScale {
                id: question.id,
                value: value.clone(),
            })?;
        *raw.entry(question.dimension).or_default() += points as u32;
    }

    Ok(Dimension::ordered()
        .into_iter()
        .map(|dimension| DimensionTally {
            dimension,
            raw_points: raw.get(&dimension).copied().unwrap_or(0),
            max_points: catalog.max_points(dimension),
        })
        .collect())
}
