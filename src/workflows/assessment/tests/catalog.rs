use super::common::*;

use crate::workflows::assessment::catalog::CatalogError;
use crate::workflows::assessment::domain::{AnswerValue, Dimension, QuestionId};

#[test]
fn ids_are_ordinal_and_ordered() {
    let catalog = catalog();
    assert_eq!(catalog.total_questions(), 15);
    for (index, question) in catalog.all().iter().enumerate() {
        assert_eq!(question.id, QuestionId(index as u8 + 1));
    }
}

#[test]
fn every_dimension_has_three_questions() {
    let catalog = catalog();
    for dimension in Dimension::ordered() {
        let count = catalog
            .all()
            .iter()
            .filter(|question| question.dimension == dimension)
            .count();
        assert_eq!(count, 3, "{} should have 3 questions", dimension.label());
    }
}

#[test]
fn every_question_tops_out_at_five_points() {
    let catalog = catalog();
    for question in catalog.all() {
        assert_eq!(question.max_points(), 5, "question {}", question.id);
        assert!(!question.options.is_empty());
    }
    for dimension in Dimension::ordered() {
        assert_eq!(catalog.max_points(dimension), 15);
    }
}

#[test]
fn unknown_question_id_is_rejected() {
    let catalog = catalog();
    for id in [0, 16, 200] {
        let error = catalog
            .question(QuestionId(id))
            .expect_err("id outside 1-15 rejected");
        assert_eq!(error, CatalogError::QuestionNotFound { id: QuestionId(id) });
    }
}

#[test]
fn likert_points_match_the_scale_value() {
    let catalog = catalog();
    let question = catalog.question(QuestionId(1)).expect("likert question");
    for value in 1..=5u8 {
        assert_eq!(question.points_for(&AnswerValue::Scale(value)), Some(value));
    }
    assert_eq!(question.points_for(&AnswerValue::Scale(6)), None);
    assert_eq!(
        question.points_for(&AnswerValue::Choice("yes".to_string())),
        None
    );
}

#[test]
fn keyed_questions_score_by_option() {
    let catalog = catalog();
    let question = catalog.question(QuestionId(5)).expect("yes/no question");
    assert_eq!(
        question.points_for(&AnswerValue::Choice("yes".to_string())),
        Some(5)
    );
    assert_eq!(
        question.points_for(&AnswerValue::Choice("no".to_string())),
        Some(1)
    );
    assert_eq!(
        question.points_for(&AnswerValue::Choice("maybe".to_string())),
        None
    );
}
