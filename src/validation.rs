use crate::survey::{Question, QuestionResponse, QuestionType, Survey};

/// Sets the `is_valid` flag on a single answer according to its question's
/// type and option set. Invalid answers are never rejected; they are kept
/// with the flag cleared for later reporting.
pub fn validate_answer(question: &Question, answer: &mut QuestionResponse) {
    answer.is_valid = match question.question_type {
        QuestionType::Text => !answer.is_blank(),
        QuestionType::Rating | QuestionType::Nps => {
            !answer.is_blank() && answer.values.iter().all(|v| v.trim().parse::<i32>().is_ok())
        }
        QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Dropdown => {
            !answer.is_blank() && answer.values.iter().all(|v| question.options.contains(v))
        }
        // Permissive fallback for question types without validation rules
        QuestionType::Other => true,
    };
}

/// Validates every answer of a response against the owning survey.
/// An answer referencing a question the survey does not contain is marked
/// invalid, but the response as a whole is kept.
pub fn validate_response(survey: &Survey, response_answers: &mut [QuestionResponse]) {
    for answer in response_answers.iter_mut() {
        match survey.question(answer.question_id) {
            Some(question) => validate_answer(question, answer),
            None => answer.is_valid = false,
        }
    }
}
