use crate::survey::{Survey, SurveyResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCount {
    pub answer: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct QuestionDistribution {
    pub question_id: i64,
    pub question_title: String,
    pub answers: Vec<AnswerCount>,
}

impl QuestionDistribution {
    /// Returns the answer buckets re-sorted descending by count.
    /// Equal counts fall back to alphabetical order so repeated runs
    /// produce the same report.
    pub fn sorted_by_count(&self) -> Vec<AnswerCount> {
        let mut sorted = self.answers.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count).then(a.answer.cmp(&b.answer)));
        sorted
    }
}

#[derive(Debug, Clone)]
pub struct SurveyStatistics {
    pub total_responses: i64,
    pub average_completion_time: f64,
    pub completion_rate: f64,
    pub question_distributions: Vec<QuestionDistribution>,
}

impl SurveyStatistics {
    /// Computes descriptive statistics for one survey over a snapshot of its
    /// responses. Pure and allocation-local: every call starts from scratch.
    pub fn from_responses(survey: &Survey, responses: &[SurveyResponse]) -> Self {
        let total_responses = responses.len() as i64;

        // Responses without a reported completion time are excluded from the
        // mean, not treated as zero
        let completion_times: Vec<f64> = responses
            .iter()
            .filter_map(|r| r.completion_time_seconds)
            .collect();
        let average_completion_time = if completion_times.is_empty() {
            0.0
        } else {
            completion_times.iter().sum::<f64>() / completion_times.len() as f64
        };

        let answered = responses.iter().filter(|r| !r.answers.is_empty()).count() as i64;
        let completion_rate = if total_responses > 0 {
            (answered as f64 / total_responses as f64) * 100.0
        } else {
            0.0
        };

        let question_distributions = survey
            .questions
            .iter()
            .map(|question| {
                distribution_for_question(question.id, &question.title, responses, total_responses)
            })
            .collect();

        SurveyStatistics {
            total_responses,
            average_completion_time,
            completion_rate,
            question_distributions,
        }
    }
}

/// Tallies answer occurrences for one question across all responses.
/// Buckets appear in first-occurrence order; unanswered questions simply
/// contribute no bucket. Each response contributes at most one answer per
/// question (only the first is tallied), so bucket counts never exceed the
/// response total and percentages stay capped at 100.
fn distribution_for_question(
    question_id: i64,
    question_title: &str,
    responses: &[SurveyResponse],
    total_responses: i64,
) -> QuestionDistribution {
    let mut counts: Vec<(String, i64)> = Vec::new();

    for response in responses {
        if let Some(answer) = response.answers.iter().find(|a| a.question_id == question_id) {
            let value = answer.joined_value();
            match counts.iter_mut().find(|(existing, _)| *existing == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value, 1)),
            }
        }
    }

    let answers = counts
        .into_iter()
        .map(|(answer, count)| {
            let percentage = if total_responses > 0 {
                (count as f64 / total_responses as f64) * 100.0
            } else {
                0.0
            };
            AnswerCount {
                answer,
                count,
                percentage,
            }
        })
        .collect();

    QuestionDistribution {
        question_id,
        question_title: question_title.to_string(),
        answers,
    }
}
