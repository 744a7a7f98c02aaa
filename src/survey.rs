use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionType {
    Text,
    Rating,
    Nps,
    SingleChoice,
    MultipleChoice,
    Dropdown,
    Other,
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Rating => "rating",
            QuestionType::Nps => "nps",
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Other => "other",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "text" => Some(QuestionType::Text),
            "rating" => Some(QuestionType::Rating),
            "nps" => Some(QuestionType::Nps),
            "single-choice" => Some(QuestionType::SingleChoice),
            "multiple-choice" => Some(QuestionType::MultipleChoice),
            "dropdown" => Some(QuestionType::Dropdown),
            "other" => Some(QuestionType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub question_type: QuestionType,
    pub required: bool,
    pub options: Vec<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct Survey {
    pub id: i64,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Survey {
    /// Looks up a question by id
    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// One answer within a response, tied to a specific question.
/// Scalar answers carry a single value; multi-choice answers carry several.
#[derive(Debug, Clone)]
pub struct QuestionResponse {
    pub question_id: i64,
    pub values: Vec<String>,
    pub is_valid: bool,
}

impl QuestionResponse {
    pub fn new(question_id: i64, values: Vec<String>) -> Self {
        QuestionResponse {
            question_id,
            values,
            is_valid: true,
        }
    }

    pub fn scalar(question_id: i64, value: &str) -> Self {
        QuestionResponse::new(question_id, vec![value.to_string()])
    }

    /// Renders the answer as a single string; multi-value answers are
    /// joined with ", " so they tally as one distribution bucket
    pub fn joined_value(&self) -> String {
        self.values.join(", ")
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }
}

/// One respondent's full submission against a survey.
/// Created once at submission time and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SurveyResponse {
    pub id: i64,
    pub survey_id: i64,
    pub respondent_name: String,
    pub respondent_email: String,
    pub submitted_at: DateTime<Utc>,
    pub completion_time_seconds: Option<f64>,
    pub existing_client_id: Option<i64>,
    pub answers: Vec<QuestionResponse>,
}
