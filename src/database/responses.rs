use crate::survey::{QuestionResponse, Survey, SurveyResponse};
use crate::validation::validate_response;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// Submission payload; id and submission timestamp are assigned by the
/// repository
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub respondent_name: String,
    pub respondent_email: String,
    pub completion_time_seconds: Option<f64>,
    pub existing_client_id: Option<i64>,
    pub answers: Vec<QuestionResponse>,
}

pub struct ResponsesRepository<'a> {
    conn: &'a Connection,
    get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
}

impl<'a> ResponsesRepository<'a> {
    /// Repository using the system clock; sufficient for all read paths
    pub fn new(conn: &'a Connection) -> Self {
        Self::new_with_date_provider(conn, Box::new(Utc::now))
    }

    /// Repository with an injected clock, used where `submitted_at` gets
    /// stamped
    pub fn new_with_date_provider(
        conn: &'a Connection,
        get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
    ) -> Self {
        ResponsesRepository {
            conn,
            get_current_time,
        }
    }

    /// Persists a submission. Answers are validated against the owning
    /// survey first; invalid answers are stored with is_valid = 0 rather
    /// than rejected. There is no update path: responses are immutable
    /// once inserted.
    pub fn insert(&self, survey: &Survey, response: NewResponse) -> Result<i64> {
        let mut answers = response.answers;
        validate_response(survey, &mut answers);

        let submitted_at = (self.get_current_time)();
        self.conn.execute(
            "INSERT INTO responses (survey_id, respondent_name, respondent_email, submitted_at,
                                    completion_time_seconds, existing_client_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                survey.id,
                response.respondent_name,
                response.respondent_email,
                submitted_at,
                response.completion_time_seconds,
                response.existing_client_id
            ],
        )?;
        let response_id = self.conn.last_insert_rowid();

        for answer in &answers {
            // An answer with no values was never actually given; skip it so
            // it does not count as a recorded answer
            for (value_index, value) in answer.values.iter().enumerate() {
                self.conn.execute(
                    "INSERT INTO answers (response_id, question_id, value, value_index, is_valid)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        response_id,
                        answer.question_id,
                        value,
                        value_index as i64,
                        answer.is_valid as i32
                    ],
                )?;
            }
        }

        Ok(response_id)
    }

    /// Loads all responses for a survey with their answers, oldest first
    pub fn get_for_survey(&self, survey_id: i64) -> Result<Vec<SurveyResponse>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, survey_id, respondent_name, respondent_email, submitted_at,
                    completion_time_seconds, existing_client_id
             FROM responses WHERE survey_id = ?1 ORDER BY id",
        )?;
        let mut responses: Vec<SurveyResponse> = stmt
            .query_map([survey_id], |row| {
                Ok(SurveyResponse {
                    id: row.get(0)?,
                    survey_id: row.get(1)?,
                    respondent_name: row.get(2)?,
                    respondent_email: row.get(3)?,
                    submitted_at: row.get(4)?,
                    completion_time_seconds: row.get(5)?,
                    existing_client_id: row.get(6)?,
                    answers: Vec::new(),
                })
            })?
            .collect::<Result<Vec<SurveyResponse>>>()?;

        for response in &mut responses {
            response.answers = self.answers_for_response(response.id)?;
        }

        Ok(responses)
    }

    /// Reassembles answer rows into QuestionResponse values; rows of a
    /// multi-value answer share a question_id and ascend by value_index
    fn answers_for_response(&self, response_id: i64) -> Result<Vec<QuestionResponse>> {
        let mut stmt = self.conn.prepare(
            "SELECT question_id, value, value_index, is_valid
             FROM answers WHERE response_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([response_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i32>(3)? != 0,
            ))
        })?;

        let mut answers: Vec<QuestionResponse> = Vec::new();
        for row in rows {
            let (question_id, value, value_index, is_valid) = row?;
            match answers.last_mut() {
                Some(last) if last.question_id == question_id && value_index > 0 => {
                    last.values.push(value);
                }
                _ => {
                    let mut answer = QuestionResponse::new(question_id, vec![value]);
                    answer.is_valid = is_valid;
                    answers.push(answer);
                }
            }
        }
        Ok(answers)
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::init_connection;
    use crate::database::surveys::{NewQuestion, SurveysRepository};
    use crate::survey::QuestionType;

    fn create_test_db() -> Connection {
        init_connection(":memory:").expect("Failed to create test database")
    }

    fn survey_with_questions(conn: &Connection) -> Survey {
        let surveys = SurveysRepository::new(conn);
        let survey_id = surveys.create("Feedback").unwrap();
        surveys
            .add_question(
                survey_id,
                &NewQuestion {
                    title: "Score?".to_string(),
                    question_type: QuestionType::Rating,
                    required: true,
                    options: vec![],
                    min_value: Some(1),
                    max_value: Some(10),
                },
            )
            .unwrap();
        surveys
            .add_question(
                survey_id,
                &NewQuestion {
                    title: "Channels?".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    required: false,
                    options: vec!["Email".to_string(), "Phone".to_string()],
                    min_value: None,
                    max_value: None,
                },
            )
            .unwrap();
        surveys.get(survey_id).unwrap().unwrap()
    }

    fn repo(conn: &Connection) -> ResponsesRepository<'_> {
        ResponsesRepository::new(conn)
    }

    #[test]
    fn test_insert_and_reload_response() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let responses = repo(&conn);

        let question_id = survey.questions[0].id;
        let multi_id = survey.questions[1].id;
        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Ana".to_string(),
                    respondent_email: "ana@example.com".to_string(),
                    completion_time_seconds: Some(42.5),
                    existing_client_id: None,
                    answers: vec![
                        QuestionResponse::scalar(question_id, "8"),
                        QuestionResponse::new(
                            multi_id,
                            vec!["Email".to_string(), "Phone".to_string()],
                        ),
                    ],
                },
            )
            .unwrap();

        let loaded = responses.get_for_survey(survey.id).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].respondent_name, "Ana");
        assert_eq!(loaded[0].completion_time_seconds, Some(42.5));
        assert_eq!(loaded[0].answers.len(), 2);
        assert_eq!(loaded[0].answers[0].values, vec!["8"]);
        assert!(loaded[0].answers[0].is_valid);
        assert_eq!(loaded[0].answers[1].values, vec!["Email", "Phone"]);
    }

    #[test]
    fn test_invalid_answer_is_persisted_with_flag_cleared() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let responses = repo(&conn);

        let question_id = survey.questions[0].id;
        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Bo".to_string(),
                    respondent_email: "bo@example.com".to_string(),
                    completion_time_seconds: None,
                    existing_client_id: None,
                    answers: vec![QuestionResponse::scalar(question_id, "not a number")],
                },
            )
            .unwrap();

        let loaded = responses.get_for_survey(survey.id).unwrap();
        assert_eq!(loaded[0].answers.len(), 1);
        assert!(!loaded[0].answers[0].is_valid);
        assert_eq!(loaded[0].answers[0].values, vec!["not a number"]);
    }

    #[test]
    fn test_answer_for_unknown_question_is_kept_as_invalid() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let responses = repo(&conn);

        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Cy".to_string(),
                    respondent_email: "cy@example.com".to_string(),
                    completion_time_seconds: None,
                    existing_client_id: None,
                    answers: vec![QuestionResponse::scalar(9999, "orphan")],
                },
            )
            .unwrap();

        let loaded = responses.get_for_survey(survey.id).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded[0].answers[0].is_valid);
    }

    #[test]
    fn test_empty_answer_is_not_recorded() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let responses = repo(&conn);

        let question_id = survey.questions[0].id;
        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Di".to_string(),
                    respondent_email: "di@example.com".to_string(),
                    completion_time_seconds: None,
                    existing_client_id: None,
                    answers: vec![QuestionResponse::new(question_id, vec![])],
                },
            )
            .unwrap();

        let loaded = responses.get_for_survey(survey.id).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].answers.is_empty());
    }

    #[test]
    fn test_submitted_at_comes_from_date_provider() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let fixed_date = chrono::NaiveDate::from_ymd_opt(2026, 4, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
            .and_utc();
        let responses = ResponsesRepository::new_with_date_provider(&conn, Box::new(move || fixed_date));

        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Eva".to_string(),
                    respondent_email: "eva@example.com".to_string(),
                    completion_time_seconds: None,
                    existing_client_id: None,
                    answers: vec![],
                },
            )
            .unwrap();

        let loaded = responses.get_for_survey(survey.id).unwrap();
        assert_eq!(loaded[0].submitted_at, fixed_date);
    }

    #[test]
    fn test_count() {
        let conn = create_test_db();
        let survey = survey_with_questions(&conn);
        let responses = repo(&conn);
        assert_eq!(responses.count().unwrap(), 0);

        responses
            .insert(
                &survey,
                NewResponse {
                    respondent_name: "Fe".to_string(),
                    respondent_email: "fe@example.com".to_string(),
                    completion_time_seconds: None,
                    existing_client_id: None,
                    answers: vec![],
                },
            )
            .unwrap();
        assert_eq!(responses.count().unwrap(), 1);
    }
}
