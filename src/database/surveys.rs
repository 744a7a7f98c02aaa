use crate::row_factories::QuestionRowFactory;
use crate::survey::{Question, QuestionType, Survey};
use rusqlite::{Connection, Result, params};

/// Question definition as supplied by the caller; id and position are
/// assigned by the repository
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub question_type: QuestionType,
    pub required: bool,
    pub options: Vec<String>,
    pub min_value: Option<i32>,
    pub max_value: Option<i32>,
}

pub struct SurveysRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SurveysRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SurveysRepository { conn }
    }

    pub fn create(&self, title: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO surveys (title) VALUES (?1)", [title])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Appends a question to a survey. Questions may be added after
    /// responses exist; existing responses simply have no answer for the
    /// new question.
    pub fn add_question(&self, survey_id: i64, question: &NewQuestion) -> Result<i64> {
        let position: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM questions WHERE survey_id = ?1",
            [survey_id],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO questions (survey_id, title, question_type, required, min_value, max_value, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                survey_id,
                question.title,
                question.question_type.as_str(),
                question.required as i32,
                question.min_value,
                question.max_value,
                position
            ],
        )?;
        let question_id = self.conn.last_insert_rowid();

        for (option_position, value) in question.options.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO question_options (question_id, value, position) VALUES (?1, ?2, ?3)",
                params![question_id, value, option_position as i32],
            )?;
        }

        Ok(question_id)
    }

    /// Loads a survey with its questions in position order
    pub fn get(&self, survey_id: i64) -> Result<Option<Survey>> {
        let title: Option<String> = self
            .conn
            .query_row("SELECT title FROM surveys WHERE id = ?1", [survey_id], |row| {
                row.get(0)
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let Some(title) = title else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, title, question_type, required, min_value, max_value, position
             FROM questions WHERE survey_id = ?1 ORDER BY position",
        )?;
        let mut questions: Vec<Question> = stmt
            .query_map([survey_id], QuestionRowFactory::from_row)?
            .collect::<Result<Vec<Question>>>()?;

        for question in &mut questions {
            let mut option_stmt = self.conn.prepare(
                "SELECT value FROM question_options WHERE question_id = ?1 ORDER BY position",
            )?;
            question.options = option_stmt
                .query_map([question.id], |row| row.get(0))?
                .collect::<Result<Vec<String>>>()?;
        }

        Ok(Some(Survey {
            id: survey_id,
            title,
            questions,
        }))
    }

    /// Ids of all surveys in creation order
    pub fn list_ids(&self) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT id FROM surveys ORDER BY id")?;
        stmt.query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>>>()
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))
    }
}
