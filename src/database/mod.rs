pub mod connection;
pub mod customers;
pub mod responses;
pub mod surveys;

use crate::customer::Customer;
use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::growth::{GrowthFilter, GrowthReport, compute_growth};
use crate::statistics::SurveyStatistics;
use crate::survey::Survey;
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{Connection, Result};
use std::sync::Arc;

pub use customers::{CustomersRepository, NewCustomer};
pub use responses::{NewResponse, ResponsesRepository};
pub use surveys::{NewQuestion, SurveysRepository};

/// Main Database struct providing access to all repositories
pub struct Database {
    pub conn: Connection,
    date_provider: Arc<dyn DateProvider>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        Self::init(db_path, Arc::new(SystemDateProvider))
    }

    pub fn with_date_provider(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        Self::init(db_path, date_provider)
    }

    fn init(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database {
            conn,
            date_provider,
        })
    }

    fn get_current_time(&self) -> DateTime<Utc> {
        self.date_provider.get_current_time()
    }

    // ===== Surveys Repository Access =====

    pub fn create_survey(&self, title: &str) -> Result<i64> {
        let repo = SurveysRepository::new(&self.conn);
        repo.create(title)
    }

    pub fn add_question(&self, survey_id: i64, question: &NewQuestion) -> Result<i64> {
        let repo = SurveysRepository::new(&self.conn);
        repo.add_question(survey_id, question)
    }

    pub fn get_survey(&self, survey_id: i64) -> Result<Option<Survey>> {
        let repo = SurveysRepository::new(&self.conn);
        repo.get(survey_id)
    }

    pub fn list_survey_ids(&self) -> Result<Vec<i64>> {
        let repo = SurveysRepository::new(&self.conn);
        repo.list_ids()
    }

    pub fn count_surveys(&self) -> Result<i64> {
        let repo = SurveysRepository::new(&self.conn);
        repo.count()
    }

    // ===== Responses Repository Access =====

    pub fn insert_response(&self, survey: &Survey, response: NewResponse) -> Result<i64> {
        let current_time = self.get_current_time();
        let repo = ResponsesRepository::new_with_date_provider(&self.conn, Box::new(move || current_time));
        repo.insert(survey, response)
    }

    pub fn get_responses(&self, survey_id: i64) -> Result<Vec<crate::survey::SurveyResponse>> {
        let repo = ResponsesRepository::new(&self.conn);
        repo.get_for_survey(survey_id)
    }

    pub fn count_responses(&self) -> Result<i64> {
        let repo = ResponsesRepository::new(&self.conn);
        repo.count()
    }

    // ===== Customers Repository Access =====

    pub fn insert_customer(&self, customer: &NewCustomer) -> Result<i64> {
        let current_time = self.get_current_time();
        let repo = CustomersRepository::new_with_date_provider(&self.conn, Box::new(move || current_time));
        repo.insert(customer)
    }

    pub fn add_customer_service(&self, customer_id: i64, service_name: &str) -> Result<()> {
        let current_time = self.get_current_time();
        let repo = CustomersRepository::new_with_date_provider(&self.conn, Box::new(move || current_time));
        repo.add_service(customer_id, service_name)
    }

    pub fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let repo = CustomersRepository::new(&self.conn);
        repo.get(customer_id)
    }

    pub fn get_all_customers(&self) -> Result<Vec<Customer>> {
        let repo = CustomersRepository::new(&self.conn);
        repo.get_all()
    }

    pub fn count_customers(&self) -> Result<i64> {
        let repo = CustomersRepository::new(&self.conn);
        repo.count()
    }

    // ===== Aggregation =====

    /// Loads a survey snapshot and computes its statistics. Returns None
    /// when the survey does not exist; repeated calls recompute from
    /// scratch, nothing is cached.
    pub fn compute_survey_statistics(&self, survey_id: i64) -> Result<Option<SurveyStatistics>> {
        let Some(survey) = self.get_survey(survey_id)? else {
            return Ok(None);
        };
        let responses = self.get_responses(survey_id)?;
        info!(
            "Computing statistics for survey {} over {} response(s)",
            survey_id,
            responses.len()
        );
        Ok(Some(SurveyStatistics::from_responses(&survey, &responses)))
    }

    /// Loads the full customer snapshot and computes the growth series
    pub fn compute_customer_growth(&self, filter: &GrowthFilter) -> Result<GrowthReport> {
        let customers = self.get_all_customers()?;
        info!("Computing growth over {} customer(s)", customers.len());
        Ok(compute_growth(&customers, filter, self.get_current_time()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerType;
    use crate::survey::{QuestionResponse, QuestionType};

    fn create_test_db() -> Database {
        Database::new(":memory:").expect("Failed to create test database")
    }

    #[test]
    fn test_database_creation() {
        let db = create_test_db();
        assert_eq!(db.count_surveys().unwrap(), 0);
        assert_eq!(db.count_responses().unwrap(), 0);
        assert_eq!(db.count_customers().unwrap(), 0);
    }

    #[test]
    fn test_statistics_for_missing_survey() {
        let db = create_test_db();
        assert!(db.compute_survey_statistics(7).unwrap().is_none());
    }

    #[test]
    fn test_statistics_through_facade() {
        let db = create_test_db();
        let survey_id = db.create_survey("Feedback").unwrap();
        let question_id = db
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
        let survey = db.get_survey(survey_id).unwrap().unwrap();

        db.insert_response(
            &survey,
            NewResponse {
                respondent_name: "Ana".to_string(),
                respondent_email: "ana@example.com".to_string(),
                completion_time_seconds: Some(20.0),
                existing_client_id: None,
                answers: vec![QuestionResponse::scalar(question_id, "9")],
            },
        )
        .unwrap();

        let stats = db.compute_survey_statistics(survey_id).unwrap().unwrap();
        assert_eq!(stats.total_responses, 1);
        assert_eq!(stats.completion_rate, 100.0);
        assert_eq!(stats.question_distributions[0].answers[0].answer, "9");
    }

    #[test]
    fn test_growth_through_facade() {
        let db = create_test_db();
        db.insert_customer(&NewCustomer {
            brand_name: "Acme".to_string(),
            contact_email: "acme@example.com".to_string(),
            customer_type: CustomerType::Client,
            services: vec!["Web".to_string()],
        })
        .unwrap();

        let report = db.compute_customer_growth(&GrowthFilter::default()).unwrap();
        assert_eq!(report.service_usage.len(), 1);
        assert_eq!(report.monthly_growth.len(), 12);
        assert_eq!(report.brand_growth[0].brand, "Acme");
        // The customer was just created, so it lands in the newest bucket
        assert_eq!(report.monthly_growth.last().unwrap().new_customers, 1);
    }
}
