use crate::customer::{Customer, CustomerType};
use crate::survey::{Question, QuestionType};
use rusqlite::Row;

/// Factory for creating Question objects from database rows
pub struct QuestionRowFactory;

impl QuestionRowFactory {
    /// Creates a Question from a database row.
    /// Expected columns: id, title, question_type, required, min_value,
    ///                   max_value, position
    /// Options are attached separately by the repository.
    pub fn from_row(row: &Row) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            title: row.get(1)?,
            question_type: QuestionType::from(&row.get::<_, String>(2)?)
                .unwrap_or(QuestionType::Other),
            required: row.get::<_, i32>(3)? != 0,
            options: Vec::new(),
            min_value: row.get(4)?,
            max_value: row.get(5)?,
            position: row.get(6)?,
        })
    }
}

/// Factory for creating Customer objects from database rows
pub struct CustomerRowFactory;

impl CustomerRowFactory {
    /// Creates a Customer from a database row.
    /// Expected columns: id, brand_name, contact_email, customer_type,
    ///                   created_at, updated_at
    /// Acquired services are attached separately by the repository.
    pub fn from_row(row: &Row) -> rusqlite::Result<Customer> {
        Ok(Customer {
            id: row.get(0)?,
            brand_name: row.get(1)?,
            contact_email: row.get(2)?,
            customer_type: CustomerType::from(&row.get::<_, String>(3)?)
                .unwrap_or(CustomerType::Client),
            services: Vec::new(),
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}
