use crate::customer::{Customer, CustomerType};
use crate::row_factories::CustomerRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// Customer record as supplied by the caller; timestamps are stamped by the
/// repository
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub brand_name: String,
    pub contact_email: String,
    pub customer_type: CustomerType,
    pub services: Vec<String>,
}

pub struct CustomersRepository<'a> {
    conn: &'a Connection,
    get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
}

impl<'a> CustomersRepository<'a> {
    /// Repository using the system clock; sufficient for all read paths
    pub fn new(conn: &'a Connection) -> Self {
        Self::new_with_date_provider(conn, Box::new(Utc::now))
    }

    /// Repository with an injected clock, used where timestamps get stamped
    pub fn new_with_date_provider(
        conn: &'a Connection,
        get_current_time: Box<dyn Fn() -> DateTime<Utc> + 'a>,
    ) -> Self {
        CustomersRepository {
            conn,
            get_current_time,
        }
    }

    pub fn insert(&self, customer: &NewCustomer) -> Result<i64> {
        let now = (self.get_current_time)();
        self.conn.execute(
            "INSERT INTO customers (brand_name, contact_email, customer_type, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                customer.brand_name,
                customer.contact_email,
                customer.customer_type.as_str(),
                now,
                now
            ],
        )?;
        let customer_id = self.conn.last_insert_rowid();

        for service in &customer.services {
            self.conn.execute(
                "INSERT INTO customer_services (customer_id, service_name) VALUES (?1, ?2)",
                params![customer_id, service],
            )?;
        }

        Ok(customer_id)
    }

    /// Records a newly acquired service and bumps updated_at
    pub fn add_service(&self, customer_id: i64, service_name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO customer_services (customer_id, service_name) VALUES (?1, ?2)",
            params![customer_id, service_name],
        )?;
        self.conn.execute(
            "UPDATE customers SET updated_at = ?1 WHERE id = ?2",
            params![(self.get_current_time)(), customer_id],
        )?;
        Ok(())
    }

    pub fn get(&self, customer_id: i64) -> Result<Option<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, brand_name, contact_email, customer_type, created_at, updated_at
             FROM customers WHERE id = ?1",
        )?;
        let mut rows = stmt.query([customer_id])?;

        if let Some(row) = rows.next()? {
            let mut customer = CustomerRowFactory::from_row(row)?;
            customer.services = self.services_for(customer.id)?;
            Ok(Some(customer))
        } else {
            Ok(None)
        }
    }

    /// All customers with their acquired services, oldest first
    pub fn get_all(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, brand_name, contact_email, customer_type, created_at, updated_at
             FROM customers ORDER BY id",
        )?;
        let mut customers: Vec<Customer> = stmt
            .query_map([], CustomerRowFactory::from_row)?
            .collect::<Result<Vec<Customer>>>()?;

        for customer in &mut customers {
            customer.services = self.services_for(customer.id)?;
        }

        Ok(customers)
    }

    fn services_for(&self, customer_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT service_name FROM customer_services WHERE customer_id = ?1 ORDER BY id",
        )?;
        stmt.query_map([customer_id], |row| row.get(0))?
            .collect::<Result<Vec<String>>>()
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
    }
}
