use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum CustomerType {
    Admin,
    Client,
}

impl CustomerType {
    pub fn as_str(&self) -> &str {
        match self {
            CustomerType::Admin => "admin",
            CustomerType::Client => "client",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(CustomerType::Admin),
            "client" => Some(CustomerType::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i64,
    pub brand_name: String,
    pub contact_email: String,
    pub customer_type: CustomerType,
    pub services: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_type_as_str() {
        assert_eq!(CustomerType::Admin.as_str(), "admin");
        assert_eq!(CustomerType::Client.as_str(), "client");
    }

    #[test]
    fn test_customer_type_from_str() {
        assert_eq!(CustomerType::from("admin"), Some(CustomerType::Admin));
        assert_eq!(CustomerType::from("client"), Some(CustomerType::Client));
        assert_eq!(CustomerType::from("invalid"), None);
    }
}
