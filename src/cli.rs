use crate::customer::CustomerType;
use crate::growth::GrowthFilter;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Survey statistics and customer growth reporting
#[derive(Parser, Debug, Clone)]
#[command(name = "Survey Insights")]
#[command(about = "Compute survey statistics and customer growth reports", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for reproducible reports (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    /// Restrict the statistics section to one survey
    #[arg(long, value_name = "ID", help = "Only report on this survey id")]
    pub survey: Option<i64>,

    /// Growth window in months
    #[arg(long, value_name = "N", help = "Growth window in months (default 12)")]
    pub months: Option<String>,

    /// Restrict growth to one customer type
    #[arg(
        long,
        value_name = "TYPE",
        help = "Restrict growth to a customer type (admin or client)"
    )]
    pub customer_type: Option<String>,

    /// Restrict growth to customers holding a service
    #[arg(long, value_name = "NAME", help = "Restrict growth to holders of a service")]
    pub service: Option<String>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }

    /// Validate the months argument if provided. A malformed value is a hard
    /// error; it is never silently replaced with the default.
    pub fn validate_months(&self) -> Result<Option<u32>, String> {
        match &self.months {
            Some(months_str) => months_str
                .parse::<u32>()
                .ok()
                .filter(|m| *m > 0)
                .map(Some)
                .ok_or_else(|| {
                    format!(
                        "Invalid value for --months: '{}'. Expected a positive whole number",
                        months_str
                    )
                }),
            None => Ok(None),
        }
    }

    /// Validate the customer_type argument if provided
    pub fn validate_customer_type(&self) -> Result<Option<CustomerType>, String> {
        match &self.customer_type {
            Some(type_str) => CustomerType::from(type_str).map(Some).ok_or_else(|| {
                format!(
                    "Invalid value for --customer-type: '{}'. Expected 'admin' or 'client'",
                    type_str
                )
            }),
            None => Ok(None),
        }
    }

    /// Builds the growth filter from the validated arguments
    pub fn growth_filter(&self) -> Result<GrowthFilter, String> {
        Ok(GrowthFilter {
            months: self.validate_months()?,
            customer_type: self.validate_customer_type()?,
            service: self.service.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            test: false,
            db_path: None,
            override_date: None,
            survey: None,
            months: None,
            customer_type: None,
            service: None,
        }
    }

    #[test]
    fn test_validate_override_date_valid() {
        let mut a = args();
        a.override_date = Some("2026-01-15".to_string());
        assert_eq!(
            a.validate_override_date().unwrap(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_validate_override_date_invalid_format() {
        let mut a = args();
        a.override_date = Some("2026/01/15".to_string());
        let result = a.validate_override_date();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid date format"));
    }

    #[test]
    fn test_validate_override_date_none() {
        assert_eq!(args().validate_override_date().unwrap(), None);
    }

    #[test]
    fn test_validate_months_valid() {
        let mut a = args();
        a.months = Some("6".to_string());
        assert_eq!(a.validate_months().unwrap(), Some(6));
    }

    #[test]
    fn test_validate_months_rejects_non_numeric() {
        let mut a = args();
        a.months = Some("six".to_string());
        let result = a.validate_months();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--months"));
    }

    #[test]
    fn test_validate_months_rejects_zero() {
        let mut a = args();
        a.months = Some("0".to_string());
        assert!(a.validate_months().is_err());
    }

    #[test]
    fn test_validate_months_none() {
        assert_eq!(args().validate_months().unwrap(), None);
    }

    #[test]
    fn test_validate_customer_type() {
        let mut a = args();
        a.customer_type = Some("client".to_string());
        assert_eq!(a.validate_customer_type().unwrap(), Some(CustomerType::Client));

        a.customer_type = Some("vendor".to_string());
        assert!(a.validate_customer_type().is_err());
    }

    #[test]
    fn test_growth_filter_collects_validated_values() {
        let mut a = args();
        a.months = Some("3".to_string());
        a.customer_type = Some("admin".to_string());
        a.service = Some("Web".to_string());

        let filter = a.growth_filter().unwrap();
        assert_eq!(filter.months, Some(3));
        assert_eq!(filter.customer_type, Some(CustomerType::Admin));
        assert_eq!(filter.service.as_deref(), Some("Web"));
    }

    #[test]
    fn test_growth_filter_propagates_malformed_months() {
        let mut a = args();
        a.months = Some("abc".to_string());
        assert!(a.growth_filter().is_err());
    }
}
