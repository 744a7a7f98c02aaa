use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for everything that stamps or buckets by time.
/// Keeping the clock behind a trait lets tests and the CLI pin a date
/// and get reproducible reports.
pub trait DateProvider: Send + Sync {
    fn get_current_time(&self) -> DateTime<Utc>;
}

/// Default provider backed by the system clock
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Provider pinned to a specific date (noon UTC), used by `--override-date`
/// and by tests that assert on month buckets
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        self.override_date
            .and_hms_opt(12, 0, 0)
            .expect("noon is a valid time of day")
            .and_utc()
    }
}
