use crate::customer::{Customer, CustomerType};
use chrono::{DateTime, Datelike, Utc};

pub const DEFAULT_MONTHS: u32 = 12;

#[derive(Debug, Clone, Default)]
pub struct GrowthFilter {
    /// Width of the analysis window in months (defaults to 12)
    pub months: Option<u32>,
    pub customer_type: Option<CustomerType>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceUsage {
    pub service: String,
    pub customers: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyGrowthPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub new_customers: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandGrowth {
    pub brand: String,
    pub total: i64,
    pub recent: i64,
}

#[derive(Debug, Clone)]
pub struct GrowthReport {
    pub service_usage: Vec<ServiceUsage>,
    pub monthly_growth: Vec<MonthlyGrowthPoint>,
    pub brand_growth: Vec<BrandGrowth>,
}

/// Computes the three growth series over a snapshot of customer records.
/// Pure function; the caller supplies "now" so reports are reproducible.
pub fn compute_growth(
    customers: &[Customer],
    filter: &GrowthFilter,
    now: DateTime<Utc>,
) -> GrowthReport {
    let selected: Vec<&Customer> = customers
        .iter()
        .filter(|c| match &filter.customer_type {
            Some(customer_type) => c.customer_type == *customer_type,
            None => true,
        })
        .filter(|c| match &filter.service {
            Some(service) => c.services.contains(service),
            None => true,
        })
        .collect();

    let months = filter.months.unwrap_or(DEFAULT_MONTHS).max(1);

    GrowthReport {
        service_usage: service_usage(&selected),
        monthly_growth: monthly_growth(&selected, months, now),
        brand_growth: brand_growth(&selected, filter.months.map(|m| window_start(now, m.max(1)))),
    }
}

/// Tallies how many customers hold each acquired service, descending by
/// count with alphabetical tie-break. Customers with no services
/// contribute nothing.
fn service_usage(customers: &[&Customer]) -> Vec<ServiceUsage> {
    let mut tally: Vec<ServiceUsage> = Vec::new();

    for customer in customers {
        for service in &customer.services {
            match tally.iter_mut().find(|u| u.service == *service) {
                Some(usage) => usage.customers += 1,
                None => tally.push(ServiceUsage {
                    service: service.clone(),
                    customers: 1,
                }),
            }
        }
    }

    tally.sort_by(|a, b| b.customers.cmp(&a.customers).then(a.service.cmp(&b.service)));
    tally
}

/// Counts new customers per calendar month, walking backwards from the month
/// containing `now`. Always returns exactly `months` contiguous buckets in
/// ascending order.
fn monthly_growth(customers: &[&Customer], months: u32, now: DateTime<Utc>) -> Vec<MonthlyGrowthPoint> {
    let mut points = Vec::with_capacity(months as usize);
    let mut year = now.year();
    let mut month = now.month();

    for _ in 0..months {
        let bucket_start = month_start(year, month);
        let (next_year, next_month) = month_after(year, month);
        let bucket_end = month_start(next_year, next_month);

        let new_customers = customers
            .iter()
            .filter(|c| c.created_at >= bucket_start && c.created_at < bucket_end)
            .count() as i64;

        points.push(MonthlyGrowthPoint {
            year,
            month,
            label: bucket_start.format("%b %Y").to_string(),
            new_customers,
        });

        (year, month) = month_before(year, month);
    }

    points.reverse();
    points
}

/// Groups customers by brand name. `recent` counts customers created at or
/// after the cutoff; with no cutoff it equals `total`. Descending by total
/// with alphabetical tie-break.
fn brand_growth(customers: &[&Customer], cutoff: Option<DateTime<Utc>>) -> Vec<BrandGrowth> {
    let mut brands: Vec<BrandGrowth> = Vec::new();

    for customer in customers {
        let is_recent = match cutoff {
            Some(cutoff) => customer.created_at >= cutoff,
            None => true,
        };
        match brands.iter_mut().find(|b| b.brand == customer.brand_name) {
            Some(brand) => {
                brand.total += 1;
                if is_recent {
                    brand.recent += 1;
                }
            }
            None => brands.push(BrandGrowth {
                brand: customer.brand_name.clone(),
                total: 1,
                recent: i64::from(is_recent),
            }),
        }
    }

    brands.sort_by(|a, b| b.total.cmp(&a.total).then(a.brand.cmp(&b.brand)));
    brands
}

/// Start of the oldest bucket in an n-month window ending at `now`.
/// Shared by brand growth so its cutoff lines up with the monthly buckets.
fn window_start(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let mut year = now.year();
    let mut month = now.month();
    for _ in 1..months {
        (year, month) = month_before(year, month);
    }
    month_start(year, month)
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("first day of month is a valid date")
        .and_utc()
}

fn month_before(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}
