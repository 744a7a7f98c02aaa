use crate::growth::GrowthReport;
use crate::statistics::SurveyStatistics;
use colored::Colorize;
use std::fmt::Write;

/// Renders one survey's statistics as a plain-text block.
/// Distributions are shown descending by count (alphabetical on ties).
pub fn format_survey_statistics(survey_title: &str, stats: &SurveyStatistics) -> String {
    let mut out = String::new();

    let heading = format!("Survey: {}", survey_title);
    let _ = writeln!(out, "{}", heading.bold());
    let _ = writeln!(out, "{}", "-".repeat(heading.len()));
    let _ = writeln!(
        out,
        "Responses: {} | Completion rate: {:.1}% | Avg completion time: {:.1}s",
        stats.total_responses, stats.completion_rate, stats.average_completion_time
    );

    for distribution in &stats.question_distributions {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", distribution.question_title);
        if distribution.answers.is_empty() {
            let _ = writeln!(out, "  (no answers)");
            continue;
        }
        for answer in distribution.sorted_by_count() {
            let _ = writeln!(
                out,
                "  {:<30} {:>4}  ({:.1}%)",
                answer.answer, answer.count, answer.percentage
            );
        }
    }

    out
}

/// Renders the three growth series as a plain-text block
pub fn format_growth_report(report: &GrowthReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Customer Growth".bold());
    let _ = writeln!(out, "{}", "=".repeat("Customer Growth".len()));

    let _ = writeln!(out, "Service usage:");
    if report.service_usage.is_empty() {
        let _ = writeln!(out, "  (no services acquired)");
    }
    for usage in &report.service_usage {
        let _ = writeln!(out, "  {:<30} {:>4}", usage.service, usage.customers);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "New customers per month:");
    for point in &report.monthly_growth {
        let _ = writeln!(out, "  {:<10} {:>4}", point.label, point.new_customers);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Brand growth:");
    if report.brand_growth.is_empty() {
        let _ = writeln!(out, "  (no customers)");
    }
    for brand in &report.brand_growth {
        let _ = writeln!(
            out,
            "  {:<30} total {:>4}, recent {:>4}",
            brand.brand, brand.total, brand.recent
        );
    }

    out
}
