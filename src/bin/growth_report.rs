use survey_insights::database::Database;
use survey_insights::growth::GrowthFilter;
use survey_insights::report::format_growth_report;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <database_file> [months]", args[0]);
        eprintln!();
        eprintln!("Prints service usage, monthly growth and brand growth for all customers.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  <database_file>  Path to the SQLite database file");
        eprintln!("  [months]         Growth window in months (default 12)");
        eprintln!();
        eprintln!("Example: {} ~/survey_insights.db 6", args[0]);
        std::process::exit(1);
    }

    let db_path = &args[1];
    let months = match args.get(2) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(m) if m > 0 => Some(m),
            _ => {
                eprintln!("Invalid months value: '{}'. Expected a positive whole number", raw);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let db = match Database::new(db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    let filter = GrowthFilter {
        months,
        ..Default::default()
    };
    let report = match db.compute_customer_growth(&filter) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error computing growth report: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", format_growth_report(&report));
}
