use survey_insights::cli::Args;
use survey_insights::database_factory::{DatabaseConfig, DatabaseFactory};
use survey_insights::report::{format_growth_report, format_survey_statistics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    let override_date = args.validate_override_date()?;
    let growth_filter = args.growth_filter()?;

    let mut builder = DatabaseConfig::builder();
    if args.test {
        builder = builder.test_mode();
    }
    if let Some(path) = &args.db_path {
        builder = builder.path(&path.to_string_lossy());
    }
    if let Some(date) = override_date {
        builder = builder.override_date(date);
    }
    let db = DatabaseFactory::create(builder.build())?;

    let survey_ids = match args.survey {
        Some(survey_id) => vec![survey_id],
        None => db.list_survey_ids()?,
    };

    if survey_ids.is_empty() {
        println!("No surveys found in the database.");
    }
    for survey_id in survey_ids {
        match db.get_survey(survey_id)? {
            Some(survey) => {
                if let Some(stats) = db.compute_survey_statistics(survey_id)? {
                    println!("{}", format_survey_statistics(&survey.title, &stats));
                }
            }
            None => println!("Survey {} not found.", survey_id),
        }
    }

    let growth = db.compute_customer_growth(&growth_filter)?;
    println!("{}", format_growth_report(&growth));

    Ok(())
}
