use log::debug;
use rusqlite::Connection;
use rusqlite::Result;

// Embed migrations from the migrations directory
refinery::embed_migrations!("migrations");

/// Opens the database and brings the schema up to date
pub fn init_connection(db_path: &str) -> Result<Connection> {
    let mut conn = Connection::open(db_path)?;

    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!("Applied {} migration(s)", report.applied_migrations().len());
        }
        Err(e) => {
            eprintln!("Refinery migration error: {}", e);
            return Err(rusqlite::Error::ExecuteReturnedResults);
        }
    }

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_connection_creates_schema() {
        let conn = init_connection(":memory:").unwrap();
        let surveys: i64 = conn
            .query_row("SELECT COUNT(*) FROM surveys", [], |row| row.get(0))
            .unwrap();
        let customers: i64 = conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(surveys, 0);
        assert_eq!(customers, 0);
    }
}
