pub mod cli;
pub mod customer;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod growth;
pub mod report;
pub mod row_factories;
pub mod statistics;
pub mod survey;
pub mod validation;
