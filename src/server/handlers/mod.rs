pub mod form;
pub mod reports;
pub mod routes;
pub mod suggestions;
