//! Persistence implementations

mod mysql;
mod schema;

pub use mysql::MySqlProductRepository;
pub use schema::PRODUCT_MIGRATIONS;
