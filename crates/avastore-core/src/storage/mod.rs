mod database;
mod product_repo;
mod retry;

pub use database::Database;
pub use product_repo::ProductRepository;
