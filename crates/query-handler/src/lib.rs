pub mod handlers;

pub use handlers::QueryHandler;
