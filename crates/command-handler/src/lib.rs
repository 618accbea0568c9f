pub mod guard;
pub mod handlers;

pub use handlers::CommandHandler;
