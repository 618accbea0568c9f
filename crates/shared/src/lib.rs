pub mod config;
pub mod errors;
pub mod logging;
pub mod response;

pub use config::*;
pub use errors::*;
pub use logging::*;
pub use response::*;
