pub mod errors;
pub mod record;
pub mod validation;

pub use errors::*;
pub use record::*;
pub use validation::*;
