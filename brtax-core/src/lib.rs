pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::TaxEngine;
pub use models::*;
