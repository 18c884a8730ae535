//! Tournament module: splitting the prize pool among finishing positions.

pub mod errors;
pub mod models;

pub use errors::PrizeStructureError;
pub use models::PrizeStructure;
