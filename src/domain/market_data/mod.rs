//! Market data aggregate: coins, filters, live series and the upstream seams.

pub mod catalog;
pub mod entities;
pub mod filter;
pub mod repositories;
pub mod series_store;
pub mod value_objects;

pub use catalog::*;
pub use entities::*;
pub use filter::*;
pub use repositories::*;
pub use series_store::*;
pub use value_objects::*;
