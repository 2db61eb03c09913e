//! Live chart aggregate: payload entities, decoration value objects and the renderer.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
