pub mod dto;
pub mod http;
pub mod rendering;
pub mod scheduler;
pub mod services;

pub use scheduler::{CommandSink, spawn_poll_loop};
