pub mod live_poller;
pub mod use_cases;
pub mod view_controller;

pub use live_poller::*;
pub use use_cases::*;
pub use view_controller::*;
