pub mod time;

pub use time::{FrameTimer, MockTimeProvider, SystemTimeProvider, TimeProvider};
