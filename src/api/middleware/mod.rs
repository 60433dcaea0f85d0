pub mod media;
pub mod throttle;
