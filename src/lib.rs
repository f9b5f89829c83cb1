pub mod availability;
pub mod booking;
pub mod interval;
pub mod store;
pub mod time;
