pub mod health;
pub mod overview;
pub mod trackers;
