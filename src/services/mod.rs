pub mod dates;
pub mod goal_status;
pub mod goal_tracker;
pub mod input;
