pub mod attendance;
pub mod live;
pub mod sanctions;
pub mod students;
