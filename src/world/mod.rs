pub mod position;
pub mod state;
pub mod time;
pub mod waypoints;
