pub mod item;
pub mod layer;
pub mod mobile;
pub mod player;
pub mod skills;
