pub mod classes;
pub mod resolve;
