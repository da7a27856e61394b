pub mod commands;
pub mod error;
pub mod filter;
pub mod getlabel;
pub mod interpreter;
pub mod session;
pub mod suspend;
pub mod value;
