pub mod classifier;
pub mod command;
pub mod errors;
pub mod program;
pub mod span;
