pub mod blocks;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod host;
pub mod interpreter;
pub mod output;
pub mod suspension;
pub mod value;

pub use interpreter::{Interpreter, RunOptions};
