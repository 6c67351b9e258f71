#![allow(clippy::collapsible_if)]

pub mod check;
pub mod codegen;
pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod language;
pub mod runtime;
pub mod target;
pub mod translate;
