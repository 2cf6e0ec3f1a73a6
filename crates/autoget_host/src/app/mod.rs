pub(crate) mod bootstrap;
mod catalog;
mod console;
pub(crate) mod loop_runner;
mod prompt;
