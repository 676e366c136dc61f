mod app;
mod commands;
mod render;
mod run;
mod types;

pub use run::run;
