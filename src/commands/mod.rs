//! CLI commands

pub mod list;
pub mod new;
pub mod settings;
pub mod show;
pub mod speak;
