pub mod activities;
pub mod models;
pub mod placeholders;
pub mod prompts;

pub use activities::*;
pub use models::*;
