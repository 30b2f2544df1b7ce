// Workday AI Research Brief - Core
//
// Gathers recent news, has a language model synthesize it into a structured
// brief, normalizes every link in the result, and publishes a static page
// (plus an optional email).
//
// Infrastructure traits and adapters live in kernel/; the brief domain lives
// in domains/brief/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
