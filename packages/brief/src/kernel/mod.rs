//! Kernel module - infrastructure adapters and dependencies.

pub mod deps;
pub mod docs_sink;
pub mod link_checker;
pub mod llm_request;
pub mod smtp_mailer;
pub mod tavily_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::BriefDeps;
pub use docs_sink::DocsDirSink;
pub use link_checker::HttpLinkChecker;
pub use smtp_mailer::{NoopMailer, SmtpMailer};
pub use tavily_client::{NoopSearchService, TavilyClient};
pub use test_dependencies::TestDependencies;
pub use traits::*;
