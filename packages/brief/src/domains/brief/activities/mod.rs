//! Brief activities - the steps of a run.

pub mod acquire;
pub mod normalize;
pub mod publish;
pub mod render;
pub mod run;
pub mod synthesize;
pub mod verify;

pub use acquire::{dedupe_sources, gather_sources, MAX_SOURCES, TOPIC_QUERIES};
pub use normalize::{normalize_brief, NormalizeOptions, EMPTY_BODY};
pub use publish::{email_subject, publish_brief, render_page, write_debug_snapshot, PublishOutcome};
pub use render::render_structured;
pub use run::{run_brief, RunReport};
pub use synthesize::{parse_brief, synthesis_attempts, synthesize_brief, SynthesisOptions};
pub use verify::{check_page, verify_published, VerifyReport, ALLOWED_HREF_PREFIXES};
