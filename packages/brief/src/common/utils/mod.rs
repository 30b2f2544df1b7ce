pub mod content;
pub mod dedupe;

pub use content::truncate_text;
pub use dedupe::{host_key, normalize_title, url_key};
