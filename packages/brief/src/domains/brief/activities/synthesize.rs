//! Synthesis activity: turn sources into a Brief through the AI provider.
//!
//! The provider is tried through an ordered chain of attempts (every model
//! candidate, each through the Responses endpoint and then Chat
//! Completions). The first reply that parses as a Brief wins.

use anyhow::{Context, Result};
use openai_client::strip_code_blocks;
use serde_json::Value;
use tracing::{info, warn};

use crate::domains::brief::models::{Acquisition, Brief, BriefType};
use crate::domains::brief::placeholders::{no_results_brief, placeholder_brief};
use crate::domains::brief::prompts::{system_prompt, user_prompt};
use crate::kernel::{BriefDeps, CallShape, SynthesisAttempt};

/// Synthesis policy, taken from configuration.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub models: Vec<String>,
    pub require_live_result: bool,
}

/// Every model × [Responses, ChatCompletions], in order.
pub fn synthesis_attempts(models: &[String]) -> Vec<SynthesisAttempt> {
    models
        .iter()
        .flat_map(|model| {
            [CallShape::Responses, CallShape::ChatCompletions]
                .into_iter()
                .map(move |shape| SynthesisAttempt::new(model.clone(), shape))
        })
        .collect()
}

/// Produce the run's Brief. `type`, `title` and `run_date` are filled on
/// every path.
pub async fn synthesize_brief(
    brief_type: BriefType,
    run_date: &str,
    acquisition: &Acquisition,
    options: &SynthesisOptions,
    deps: &BriefDeps,
) -> Result<Brief> {
    if *acquisition == Acquisition::NoResults {
        info!("No material search results; publishing the no-results brief");
        return Ok(no_results_brief(brief_type, run_date));
    }

    let Some(ai) = &deps.ai else {
        if options.require_live_result {
            anyhow::bail!("REQUIRE_LIVE_RESULT is set but OPENAI_API_KEY is missing");
        }
        info!("OPENAI_API_KEY not set; publishing the placeholder brief");
        return Ok(placeholder_brief(brief_type, run_date));
    };

    let system = system_prompt(brief_type);
    let user = user_prompt(brief_type, run_date, acquisition.sources());
    let mut last_error = None;

    for attempt in synthesis_attempts(&options.models) {
        let result = ai
            .complete_json(&attempt, &system, &user)
            .await
            .and_then(|raw| parse_brief(&raw));
        match result {
            Ok(mut brief) => {
                info!(model = %attempt.model, shape = %attempt.shape, "Synthesis succeeded");
                brief.fill_defaults(brief_type, run_date);
                return Ok(brief);
            }
            Err(e) => {
                warn!(model = %attempt.model, shape = %attempt.shape, error = %e, "Synthesis attempt failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if options.require_live_result => Err(e.context("Every synthesis attempt failed")),
        Some(_) => {
            warn!("Every synthesis attempt failed; publishing the placeholder brief");
            Ok(placeholder_brief(brief_type, run_date))
        }
        None => {
            if options.require_live_result {
                anyhow::bail!("No synthesis attempts configured");
            }
            Ok(placeholder_brief(brief_type, run_date))
        }
    }
}

/// Parse a provider reply into a Brief.
///
/// Code fences are stripped first. If the reply still is not JSON, the
/// outermost `{...}` slice is tried. `null` values are pruned so defaults
/// apply, and an unrecognized `type` is dropped.
pub fn parse_brief(raw: &str) -> Result<Brief> {
    let text = strip_code_blocks(raw);
    let mut value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(first_error) => {
            let slice = outermost_object(text).ok_or(first_error).context("Reply is not JSON")?;
            serde_json::from_str(slice).context("Reply contains malformed JSON")?
        }
    };

    let Some(object) = value.as_object_mut() else {
        anyhow::bail!("Reply is JSON but not an object");
    };
    let recognized = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(BriefType::parse);
    match recognized {
        Some(kind) => {
            object.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        }
        None => {
            object.remove("type");
        }
    }

    prune_nulls(&mut value);
    serde_json::from_value(value).context("Reply does not match the brief schema")
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(prune_nulls);
        }
        _ => {}
    }
}
