//! Invoice interpretation: cache consult, first-page token extraction,
//! LLM submission, defensive JSON mapping, cache store.

use std::path::Path;

use tracing::{debug, info_span, warn};

use crate::cache::InvoiceCache;
use crate::error::InterpretError;
use crate::extract::{render_token_list, TokenSource};
use crate::llm::{ChatCompletion, SYSTEM_PROMPT};
use crate::model::InvoiceInfo;

pub struct InvoiceInterpreter {
    cache: InvoiceCache,
    tokens: Box<dyn TokenSource>,
    llm: Box<dyn ChatCompletion>,
}

impl InvoiceInterpreter {
    pub fn new(tokens: Box<dyn TokenSource>, llm: Box<dyn ChatCompletion>) -> Self {
        Self {
            cache: InvoiceCache::new(),
            tokens,
            llm,
        }
    }

    /// Produces the normalized record for one source file. A cache hit
    /// returns immediately with no external call; a miss runs extraction and
    /// interpretation, then persists the result before returning.
    pub fn interpret(&self, path: &Path) -> Result<InvoiceInfo, InterpretError> {
        let _span = info_span!("interpret", file = %path.display()).entered();

        if let Some(cached) = self.cache.lookup(path) {
            debug!("Serving {} from cache", path.display());
            return Ok(cached);
        }

        let page = self.tokens.first_page(path)?;
        let payload = render_token_list(&page.tokens);
        let response = self.llm.complete_json(SYSTEM_PROMPT, &payload)?;
        let info = parse_response(&response)?;

        // A failed store never invalidates the freshly interpreted record.
        if let Err(e) = self.cache.store(path, &info) {
            warn!(
                "Failed to persist cache entry for {}: {}",
                path.display(),
                e
            );
        }

        Ok(info)
    }
}

/// Parses the LLM response body into a record. Fenced ```json blocks are
/// unwrapped first; any key missing from the JSON maps to the field's
/// default rather than an error.
fn parse_response(response: &str) -> Result<InvoiceInfo, InterpretError> {
    let body = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if body.is_empty() {
        return Err(InterpretError::EmptyResponse);
    }

    serde_json::from_str(body).map_err(InterpretError::MalformedResponse)
}
