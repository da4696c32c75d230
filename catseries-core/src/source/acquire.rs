//! Acquisition barrier — fetch the three sources concurrently and continue
//! only when all of them arrived.

use super::provider::{FetchError, RawPayloads, SourceProvider};
use crate::domain::SourceId;
use crate::pipeline::PipelineError;
use serde_json::Value;
use tracing::{debug, warn};

/// Fetch A, B and C in parallel and join them.
///
/// All-or-nothing: if any fetch fails no payload is returned. When several
/// fail, the error reported is the first in source order (A, B, C).
pub fn acquire<P: SourceProvider + ?Sized>(provider: &P) -> Result<RawPayloads, PipelineError> {
    let (a, (b, c)) = rayon::join(
        || provider.fetch(SourceId::A),
        || {
            rayon::join(
                || provider.fetch(SourceId::B),
                || provider.fetch(SourceId::C),
            )
        },
    );

    let payloads = RawPayloads {
        a: checked(provider, SourceId::A, a)?,
        b: checked(provider, SourceId::B, b)?,
        c: checked(provider, SourceId::C, c)?,
    };

    debug!(
        provider = provider.name(),
        a = payloads.a.len(),
        b = payloads.b.len(),
        c = payloads.c.len(),
        "acquired all sources"
    );
    Ok(payloads)
}

fn checked<P: SourceProvider + ?Sized>(
    provider: &P,
    origin: SourceId,
    result: Result<Vec<Value>, FetchError>,
) -> Result<Vec<Value>, PipelineError> {
    result.map_err(|error| {
        warn!(provider = provider.name(), %origin, %error, "source fetch failed");
        PipelineError::FetchFailure { origin, error }
    })
}
