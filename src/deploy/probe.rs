// ABOUTME: Image existence probe against the local runtime.
// ABOUTME: Lenient by contract: probe errors can only cause a rebuild, never a failed deploy.

use crate::runtime::Engine;
use crate::types::ImageRef;

/// Outcome of probing one image reference. Errors do not appear here; a
/// probe that cannot answer reports NotFound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Found,
    NotFound,
}

/// Ask the runtime whether a reference resolves locally. Read-only; any
/// runtime error (daemon unreachable, malformed reference) is coerced to
/// NotFound and logged at debug.
pub async fn probe_image(engine: &dyn Engine, reference: &ImageRef) -> ProbeResult {
    match engine.image_exists(reference).await {
        Ok(true) => ProbeResult::Found,
        Ok(false) => ProbeResult::NotFound,
        Err(e) => {
            tracing::debug!("image probe failed for {reference}: {e}");
            ProbeResult::NotFound
        }
    }
}
