//! Experience fan-out join
//!
//! Resolves each referenced experience through the (status = VERIFIED, id)
//! secondary index, one reference at a time. The whole batch is a single
//! result: the first query failure aborts the join and discards anything
//! already resolved. Partial success is never returned; a reference with no
//! VERIFIED match is silently omitted and is not an error.

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

use crate::db::stores::ExperienceStore;
use crate::types::Result;

/// Resolve all referenced experiences, in reference-id order.
///
/// The fan-out is sequential by design: one index query in flight at a time
/// bounds load on the store at the cost of linear latency in the number of
/// references.
pub async fn resolve_all(store: &dyn ExperienceStore, refs: &BTreeSet<String>) -> Result<Vec<Value>> {
    let mut resolved = Vec::with_capacity(refs.len());

    for reference in refs {
        let mut matches = store.query_verified(reference).await?;

        if matches.is_empty() {
            // Unverified or deleted experience: omitted, not an error
            debug!(experience_id = %reference, "No VERIFIED match, omitting from aggregation");
            continue;
        }

        // The index is expected to hold at most one VERIFIED record per id;
        // first-wins if the store ever returns more.
        resolved.push(matches.swap_remove(0));
    }

    Ok(resolved)
}
