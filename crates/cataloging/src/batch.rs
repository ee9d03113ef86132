//! Per-key item building with failure isolation.

use tracing::{info, warn};

use stac_common::BatchReport;
use stac_protocol::Item;

use crate::item::create_stac_item;

/// Build one item per key. Keys that fail are recorded, never fatal.
pub fn build_items<I, S>(keys: I, base_url: &str) -> BatchReport<Item>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = BatchReport::new();
    for key in keys {
        let key = key.as_ref();
        let outcome = create_stac_item(key, base_url);
        if let Err(e) = &outcome {
            warn!(key = %key, error = %e, kind = e.kind(), "Skipping key");
        }
        report.record(key, outcome);
    }

    info!(
        built = report.succeeded.len(),
        failed = report.failed.len(),
        "Built items"
    );
    report
}
