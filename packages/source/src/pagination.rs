//! Offset pagination over a [`PageSource`].
//!
//! Pagination is best-effort: any page error ends the loop and whatever was
//! gathered so far is returned.

use std::sync::Arc;

use crime_watch_source_models::RawTable;

use crate::progress::ProgressCallback;
use crate::{FetchOptions, PageRequest, PageSource};

/// Fetches pages sequentially from offset 0 and concatenates them.
///
/// Stops when a page comes back short or empty, when `max_records` have
/// been requested, or when a page fails. A failed page is logged and
/// treated as the end of the data.
pub async fn fetch_raw_table(
    source: &dyn PageSource,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> RawTable {
    let mut table = RawTable::new();

    if options.page_size == 0 {
        log::warn!("[{}] Page size is 0, nothing to fetch", source.label());
        return table;
    }

    progress.set_total(options.max_records);
    let mut offset: u64 = 0;

    loop {
        let remaining = options.max_records.saturating_sub(offset);
        if remaining == 0 {
            log::info!(
                "[{}] Reached limit of {} records",
                source.label(),
                options.max_records
            );
            break;
        }
        let limit = remaining.min(options.page_size);

        let request = PageRequest {
            window_start: options.window_start,
            window_end: options.window_end,
            offset,
            limit,
        };

        log::info!(
            "[{}] Fetching page: offset={offset}, limit={limit}",
            source.label()
        );
        let records = match source.fetch_page(&request).await {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "[{}] Page at offset {offset} failed, keeping {} records fetched so far: {e}",
                    source.label(),
                    table.len()
                );
                break;
            }
        };

        let count = records.len() as u64;
        if count == 0 {
            break;
        }

        table.push_page(records);
        progress.inc(count);
        progress.set_message(format!("{}: {} records", source.label(), table.len()));

        if count < limit {
            break;
        }

        offset += options.page_size;
    }

    log::info!(
        "[{}] Downloaded {} records total",
        source.label(),
        table.len()
    );
    progress.finish(format!("{}: {} records", source.label(), table.len()));

    table
}
