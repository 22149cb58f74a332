use crate::db::ReadingStore;
use crate::errors::Result;
use crate::model::{DisplayRow, Pagination, ReadingsPage};
use tracing::debug;

/// Counts the readings, resolves the requested page and loads its rows
/// converted for display.
pub async fn load_page<S: ReadingStore>(
    store: &mut S,
    page_size: i64,
    requested: Option<i64>,
) -> Result<ReadingsPage> {
    let total = store.count().await?;
    let pagination = Pagination::resolve(total, page_size, requested);

    debug!(
        "Page {} of {} ({} readings), offset {}",
        pagination.page, pagination.pages, total, pagination.offset
    );

    if pagination.is_empty() {
        return Ok(ReadingsPage {
            pagination,
            rows: Vec::new(),
        });
    }

    let readings = store
        .fetch_page(pagination.limit(), pagination.offset)
        .await?;
    let rows = readings.iter().map(DisplayRow::from).collect();

    Ok(ReadingsPage { pagination, rows })
}
