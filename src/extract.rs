use crate::driver::PageElement;
use crate::error::Result;
use crate::models::{CollectionTarget, Record};

/// Turns one table row into a record, or `None` for rows that are not
/// fully rendered yet.
///
/// A row is dropped when it has fewer than `required_min_columns` cells or
/// when a mapped column index is past the last cell. Cell text is trimmed
/// and otherwise stored as displayed.
pub fn extract_row<S: AsRef<str>>(cells: &[S], target: &CollectionTarget) -> Option<Record> {
    if cells.len() < target.required_min_columns {
        return None;
    }

    let mut record = Record::new();
    for (index, field) in &target.columns {
        let cell = cells.get(*index)?;
        record.insert(field.as_str(), cell.as_ref().trim());
    }
    Some(record)
}

/// Reads the text of every cell under `row`.
pub async fn read_cells<E: PageElement>(row: &E, cell_selector: &str) -> Result<Vec<String>> {
    let cells = row.find_all(cell_selector).await?;
    let mut texts = Vec::with_capacity(cells.len());
    for cell in &cells {
        texts.push(cell.text().await?);
    }
    Ok(texts)
}
