use crate::errors::AppResult;
use crate::models::Vocabulary;
use polars::prelude::*;

/// Returns the rows of one type as an independent table.
///
/// The `type` column is removed (constant within a partition). When the
/// raw identifier carries the category prefix the `unit` column is
/// removed too, since category-typed records never populate it
/// meaningfully. Zero matching rows is a valid, empty result. The source
/// table is left untouched.
pub fn partition_by_type(
    table: &DataFrame,
    type_identifier: &str,
    vocabulary: &Vocabulary,
) -> AppResult<DataFrame> {
    let mask = table.column("type")?.str()?.equal(type_identifier);
    let mut partition = table.filter(&mask)?.drop("type")?;
    if vocabulary.is_category_type(type_identifier) {
        partition = partition.drop("unit")?;
    }
    Ok(partition)
}
