use crate::errors::AppResult;
use crate::models::Vocabulary;
use polars::prelude::*;

/// Joins systolic and diastolic readings into one row per shared
/// `creationDate`.
///
/// Inner join semantics: a reading without a counterpart at the exact
/// same `creationDate` is silently dropped. Unmatched single-cuff
/// readings are deliberately not reported; callers wanting them must go
/// through the per-type partitions instead. The merged row keeps the
/// systolic side's date span and remaining columns; the diastolic side
/// contributes only its `value`. The two value columns are renamed
/// `valueSystolic` and `valueDiastolic`; `type` and `unit` are dropped
/// from both sides.
pub fn correlate_blood_pressure(
    table: &DataFrame,
    vocabulary: &Vocabulary,
) -> AppResult<DataFrame> {
    let systolic = reading_side(table, &vocabulary.systolic_type)?;
    let diastolic = reading_side(table, &vocabulary.diastolic_type)?
        .select(["creationDate", "value"])?;

    let mut args = JoinArgs::new(JoinType::Inner);
    args.suffix = Some("Diastolic".to_string());
    let mut merged = systolic.join(&diastolic, ["creationDate"], ["creationDate"], args)?;

    // The left value column keeps its name through the join; the right
    // one collides and receives the suffix, becoming valueDiastolic.
    merged.rename("value", "valueSystolic")?;

    Ok(merged)
}

/// One side of the join: rows of a single blood pressure type, without
/// the constant `type` column and without `unit` (the merged row carries
/// two bare values).
fn reading_side(table: &DataFrame, type_identifier: &str) -> AppResult<DataFrame> {
    let mask = table.column("type")?.str()?.equal(type_identifier);
    let side = table.filter(&mask)?.drop("type")?.drop("unit")?;
    Ok(side)
}
