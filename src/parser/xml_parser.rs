use crate::errors::{AppError, AppResult};
use crate::models::HealthRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Builds one record from the attributes of a `Record` element.
///
/// Attribute values are entity-unescaped. Attributes outside the known
/// vocabulary are ignored; a missing `type` is a parse error since every
/// downstream step keys on it.
fn record_from_attributes(element: &BytesStart) -> AppResult<HealthRecord> {
    let mut record_type = None;
    let mut creation_date = None;
    let mut start_date = None;
    let mut end_date = None;
    let mut value = None;
    let mut unit = None;
    let mut device = None;
    let mut source_name = None;
    let mut source_version = None;

    for attribute in element.attributes() {
        let attribute = attribute
            .map_err(|e| AppError::ParseError(format!("Malformed Record attribute: {e}")))?;
        let attribute_value = attribute
            .unescape_value()
            .map_err(|e| AppError::ParseError(format!("Failed to unescape attribute value: {e}")))?
            .into_owned();

        match attribute.key.as_ref() {
            b"type" => record_type = Some(attribute_value),
            b"creationDate" => creation_date = Some(attribute_value),
            b"startDate" => start_date = Some(attribute_value),
            b"endDate" => end_date = Some(attribute_value),
            b"value" => value = Some(attribute_value),
            b"unit" => unit = Some(attribute_value),
            b"device" => device = Some(attribute_value),
            b"sourceName" => source_name = Some(attribute_value),
            b"sourceVersion" => source_version = Some(attribute_value),
            _ => {}
        }
    }

    let record_type = record_type
        .ok_or_else(|| AppError::ParseError("Record element has no type attribute".to_string()))?;

    Ok(HealthRecord {
        record_type,
        creation_date,
        start_date,
        end_date,
        value,
        unit,
        device,
        source_name,
        source_version,
    })
}

/// Parses the export document at `path`.
///
/// Returns every `Record` element's attribute map in document order
/// (nested occurrences included) together with the distinct type
/// identifiers in first-seen order.
pub fn parse_health_export(path: &Path) -> AppResult<(Vec<HealthRecord>, Vec<String>)> {
    let file = File::open(path)
        .map_err(|e| AppError::IoError(format!("Failed to open export file {path:?}: {e}")))?;
    parse_records(Reader::from_reader(BufReader::new(file)))
}

/// Parses export content provided as bytes.
pub fn parse_health_export_bytes(content: &[u8]) -> AppResult<(Vec<HealthRecord>, Vec<String>)> {
    let cursor = Cursor::new(content);
    parse_records(Reader::from_reader(cursor))
}

fn parse_records<R: BufRead>(mut reader: Reader<R>) -> AppResult<(Vec<HealthRecord>, Vec<String>)> {
    reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(8192);
    let mut records = Vec::new();
    let mut record_types: Vec<String> = Vec::new();
    let mut saw_element = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                saw_element = true;
                if e.name().as_ref() == b"Record" {
                    let record = record_from_attributes(&e)?;
                    if !record_types.contains(&record.record_type) {
                        record_types.push(record.record_type.clone());
                    }
                    records.push(record);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_element {
        return Err(AppError::ParseError(
            "Document contains no element structure".to_string(),
        ));
    }

    Ok((records, record_types))
}
