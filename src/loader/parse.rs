//! Payload validation and record mapping.

use serde_json::Value;
use tracing::{debug, info};

use super::error::{LoadError, RecordIssue};
use crate::config::{FeedLayout, RecordPolicy};
use crate::model::{DocEntry, DocIndex};

/// Parse a raw response body into JSON.
pub fn parse_payload(body: &[u8]) -> Result<Value, LoadError> {
    Ok(serde_json::from_slice(body)?)
}

/// Build an index from a parsed payload.
///
/// The payload must be an object with `layout.records_field` holding an array.
/// Records lacking a usable title or path are skipped under
/// [`RecordPolicy::Lenient`] and abort the build under [`RecordPolicy::Strict`].
pub fn build_index(
    payload: &Value,
    layout: &FeedLayout,
    policy: RecordPolicy,
    source_url: &str,
    base_url: &str,
) -> Result<DocIndex, LoadError> {
    let records = payload
        .get(&layout.records_field)
        .and_then(Value::as_array)
        .ok_or_else(|| LoadError::Schema {
            field: layout.records_field.clone(),
        })?;

    let mut entries = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (position, record) in records.iter().enumerate() {
        match entry_from_record(record, layout) {
            Ok(entry) => entries.push(entry),
            Err(reason) => match policy {
                RecordPolicy::Strict => {
                    return Err(LoadError::InvalidRecord { position, reason });
                }
                RecordPolicy::Lenient => {
                    debug!(position, reason = %reason, "skipping record");
                    skipped += 1;
                }
            },
        }
    }

    if skipped > 0 {
        info!(
            kept = entries.len(),
            skipped, "records without title or path were excluded"
        );
    }

    Ok(DocIndex::new(source_url, base_url, entries))
}

fn entry_from_record(record: &Value, layout: &FeedLayout) -> Result<DocEntry, RecordIssue> {
    let object = record.as_object().ok_or(RecordIssue::NotAnObject)?;

    let field = |name: &str| -> Result<String, RecordIssue> {
        let value = object
            .get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| RecordIssue::MissingField(name.to_string()))?;
        let text = value
            .as_str()
            .ok_or_else(|| RecordIssue::WrongType(name.to_string()))?;
        if text.is_empty() {
            return Err(RecordIssue::EmptyField(name.to_string()));
        }
        Ok(text.to_string())
    };

    let title = field(&layout.title_field)?;
    let path = field(&layout.path_field)?;

    DocEntry::new(title, path).ok_or_else(|| RecordIssue::EmptyField(layout.title_field.clone()))
}
