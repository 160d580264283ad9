use crate::domain::errors::OutlineResult;
use crate::domain::models::OutlineDocument;

/// Full-fidelity pretty JSON of the document
pub fn render_json(document: &OutlineDocument) -> OutlineResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
