//! Load-boundary schema upgrades for saved documents.
//!
//! Two upgrades exist, both idempotent so they can run on every load:
//!
//! 1. Summary-section backfill: well-known sections added since a document
//!    was saved are appended, keyed by section `id`. Existing sections keep
//!    their customizations and their order.
//! 2. Missing `tableConfigs` (documents saved before per-table column
//!    configuration existed) receive the canonical default. This one lives
//!    at the serde boundary (`#[serde(default)]` on `Document::table_configs`)
//!    since the typed model cannot represent the field's absence.

use std::collections::HashSet;

use crate::defaults::default_summary_sections;
use crate::model::document::Document;

/// Appends canonical summary sections missing from the document. Existing
/// sections, customized or not, are never overwritten or reordered.
pub fn migrate_document(doc: &Document) -> Document {
    let mut next = doc.clone();
    let present: HashSet<String> = next
        .summary_config
        .sections
        .iter()
        .map(|s| s.id.clone())
        .collect();
    for section in default_summary_sections() {
        if !present.contains(&section.id) {
            next.summary_config.sections.push(section);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::seed_document;

    #[test]
    fn backfills_missing_sections_after_existing_ones() {
        let mut doc = seed_document();
        doc.summary_config.sections.retain(|s| s.id != "overall-default");
        let migrated = migrate_document(&doc);
        let ids: Vec<&str> = migrated
            .summary_config
            .sections
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["inclass-default", "outclass-default", "overall-default"]);
    }

    #[test]
    fn preserves_customizations_on_existing_sections() {
        let mut doc = seed_document();
        doc.summary_config.sections.retain(|s| s.id == "inclass-default");
        doc.summary_config.sections[0].cgpa_label = "My Custom CGPA".to_string();
        doc.summary_config.sections[0].is_visible = false;

        let migrated = migrate_document(&doc);
        let inclass = migrated
            .summary_config
            .sections
            .iter()
            .find(|s| s.id == "inclass-default")
            .unwrap();
        assert_eq!(inclass.cgpa_label, "My Custom CGPA");
        assert!(!inclass.is_visible);
        assert_eq!(migrated.summary_config.sections.len(), 3);
    }

    #[test]
    fn migration_is_idempotent() {
        let mut doc = seed_document();
        doc.summary_config.sections.truncate(1);
        let once = migrate_document(&doc);
        let twice = migrate_document(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn legacy_document_without_table_configs_gains_defaults() {
        let mut value = serde_json::to_value(seed_document()).unwrap();
        value.as_object_mut().unwrap().remove("tableConfigs");
        value.as_object_mut().unwrap().remove("isUnifiedTables");
        let doc: Document = serde_json::from_value(value).unwrap();
        assert_eq!(doc.table_configs, crate::defaults::default_table_configs());
        assert!(!doc.is_unified_tables);
    }

    #[test]
    fn wire_shape_uses_documented_keys() {
        let json = serde_json::to_value(seed_document()).unwrap();
        let table = &json["tableConfigs"]["inClass"];
        assert_eq!(table["showGPA"], true);
        assert_eq!(table["format"], "grid");
        let section = &json["summaryConfig"]["sections"][0];
        assert_eq!(section["showCGPA"], true);
        assert_eq!(section["type"], "InClass");
        assert_eq!(json["courseData"][0]["type"], "InClass");
    }
}
