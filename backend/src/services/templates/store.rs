//! Template list persistence and the cohort-exclusivity rule.
//!
//! The full template list lives as one JSON blob under `transcript_templates`
//! and is rewritten on every mutation (write-through). Loading applies the
//! document migrations, so callers always see the current schema. A corrupt
//! blob is logged and treated as an empty list rather than an error.

use chrono::Utc;
use common::migrate::migrate_document;
use common::model::document::Document;
use common::model::template::{Template, TemplateKind, TemplateMetaPatch};
use log::error;
use uuid::Uuid;

use crate::storage::BlobStore;

/// Blob key holding the full template list.
pub const TEMPLATES_KEY: &str = "transcript_templates";

/// Loads all templates, migrating each embedded document. Absence and parse
/// failure both yield an empty list; parse failure is logged.
pub fn load_templates(store: &dyn BlobStore) -> Vec<Template> {
    let raw = match store.load(TEMPLATES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!("failed to read saved templates: {}", e);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Template>>(&raw) {
        Ok(templates) => templates
            .into_iter()
            .map(|mut t| {
                t.data = migrate_document(&t.data);
                t
            })
            .collect(),
        Err(e) => {
            error!("failed to parse saved templates, starting empty: {}", e);
            Vec::new()
        }
    }
}

fn persist(store: &dyn BlobStore, templates: &[Template]) -> Result<(), String> {
    let raw = serde_json::to_string(templates).map_err(|e| e.to_string())?;
    store.save(TEMPLATES_KEY, &raw)
}

pub fn find_template(templates: &[Template], id: &str) -> Option<Template> {
    templates.iter().find(|t| t.id == id).cloned()
}

/// Creates a template with a fresh id, `types = [transcript]` and empty
/// mappings, and persists the updated list.
pub fn create_template(
    store: &dyn BlobStore,
    name: &str,
    data: &Document,
) -> Result<Template, String> {
    let mut templates = load_templates(store);
    let template = Template {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        last_modified: Utc::now().to_rfc3339(),
        types: vec![TemplateKind::Transcript],
        programs: Vec::new(),
        cohorts: Vec::new(),
        data: migrate_document(data),
    };
    templates.push(template.clone());
    persist(store, &templates)?;
    Ok(template)
}

/// Replaces name and data of an existing template, refreshing
/// `last_modified`. An unknown id is a silent no-op (`Ok(None)`): callers
/// derive ids from the store itself, so there is nothing to report.
pub fn update_template(
    store: &dyn BlobStore,
    id: &str,
    name: &str,
    data: &Document,
) -> Result<Option<Template>, String> {
    let mut templates = load_templates(store);
    let Some(target) = templates.iter_mut().find(|t| t.id == id) else {
        return Ok(None);
    };
    target.name = name.to_string();
    target.data = migrate_document(data);
    target.last_modified = Utc::now().to_rfc3339();
    let updated = target.clone();
    persist(store, &templates)?;
    Ok(Some(updated))
}

/// Merges mapping metadata into a template.
///
/// When the patch sets `cohorts`, the cohort-exclusivity invariant is
/// enforced: every other template loses any cohort now claimed by the
/// patched one, so a cohort value is held by at most one template at any
/// time. Unknown id is a silent no-op.
pub fn patch_template_meta(
    store: &dyn BlobStore,
    id: &str,
    patch: &TemplateMetaPatch,
) -> Result<Option<Template>, String> {
    let mut templates = load_templates(store);
    if !templates.iter().any(|t| t.id == id) {
        return Ok(None);
    }

    let mut claimed: Option<Vec<String>> = None;
    for template in &mut templates {
        if template.id != id {
            continue;
        }
        if let Some(types) = &patch.types {
            template.types = types.clone();
        }
        if let Some(programs) = &patch.programs {
            template.programs = programs.clone();
        }
        if let Some(cohorts) = &patch.cohorts {
            template.cohorts = cohorts.clone();
            claimed = Some(cohorts.clone());
        }
    }

    if let Some(claimed) = claimed {
        for template in &mut templates {
            if template.id != id {
                template.cohorts.retain(|c| !claimed.contains(c));
            }
        }
    }

    let updated = find_template(&templates, id);
    persist(store, &templates)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use common::defaults::seed_document;

    fn patch_cohorts(cohorts: &[&str]) -> TemplateMetaPatch {
        TemplateMetaPatch {
            cohorts: Some(cohorts.iter().map(|c| c.to_string()).collect()),
            ..TemplateMetaPatch::default()
        }
    }

    #[test]
    fn create_assigns_fresh_id_and_transcript_type() {
        let store = MemoryStore::default();
        let doc = seed_document();
        let a = create_template(&store, "Fall Design", &doc).unwrap();
        let b = create_template(&store, "Spring Design", &doc).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.types, vec![TemplateKind::Transcript]);
        assert!(a.programs.is_empty() && a.cohorts.is_empty());
        assert_eq!(load_templates(&store).len(), 2);
    }

    #[test]
    fn update_refreshes_name_and_data_and_noops_on_unknown_id() {
        let store = MemoryStore::default();
        let doc = seed_document();
        let created = create_template(&store, "Draft", &doc).unwrap();

        let mut edited = doc.clone();
        edited.header.document_title = "Final Transcript".to_string();
        let updated = update_template(&store, &created.id, "Final", &edited)
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Final");
        assert_eq!(updated.data.header.document_title, "Final Transcript");
        assert_eq!(updated.id, created.id);

        assert!(update_template(&store, "no-such-id", "x", &doc)
            .unwrap()
            .is_none());
        assert_eq!(load_templates(&store).len(), 1);
    }

    #[test]
    fn patching_cohorts_strips_them_from_every_other_template() {
        let store = MemoryStore::default();
        let doc = seed_document();
        let a = create_template(&store, "A", &doc).unwrap();
        let b = create_template(&store, "B", &doc).unwrap();

        patch_template_meta(&store, &a.id, &patch_cohorts(&["Class of 2025"])).unwrap();
        patch_template_meta(
            &store,
            &b.id,
            &patch_cohorts(&["Class of 2025", "Class of 2026"]),
        )
        .unwrap();

        let templates = load_templates(&store);
        let a = find_template(&templates, &a.id).unwrap();
        let b = find_template(&templates, &b.id).unwrap();
        assert!(a.cohorts.is_empty());
        assert_eq!(b.cohorts, vec!["Class of 2025", "Class of 2026"]);
    }

    #[test]
    fn cohort_union_stays_duplicate_free_across_patch_sequences() {
        let store = MemoryStore::default();
        let doc = seed_document();
        let ids: Vec<String> = (0..3)
            .map(|i| create_template(&store, &format!("T{}", i), &doc).unwrap().id)
            .collect();

        let sequence = [
            (0, vec!["c1", "c2"]),
            (1, vec!["c2", "c3"]),
            (2, vec!["c1", "c3"]),
            (0, vec!["c3"]),
        ];
        for (idx, cohorts) in &sequence {
            patch_template_meta(&store, &ids[*idx], &patch_cohorts(cohorts)).unwrap();
            let mut seen = std::collections::HashSet::new();
            for template in load_templates(&store) {
                for cohort in &template.cohorts {
                    assert!(seen.insert(cohort.clone()), "cohort {} claimed twice", cohort);
                }
            }
        }
    }

    #[test]
    fn patch_without_cohorts_leaves_other_templates_alone() {
        let store = MemoryStore::default();
        let doc = seed_document();
        let a = create_template(&store, "A", &doc).unwrap();
        let b = create_template(&store, "B", &doc).unwrap();
        patch_template_meta(&store, &a.id, &patch_cohorts(&["c1"])).unwrap();

        let patch = TemplateMetaPatch {
            programs: Some(vec!["UG Programme".to_string()]),
            types: Some(vec![TemplateKind::TermReport]),
            ..TemplateMetaPatch::default()
        };
        let patched = patch_template_meta(&store, &b.id, &patch).unwrap().unwrap();
        assert_eq!(patched.programs, vec!["UG Programme"]);
        assert_eq!(patched.types, vec![TemplateKind::TermReport]);

        let a = find_template(&load_templates(&store), &a.id).unwrap();
        assert_eq!(a.cohorts, vec!["c1"]);
    }

    #[test]
    fn corrupt_blob_degrades_to_empty_list() {
        let store = MemoryStore::default();
        store.save(TEMPLATES_KEY, "not json at all").unwrap();
        assert!(load_templates(&store).is_empty());
        // and the store recovers on the next write
        create_template(&store, "Fresh", &seed_document()).unwrap();
        assert_eq!(load_templates(&store).len(), 1);
    }

    #[test]
    fn loading_migrates_embedded_documents() {
        let store = MemoryStore::default();
        let mut doc = seed_document();
        doc.summary_config.sections.truncate(1);
        // persist a raw list bypassing create_template's own migration
        let template = Template {
            id: "t1".to_string(),
            name: "Old".to_string(),
            last_modified: Utc::now().to_rfc3339(),
            types: vec![TemplateKind::Transcript],
            programs: Vec::new(),
            cohorts: Vec::new(),
            data: doc,
        };
        store
            .save(TEMPLATES_KEY, &serde_json::to_string(&vec![template]).unwrap())
            .unwrap();

        let loaded = load_templates(&store);
        assert_eq!(loaded[0].data.summary_config.sections.len(), 3);
    }
}
