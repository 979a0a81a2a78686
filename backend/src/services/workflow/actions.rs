//! The simulated workflow actions.
//!
//! Each action reads the snapshot for its (program, cohort), consults a
//! capability port, persists the updated snapshot, and appends an audit
//! record. Generation actions are gated on a template whose types, programs
//! and cohorts all match the selection; when none does, the action aborts
//! with a user-facing message and no state change.

use chrono::Utc;
use common::model::template::{Template, TemplateKind};
use common::model::workflow::{
    AggregateGpa, AuditAction, AuditRecord, CohortKey, TermCalculation, WorkflowSnapshot,
};

use crate::services::templates::store::load_templates;
use crate::services::workflow::scoring::{DocumentGenerator, ScoringService};
use crate::services::workflow::state::{append_audit, load_snapshot, save_snapshot};
use crate::storage::BlobStore;

/// The first template applying to the given action for the selection, if
/// any.
pub fn matching_template<'a>(
    templates: &'a [Template],
    kind: TemplateKind,
    key: &CohortKey,
) -> Option<&'a Template> {
    templates
        .iter()
        .find(|t| t.matches(kind, &key.program, &key.cohort))
}

/// The blocking message surfaced when no template is mapped.
pub fn missing_template_message(kind: TemplateKind, key: &CohortKey) -> String {
    let label = match kind {
        TemplateKind::Transcript => "transcript",
        TemplateKind::TermReport => "term-report",
    };
    format!(
        "No {} template is mapped to program \"{}\" and cohort \"{}\". Map a template on the dashboard first.",
        label, key.program, key.cohort
    )
}

fn record(key: &CohortKey, action: AuditAction, actor: &str, details: String) -> AuditRecord {
    AuditRecord {
        timestamp: Utc::now().to_rfc3339(),
        program: key.program.clone(),
        cohort: key.cohort.clone(),
        action,
        actor: actor.to_string(),
        details: Some(details),
    }
}

/// Recomputes the aggregate: the mean of all calculated term values, labeled
/// as running "through" the last term in calculation order.
fn recompute_aggregate(snapshot: &mut WorkflowSnapshot) {
    snapshot.aggregate = match snapshot.calculations.last() {
        Some(last) => {
            let sum: f64 = snapshot.calculations.iter().map(|c| c.gpa).sum();
            Some(AggregateGpa {
                gpa: sum / snapshot.calculations.len() as f64,
                through_term: last.term_id.clone(),
            })
        }
        None => None,
    };
}

/// Scores one term and folds the result into the snapshot. Recalculating an
/// already-calculated term updates it in place, keeping its position in
/// calculation order.
pub async fn run_calculation(
    store: &dyn BlobStore,
    scoring: &dyn ScoringService,
    key: &CohortKey,
    term_id: &str,
    actor: &str,
) -> Result<WorkflowSnapshot, String> {
    let gpa = scoring.score_term(key, term_id).await?;
    let calculated_at = Utc::now().to_rfc3339();

    let mut snapshot = load_snapshot(store, key);
    match snapshot.calculations.iter_mut().find(|c| c.term_id == term_id) {
        Some(existing) => {
            existing.gpa = gpa;
            existing.calculated_at = calculated_at;
        }
        None => snapshot.calculations.push(TermCalculation {
            term_id: term_id.to_string(),
            gpa,
            calculated_at,
        }),
    }
    recompute_aggregate(&mut snapshot);
    save_snapshot(store, key, &snapshot)?;
    append_audit(
        store,
        record(
            key,
            AuditAction::CalculateGpa,
            actor,
            format!("term {} scored {:.2}", term_id, gpa),
        ),
    )?;
    Ok(snapshot)
}

/// Generates a term report, gated on a mapped term-report template.
pub async fn run_term_report(
    store: &dyn BlobStore,
    generator: &dyn DocumentGenerator,
    key: &CohortKey,
    term_id: &str,
    actor: &str,
) -> Result<WorkflowSnapshot, String> {
    let templates = load_templates(store);
    let template = matching_template(&templates, TemplateKind::TermReport, key)
        .ok_or_else(|| missing_template_message(TemplateKind::TermReport, key))?;
    generator.generate_term_report(template, key, term_id).await?;

    let mut snapshot = load_snapshot(store, key);
    if !snapshot.reports_generated.iter().any(|t| t == term_id) {
        snapshot.reports_generated.push(term_id.to_string());
    }
    save_snapshot(store, key, &snapshot)?;
    append_audit(
        store,
        record(
            key,
            AuditAction::GenerateTermReport,
            actor,
            format!("term {} via template \"{}\"", term_id, template.name),
        ),
    )?;
    Ok(snapshot)
}

/// Generates the final document, gated on a mapped transcript template.
pub async fn run_final_document(
    store: &dyn BlobStore,
    generator: &dyn DocumentGenerator,
    key: &CohortKey,
    actor: &str,
) -> Result<WorkflowSnapshot, String> {
    let templates = load_templates(store);
    let template = matching_template(&templates, TemplateKind::Transcript, key)
        .ok_or_else(|| missing_template_message(TemplateKind::Transcript, key))?;
    generator.generate_final_document(template, key).await?;

    let mut snapshot = load_snapshot(store, key);
    snapshot.final_generated = true;
    save_snapshot(store, key, &snapshot)?;
    append_audit(
        store,
        record(
            key,
            AuditAction::GenerateFinalDocument,
            actor,
            format!("via template \"{}\"", template.name),
        ),
    )?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::templates::store::{create_template, patch_template_meta};
    use crate::services::workflow::state::load_audit_log;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use common::defaults::seed_document;
    use common::model::template::TemplateMetaPatch;

    struct FixedScoring(f64);

    #[async_trait]
    impl ScoringService for FixedScoring {
        async fn score_term(&self, _key: &CohortKey, _term_id: &str) -> Result<f64, String> {
            Ok(self.0)
        }
    }

    struct NoopGenerator;

    #[async_trait]
    impl DocumentGenerator for NoopGenerator {
        async fn generate_term_report(
            &self,
            _template: &Template,
            _key: &CohortKey,
            _term_id: &str,
        ) -> Result<(), String> {
            Ok(())
        }

        async fn generate_final_document(
            &self,
            _template: &Template,
            _key: &CohortKey,
        ) -> Result<(), String> {
            Ok(())
        }
    }

    fn key() -> CohortKey {
        CohortKey::new("UG Programme", "Class of 2025")
    }

    fn map_template(store: &MemoryStore, types: Vec<TemplateKind>) -> Template {
        let template = create_template(store, "Mapped", &seed_document()).unwrap();
        patch_template_meta(
            store,
            &template.id,
            &TemplateMetaPatch {
                types: Some(types),
                programs: Some(vec!["UG Programme".to_string()]),
                cohorts: Some(vec!["Class of 2025".to_string()]),
            },
        )
        .unwrap()
        .unwrap()
    }

    #[tokio::test]
    async fn calculation_records_term_and_aggregate() {
        let store = MemoryStore::default();
        let snapshot = run_calculation(&store, &FixedScoring(3.5), &key(), "term-1", "tester")
            .await
            .unwrap();
        assert_eq!(snapshot.calculations.len(), 1);
        assert_eq!(snapshot.calculations[0].term_id, "term-1");
        let aggregate = snapshot.aggregate.unwrap();
        assert!((aggregate.gpa - 3.5).abs() < 1e-9);
        assert_eq!(aggregate.through_term, "term-1");
    }

    #[tokio::test]
    async fn aggregate_is_mean_and_through_term_follows_calculation_order() {
        let store = MemoryStore::default();
        run_calculation(&store, &FixedScoring(3.0), &key(), "term-2", "tester")
            .await
            .unwrap();
        let snapshot = run_calculation(&store, &FixedScoring(4.0), &key(), "term-1", "tester")
            .await
            .unwrap();
        let aggregate = snapshot.aggregate.clone().unwrap();
        assert!((aggregate.gpa - 3.5).abs() < 1e-9);
        // term-1 was calculated last, so it is the "through" label even
        // though term-2 is chronologically later
        assert_eq!(aggregate.through_term, "term-1");

        // recalculating term-2 keeps its position in calculation order
        let snapshot = run_calculation(&store, &FixedScoring(3.2), &key(), "term-2", "tester")
            .await
            .unwrap();
        assert_eq!(snapshot.calculations[0].term_id, "term-2");
        assert_eq!(snapshot.aggregate.unwrap().through_term, "term-1");
    }

    #[tokio::test]
    async fn snapshot_persists_across_loads() {
        let store = MemoryStore::default();
        run_calculation(&store, &FixedScoring(3.1), &key(), "term-1", "tester")
            .await
            .unwrap();
        let reloaded = load_snapshot(&store, &key());
        assert_eq!(reloaded.calculations.len(), 1);
        assert!(reloaded.calculation("term-1").is_some());
    }

    #[tokio::test]
    async fn report_without_mapped_template_is_rejected_with_no_state_change() {
        let store = MemoryStore::default();
        // a transcript-only template must not satisfy the term-report gate
        map_template(&store, vec![TemplateKind::Transcript]);

        let before = load_snapshot(&store, &key());
        let err = run_term_report(&store, &NoopGenerator, &key(), "term-1", "tester")
            .await
            .unwrap_err();
        assert!(err.contains("term-report"));
        assert!(err.contains("Class of 2025"));
        assert_eq!(load_snapshot(&store, &key()), before);
        assert!(load_audit_log(&store).is_empty());
    }

    #[tokio::test]
    async fn report_with_mapped_template_marks_the_term() {
        let store = MemoryStore::default();
        map_template(&store, vec![TemplateKind::TermReport]);
        let snapshot = run_term_report(&store, &NoopGenerator, &key(), "term-1", "tester")
            .await
            .unwrap();
        assert_eq!(snapshot.reports_generated, vec!["term-1"]);

        // repeat generation does not duplicate the entry
        let snapshot = run_term_report(&store, &NoopGenerator, &key(), "term-1", "tester")
            .await
            .unwrap();
        assert_eq!(snapshot.reports_generated, vec!["term-1"]);
    }

    #[tokio::test]
    async fn final_document_requires_a_transcript_template() {
        let store = MemoryStore::default();
        let err = run_final_document(&store, &NoopGenerator, &key(), "tester")
            .await
            .unwrap_err();
        assert!(err.contains("transcript"));

        map_template(&store, vec![TemplateKind::Transcript]);
        let snapshot = run_final_document(&store, &NoopGenerator, &key(), "tester")
            .await
            .unwrap();
        assert!(snapshot.final_generated);
    }

    #[tokio::test]
    async fn every_state_change_appends_an_audit_record() {
        let store = MemoryStore::default();
        map_template(
            &store,
            vec![TemplateKind::Transcript, TemplateKind::TermReport],
        );
        run_calculation(&store, &FixedScoring(3.4), &key(), "term-1", "tester")
            .await
            .unwrap();
        run_term_report(&store, &NoopGenerator, &key(), "term-1", "tester")
            .await
            .unwrap();
        run_final_document(&store, &NoopGenerator, &key(), "tester")
            .await
            .unwrap();

        let log = load_audit_log(&store);
        let actions: Vec<AuditAction> = log.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::CalculateGpa,
                AuditAction::GenerateTermReport,
                AuditAction::GenerateFinalDocument,
            ]
        );
        assert!(log.iter().all(|r| r.actor == "tester"));
        assert!(log.iter().all(|r| r.program == "UG Programme"));
    }
}
