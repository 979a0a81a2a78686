//! Capability ports for the simulated computations.
//!
//! Grade scoring and document generation are external concerns; the designer
//! only needs something that answers. The production wiring uses the mock
//! implementations below (a fixed artificial delay, then a uniform random
//! GPA or an unconditional success). Tests substitute deterministic fakes.

use std::time::Duration;

use async_trait::async_trait;
use common::model::template::Template;
use common::model::workflow::CohortKey;
use rand::Rng;

/// Produces a GPA figure for one term of one (program, cohort).
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score_term(&self, key: &CohortKey, term_id: &str) -> Result<f64, String>;
}

/// Produces report/document artifacts from a mapped template.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate_term_report(
        &self,
        template: &Template,
        key: &CohortKey,
        term_id: &str,
    ) -> Result<(), String>;

    async fn generate_final_document(
        &self,
        template: &Template,
        key: &CohortKey,
    ) -> Result<(), String>;
}

/// Placeholder scoring: waits out the artificial delay, then draws a value
/// uniformly from [3.0, 4.0]. Not reproducible and not meaningful; it only
/// exists to exercise the mapping/history surface.
pub struct MockScoringService {
    pub delay: Duration,
}

#[async_trait]
impl ScoringService for MockScoringService {
    async fn score_term(&self, _key: &CohortKey, _term_id: &str) -> Result<f64, String> {
        tokio::time::sleep(self.delay).await;
        Ok(rand::rng().random_range(3.0..=4.0))
    }
}

/// Placeholder generator: waits out the artificial delay and reports
/// success. Real artifact rendering is out of scope.
pub struct MockDocumentGenerator {
    pub delay: Duration,
}

#[async_trait]
impl DocumentGenerator for MockDocumentGenerator {
    async fn generate_term_report(
        &self,
        _template: &Template,
        _key: &CohortKey,
        _term_id: &str,
    ) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn generate_final_document(
        &self,
        _template: &Template,
        _key: &CohortKey,
    ) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
