//! Questionnaire reader port - access to versioned questionnaire definitions.
//!
//! Definitions are immutable per version, so implementations may cache
//! freely and hand out shared references.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuestionnaireVersionId};
use crate::domain::questionnaire::Questionnaire;

/// Reader port for questionnaire definitions.
#[async_trait]
pub trait QuestionnaireReader: Send + Sync {
    /// Loads one questionnaire version.
    ///
    /// Returns `None` if the version does not exist.
    async fn find_by_version(
        &self,
        version_id: QuestionnaireVersionId,
    ) -> Result<Option<Arc<Questionnaire>>, DomainError>;
}
