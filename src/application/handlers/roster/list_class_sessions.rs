//! ListClassSessionsHandler - Query handler for the class listing.

use std::sync::Arc;

use crate::domain::roster::{ClassStatus, RosterError, RosterSummary};
use crate::ports::ClassSessionRepository;

#[derive(Debug, Clone, Default)]
pub struct ListClassSessionsQuery {
    /// Only sessions in this status, when set.
    pub status: Option<ClassStatus>,
}

pub struct ListClassSessionsHandler {
    repository: Arc<dyn ClassSessionRepository>,
}

impl ListClassSessionsHandler {
    pub fn new(repository: Arc<dyn ClassSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListClassSessionsQuery,
    ) -> Result<Vec<RosterSummary>, RosterError> {
        let sessions = self.repository.list().await?;
        Ok(sessions
            .iter()
            .filter(|s| query.status.map_or(true, |status| s.status() == status))
            .map(RosterSummary::from)
            .collect())
    }
}
