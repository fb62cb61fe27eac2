//! GetRosterHandler - Query handler for one class roster.

use std::sync::Arc;

use crate::domain::foundation::ClassSessionId;
use crate::domain::roster::{RosterError, RosterView};
use crate::ports::ClassSessionRepository;

use super::load_session;

#[derive(Debug, Clone)]
pub struct GetRosterQuery {
    pub class_session_id: ClassSessionId,
}

pub struct GetRosterHandler {
    repository: Arc<dyn ClassSessionRepository>,
}

impl GetRosterHandler {
    pub fn new(repository: Arc<dyn ClassSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetRosterQuery) -> Result<RosterView, RosterError> {
        let session = load_session(self.repository.as_ref(), query.class_session_id).await?;
        Ok(RosterView::from(&session))
    }
}
