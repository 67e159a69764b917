//! ListPoliciesHandler - Query handler for stored PDFs.
//!
//! Every call rescans the PDF directory. Nothing is cached between calls.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::policy::PolicyError;
use crate::ports::{PolicyFileStorage, PolicyListingEntry};

/// Handler for listing previously generated PDFs.
pub struct ListPoliciesHandler {
    storage: Arc<dyn PolicyFileStorage>,
}

impl ListPoliciesHandler {
    pub fn new(storage: Arc<dyn PolicyFileStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self) -> Result<Vec<PolicyListingEntry>, PolicyError> {
        match self.storage.list_pdfs().await {
            Ok(entries) => {
                info!(count = entries.len(), "Listed stored policies");
                Ok(entries)
            }
            Err(err) => {
                error!(error = %err, "Failed to list policies");
                Err(err.into())
            }
        }
    }
}
