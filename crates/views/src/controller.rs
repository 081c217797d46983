//! Drives a [`ResourceTable`] through its collection endpoint.

use std::future::Future;

use tradedesk_client::{ApiError, RequestSequence, ResourceService, Ticket};
use tradedesk_core::{Draft, Record, RecordId};

use crate::table::{Notice, ResourceTable};

/// Yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Capitalized record kind for notices ("Client added successfully").
fn title_kind(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One module's table plus the service it loads from and saves to.
pub struct TableController<R: Record> {
    service: ResourceService<R>,
    table: ResourceTable<R>,
    sequence: RequestSequence,
    query: Vec<(&'static str, String)>,
}

impl<R: Record> TableController<R> {
    pub fn new(service: ResourceService<R>, table: ResourceTable<R>) -> Self {
        Self {
            service,
            table,
            sequence: RequestSequence::new(),
            query: Vec::new(),
        }
    }

    pub fn table(&self) -> &ResourceTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ResourceTable<R> {
        &mut self.table
    }

    pub fn service(&self) -> &ResourceService<R> {
        &self.service
    }

    /// Server-side list parameters sent with every refresh.
    pub fn set_query(&mut self, query: Vec<(&'static str, String)>) {
        self.query = query;
    }

    /// Start a list fetch. The returned future owns everything it needs, so
    /// several refreshes may be in flight; only the latest one applies.
    pub fn begin_refresh(
        &self,
    ) -> (
        Ticket,
        impl Future<Output = Result<Vec<R>, ApiError>> + Send + use<R>,
    ) {
        let ticket = self.sequence.begin();
        let service = self.service.clone();
        let query = self.query.clone();
        let fetch = async move {
            let params: Vec<(&str, String)> =
                query.iter().map(|(k, v)| (*k, v.clone())).collect();
            service.list(&params).await
        };
        (ticket, fetch)
    }

    /// Apply a finished fetch. Returns `Ok(false)` when a newer refresh
    /// started after this one and the result was dropped.
    pub fn apply_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<R>, ApiError>,
    ) -> Result<bool, ApiError> {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Discarding stale {} list (ticket {})", R::KIND, ticket.value());
            return Ok(false);
        }
        match result {
            Ok(records) => {
                self.table.set_records(records);
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Failed to fetch {} records: {}", R::KIND, e);
                self.table
                    .set_notice(Notice::error(e.user_message(&format!("Failed to fetch {}s.", R::KIND))));
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let (ticket, fetch) = self.begin_refresh();
        let result = fetch.await;
        self.apply_refresh(ticket, result).map(|_| ())
    }

    /// Load the record with `id` into a fresh draft and mark it as edited.
    pub fn edit<D>(&mut self, id: &RecordId) -> Option<D>
    where
        D: Draft<Record = R>,
    {
        self.table.begin_edit(id).map(D::from_record)
    }

    pub fn cancel_edit(&mut self) {
        self.table.finish_edit();
    }

    /// Create or update from `draft`, depending on the table's edit state.
    ///
    /// On success the stored record is prepended/replaced (or the list is
    /// re-fetched when the response is not a record) and the draft resets.
    /// On failure the draft is left as typed.
    pub async fn submit<D>(&mut self, draft: &mut D) -> Result<(), ApiError>
    where
        D: Draft<Record = R>,
    {
        let editing = self.table.editing().cloned();
        let verb = if editing.is_some() { "update" } else { "add" };

        let outcome = match draft.to_record() {
            Ok(record) => match &editing {
                Some(id) => self.service.update(id, &record).await,
                None => self.service.create(&record).await,
            },
            Err(e) => Err(e.into()),
        };

        let stored = match outcome {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to {} {}: {}", verb, R::KIND, e);
                self.table
                    .set_notice(Notice::error(e.user_message(&format!("Failed to {} {}.", verb, R::KIND))));
                return Err(e);
            }
        };

        match (stored, &editing) {
            (Some(record), Some(id)) => {
                self.table.replace(id, record);
            }
            (Some(record), None) => self.table.prepend(record),
            (None, _) => self.refresh().await?,
        }

        draft.reset();
        self.table.finish_edit();
        let done = if editing.is_some() { "updated" } else { "added" };
        self.table
            .set_notice(Notice::success(format!("{} {} successfully", title_kind(R::KIND), done)));
        Ok(())
    }

    /// Delete after confirmation. Returns `Ok(false)` when the user declined.
    pub async fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> Result<bool, ApiError> {
        if !confirm.confirm(&format!("Are you sure you want to delete this {}?", R::KIND)) {
            return Ok(false);
        }
        match self.service.delete(id).await {
            Ok(()) => {
                self.table.remove(id);
                self.table
                    .set_notice(Notice::success(format!("{} deleted successfully", title_kind(R::KIND))));
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Failed to delete {} {}: {}", R::KIND, id, e);
                self.table
                    .set_notice(Notice::error(e.user_message(&format!("Failed to delete {}.", R::KIND))));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_capitalized_for_notices() {
        assert_eq!(title_kind("purchase order"), "Purchase order");
        assert_eq!(title_kind(""), "");
    }

    #[test]
    fn closures_confirm() {
        let yes = |_: &str| true;
        assert!(Confirm::confirm(&yes, "Delete?"));
    }
}
