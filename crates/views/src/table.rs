//! In-memory state of one record table.

use tradedesk_core::{DateRange, Record, RecordId};

use crate::query::{Page, SortDirection, SortSpec, StatusFilter, TextFilter, DEFAULT_PAGE_SIZE};
use crate::selection::{ExportScope, SelectScope, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline message shown above a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Records of one module plus the filter, sort, page, selection and edit
/// state layered over them.
///
/// Changing search, status, date range or sort returns to page 1.
#[derive(Debug, Clone)]
pub struct ResourceTable<R> {
    records: Vec<R>,
    search: TextFilter,
    status: StatusFilter,
    dates: DateRange,
    sort: Option<SortSpec>,
    page: Page,
    select_scope: SelectScope,
    selection: Selection,
    editing: Option<RecordId>,
    notice: Option<Notice>,
}

impl<R: Record> Default for ResourceTable<R> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R: Record> ResourceTable<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            search: TextFilter::default(),
            status: StatusFilter::default(),
            dates: DateRange::default(),
            sort: None,
            page: Page::first(page_size),
            select_scope: SelectScope::default(),
            selection: Selection::default(),
            editing: None,
            notice: None,
        }
    }

    pub fn with_select_scope(mut self, scope: SelectScope) -> Self {
        self.select_scope = scope;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the whole list (after a fetch).
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.clamp_page();
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = TextFilter::new(query);
        self.page.reset();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = StatusFilter::new(status);
        self.page.reset();
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_str()
    }

    pub fn set_date_range(&mut self, dates: DateRange) {
        self.dates = dates;
        self.page.reset();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page.reset();
    }

    /// Header click: sort ascending by a new field, or flip the direction
    /// of the current one.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = match &self.sort {
            Some(current) if current.field == field => {
                SortSpec::new(field, current.direction.toggled())
            }
            _ => SortSpec::new(field, SortDirection::Ascending),
        };
        self.set_sort(Some(next));
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Filtered and sorted rows (all pages).
    pub fn visible(&self) -> Vec<&R> {
        let mut rows: Vec<&R> = self
            .records
            .iter()
            .filter(|r| self.search.matches(*r))
            .filter(|r| self.status.matches(*r))
            .filter(|r| self.dates.contains_raw(r.record_date()))
            .collect();
        if let Some(sort) = &self.sort {
            sort.sort(&mut rows);
        }
        rows
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count(self.visible().len())
    }

    pub fn page_rows(&self) -> Vec<&R> {
        let visible = self.visible();
        let range = self.page.range(visible.len());
        visible[range].to_vec()
    }

    pub fn go_to_page(&mut self, number: usize) {
        let total = self.visible().len();
        self.page.go_to(number, total);
    }

    pub fn has_prev(&self) -> bool {
        self.page.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.page.has_next(self.visible().len())
    }

    pub fn next_page(&mut self) {
        let total = self.visible().len();
        self.page.next(total);
    }

    pub fn prev_page(&mut self) {
        self.page.prev();
    }

    fn clamp_page(&mut self) {
        let total = self.visible().len();
        let number = self.page.number();
        self.page.go_to(number, total);
    }

    pub fn prepend(&mut self, record: R) {
        self.records.insert(0, record);
    }

    /// Swap in the stored copy of the record with `id`. Returns whether a
    /// row matched.
    pub fn replace(&mut self, id: &RecordId, record: R) -> bool {
        match self.records.iter_mut().find(|r| r.id() == Some(id)) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Drop the record with `id` from the list and the selection.
    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        self.selection.remove(id);
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
        let index = self.records.iter().position(|r| r.id() == Some(id))?;
        let removed = self.records.remove(index);
        self.clamp_page();
        Some(removed)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, id: &RecordId) {
        self.selection.toggle(id);
    }

    /// Set the selection to every row of the current page or of the
    /// filtered list, depending on the table's [`SelectScope`].
    pub fn select_all(&mut self) {
        let rows = match self.select_scope {
            SelectScope::Page => self.page_rows(),
            SelectScope::Filtered => self.visible(),
        };
        let ids: Vec<RecordId> = rows.into_iter().filter_map(|r| r.id().cloned()).collect();
        self.selection.select_all(&ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Rows an export of the given scope covers, in display order.
    pub fn export_rows(&self, scope: ExportScope) -> Vec<&R> {
        match scope {
            ExportScope::All => self.records.iter().collect(),
            ExportScope::Filtered => self.visible(),
            ExportScope::Selected => self
                .visible()
                .into_iter()
                .filter(|r| r.id().is_some_and(|id| self.selection.contains(id)))
                .collect(),
        }
    }

    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    /// Put one record into edit state (any previous edit is abandoned).
    pub fn begin_edit(&mut self, id: &RecordId) -> Option<&R> {
        let index = self.records.iter().position(|r| r.id() == Some(id))?;
        self.editing = Some(id.clone());
        self.records.get(index)
    }

    pub fn finish_edit(&mut self) {
        self.editing = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
