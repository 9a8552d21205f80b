//! Client-side table state: text filter, column sort and pagination over a
//! record set delivered by the server.
//!
//! # Design
//! `DataTable` never mutates the rows it was given. Filtering and sorting
//! produce a view (`visible`), and pagination slices that view. Applying a
//! filter jumps back to the first page so the user never lands on a page
//! that no longer exists.

use std::cmp::Ordering;

use crate::types::Hero;

/// A record that can be shown as a table row.
pub trait TableRow {
    /// Column names in display order.
    fn columns() -> &'static [&'static str];

    /// Rendered text of `column`, or `None` for an unknown column.
    fn cell(&self, column: &str) -> Option<String>;

    /// Ordering of two rows by `column`. Unknown columns compare equal.
    fn compare(&self, other: &Self, column: &str) -> Ordering;
}

impl TableRow for Hero {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "active"]
    }

    fn cell(&self, column: &str) -> Option<String> {
        match column {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "active" => Some(self.active.map(|a| a.to_string()).unwrap_or_default()),
            _ => None,
        }
    }

    fn compare(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "active" => self.active.cmp(&other.active),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct DataTable<T> {
    rows: Vec<T>,
    filter: String,
    sort: Option<(String, SortDirection)>,
    page_size: usize,
    page_index: usize,
}

impl<T> Default for DataTable<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> DataTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            filter: String::new(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
        }
    }

    /// All rows, unfiltered, in server order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Zero is treated as one.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }
}

impl<T: TableRow> DataTable<T> {
    /// Replace the record set, keeping filter and sort.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// Trimmed, case-insensitive substring filter over every column.
    pub fn apply_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
        self.first_page();
    }

    pub fn sort_by(&mut self, column: &str, direction: SortDirection) {
        self.sort = Some((column.to_string(), direction));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    fn matches(&self, row: &T) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        T::columns()
            .iter()
            .filter_map(|column| row.cell(column))
            .any(|text| text.to_lowercase().contains(&self.filter))
    }

    /// Rows that pass the filter, in sort order.
    pub fn visible(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self.rows.iter().filter(|row| self.matches(row)).collect();
        if let Some((column, direction)) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.compare(b, column);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    /// The current page of visible rows.
    pub fn page(&self) -> Vec<&T> {
        self.visible()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn next_page(&mut self) {
        if self.page_index + 1 < self.page_count() {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.page_index = self.page_index.min(last);
    }
}
