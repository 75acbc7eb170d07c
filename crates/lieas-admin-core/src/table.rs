use std::cmp::Ordering;

pub const SELECTED_ROW_CLASS: &str = "selected";
pub const TABLE_SEARCH_CLASS: &str = "table-search form-control";
pub const TABLE_SEARCH_PLACEHOLDER: &str = "Search table...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Position of the row when the table was first read; the DOM layer
    /// uses it to find the element again after sorting.
    pub key: usize,
    pub cells: Vec<String>,
    pub text: String,
    pub selected: bool,
    pub visible: bool,
}

impl TableRow {
    pub fn new(key: usize, cells: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            key,
            cells,
            text: text.into(),
            selected: false,
            visible: true,
        }
    }

    /// Row whose searchable text is its cells joined by spaces.
    pub fn from_cells(key: usize, cells: Vec<String>) -> Self {
        let text = cells.join(" ");
        Self::new(key, cells, text)
    }

    fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", |cell| cell.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel {
    rows: Vec<TableRow>,
}

impl TableModel {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorts ascending by `column`, starting from the current order.
    ///
    /// The sort is stable and has no descending toggle, so clicking the
    /// same header twice leaves the order unchanged. Returns the row keys
    /// in their new order.
    pub fn sort_by_column(&mut self, column: usize) -> Vec<usize> {
        // Mixed numeric/text columns are not totally ordered; insertion
        // sort stays stable and well-defined on them.
        for index in 1..self.rows.len() {
            let mut position = index;
            while position > 0
                && compare_cells(
                    self.rows[position - 1].cell(column),
                    self.rows[position].cell(column),
                ) == Ordering::Greater
            {
                self.rows.swap(position - 1, position);
                position -= 1;
            }
        }
        self.order()
    }

    pub fn order(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.key).collect()
    }

    /// Hides rows whose text does not contain `term`, case-insensitively.
    /// Returns the number of visible rows.
    pub fn filter(&mut self, term: &str) -> usize {
        let needle = term.to_lowercase();
        let mut visible = 0;
        for row in &mut self.rows {
            row.visible = row.text.to_lowercase().contains(&needle);
            if row.visible {
                visible += 1;
            }
        }
        visible
    }

    pub fn set_row_text(&mut self, key: usize, text: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|row| row.key == key) {
            Some(row) => {
                row.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Replaces the sort values of one row, read again from the page.
    pub fn set_row_cells(&mut self, key: usize, cells: Vec<String>) -> bool {
        match self.rows.iter_mut().find(|row| row.key == key) {
            Some(row) => {
                row.cells = cells;
                true
            }
            None => false,
        }
    }

    /// Returns the new selected flag, or `None` for an unknown key.
    pub fn toggle_selected(&mut self, key: usize) -> Option<bool> {
        let row = self.rows.iter_mut().find(|row| row.key == key)?;
        row.selected = !row.selected;
        Some(row.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.selected).count()
    }

    pub fn visible_keys(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.key)
            .collect()
    }
}

/// The bulk-action bar follows selection across every table on the page.
pub fn bulk_actions_visible<'a, I>(tables: I) -> bool
where
    I: IntoIterator<Item = &'a TableModel>,
{
    tables.into_iter().any(|table| table.selected_count() > 0)
}

fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn compare_cells(left: &str, right: &str) -> Ordering {
    if let (Some(left), Some(right)) = (parse_number(left), parse_number(right)) {
        return left.partial_cmp(&right).unwrap_or(Ordering::Equal);
    }
    compare_text(left, right)
}

/// Case-insensitive first; on a case-only tie lowercase sorts first.
fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}
