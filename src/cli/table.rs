//! Table rendering for list views

use console::style;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::helpers::truncate_str;
use crate::grid::{ColumnDef, ListView, Row};

/// Widest a single cell is allowed to render
const MAX_CELL_WIDTH: usize = 40;

/// Render rows under the given column headers
pub fn render_table<R: Row>(rows: &[&R], columns: &[&ColumnDef]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.title.clone()));

    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| truncate_str(&row.field(&c.key).render(), MAX_CELL_WIDTH)),
        );
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Render the current page of a view, with its visible columns
pub fn render_page<R: Row>(view: &ListView<R>) -> String {
    let columns = view.columns().displayed();
    render_table(&view.page_rows(), &columns)
}

/// One-line summary of a view's position and query state
pub fn page_status<R: Row>(view: &ListView<R>) -> String {
    let mut parts = vec![format!(
        "page {}/{} · {} record(s)",
        view.page(),
        view.total_pages().max(1),
        view.result_count()
    )];

    if !view.search().is_empty() {
        parts.push(format!("search \"{}\"", view.search()));
    }
    let active = view.active_filter_count();
    if active > 0 {
        parts.push(format!("{} filter(s)", active));
    }
    if let Some(spec) = view.sort() {
        parts.push(format!("sort {} {}", spec.field, spec.direction));
    }
    if !view.selected().is_empty() {
        parts.push(format!("{} selected", view.selected().len()));
    }

    parts.join(" · ")
}

/// Render a single record as label/value lines (the record drawer)
pub fn render_detail<R: Row>(row: &R, columns: &[ColumnDef]) -> String {
    let mut out = String::new();
    for col in columns {
        let value = row.field(&col.key).render();
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!("{}: {}\n", style(&col.title).bold(), value));
    }
    out
}
