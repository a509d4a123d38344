//! Per-domain summary of an import.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ep_model::ImportResult;

/// Counts for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSummary {
    pub domain: String,
    pub entries: usize,
    pub passwords: usize,
    pub notes: usize,
}

/// Counts for a whole import, domains in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub domains: Vec<DomainSummary>,
}

impl ImportSummary {
    pub fn from_result(result: &ImportResult) -> Self {
        let domains = result
            .sites
            .iter()
            .map(|(domain, site)| DomainSummary {
                domain: domain.clone(),
                entries: site.passwords.len(),
                passwords: site
                    .passwords
                    .values()
                    .filter(|entry| entry.password.is_some())
                    .count(),
                notes: site
                    .passwords
                    .values()
                    .filter(|entry| entry.notes.is_some())
                    .count(),
            })
            .collect();
        Self { domains }
    }

    pub fn total_entries(&self) -> usize {
        self.domains.iter().map(|d| d.entries).sum()
    }

    pub fn total_passwords(&self) -> usize {
        self.domains.iter().map(|d| d.passwords).sum()
    }

    pub fn total_notes(&self) -> usize {
        self.domains.iter().map(|d| d.notes).sum()
    }

    /// Renders the summary as a table with a totals row.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Domain"),
            header_cell("Entries"),
            header_cell("Passwords"),
            header_cell("Notes"),
        ]);
        apply_table_style(&mut table);
        for summary in &self.domains {
            table.add_row(vec![
                Cell::new(&summary.domain),
                Cell::new(summary.entries),
                Cell::new(summary.passwords),
                Cell::new(summary.notes),
            ]);
        }
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(self.total_entries()).add_attribute(Attribute::Bold),
            Cell::new(self.total_passwords()).add_attribute(Attribute::Bold),
            Cell::new(self.total_notes()).add_attribute(Attribute::Bold),
        ]);
        for index in 1..=3 {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        table
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
