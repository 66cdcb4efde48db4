use crate::application::read_models::HistoryView;
use crate::component_history::domain::PipelineStatus;
use crate::ports::outbound::HistoryFormatter;
use crate::shared::Result;

/// Placeholder shown for a dimension without chosen values
const ALL_VALUES: &str = "(all)";

/// MarkdownFormatter adapter rendering the filtered component table
///
/// Column headers are the schema titles; a record without a value for a
/// column gets an empty cell. The table is followed by a summary of the
/// filter dimensions.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn table_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
        let cells: Vec<String> = cells.map(Self::escape_markdown_table_cell).collect();
        format!("| {} |\n", cells.join(" | "))
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, view: &HistoryView) {
        output.push_str("# Component History\n\n");
        output.push_str(&format!(
            "Showing {} of {} record(s). Generated at {}.\n\n",
            view.records.len(),
            view.total_records,
            view.generated_at.to_rfc3339()
        ));

        let active = view.active_filters();
        if !active.is_empty() {
            let constraints: Vec<String> = active
                .iter()
                .map(|(dimension, values)| format!("{} = {}", dimension, values.join(" or ")))
                .collect();
            output.push_str(&format!("Filtered by: {}\n\n", constraints.join("; ")));
        }

        if let PipelineStatus::Error { message } = &view.status {
            let first_line = message.lines().next().unwrap_or_default();
            output.push_str(&format!(
                "> ⚠️ The last run failed: {}. Showing the previous result.\n\n",
                first_line
            ));
        }
    }

    fn render_table(&self, output: &mut String, view: &HistoryView) {
        if view.records.is_empty() {
            output.push_str("*No records match the current selection*\n\n");
            return;
        }

        let columns = view.columns.columns();
        output.push_str(&Self::table_row(
            columns.iter().map(|column| column.title.as_str()),
        ));
        output.push_str(&format!("|{}\n", "---|".repeat(columns.len())));

        for record in &view.records {
            output.push_str(&Self::table_row(
                columns
                    .iter()
                    .map(|column| record.get(&column.key).unwrap_or("")),
            ));
        }
        output.push('\n');
    }

    fn render_filters(&self, output: &mut String, view: &HistoryView) {
        output.push_str("## Filters\n\n");
        output.push_str("| Dimension | Selected | Available |\n");
        output.push_str("|-----------|----------|-----------|\n");

        for set in view.filter_options.iter() {
            let chosen = view.selection.values(&set.dimension);
            let selected = if chosen.is_empty() {
                ALL_VALUES.to_string()
            } else {
                chosen.join(", ")
            };
            let available = if set.values.is_empty() {
                "-".to_string()
            } else {
                set.values.join(", ")
            };
            output.push_str(&Self::table_row(
                [set.dimension.as_str(), selected.as_str(), available.as_str()].into_iter(),
            ));
        }
        output.push('\n');
    }
}

impl HistoryFormatter for MarkdownFormatter {
    fn format(&self, view: &HistoryView) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, view);
        self.render_table(&mut output, view);
        self.render_filters(&mut output, view);
        Ok(output)
    }
}
