use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json;

use crate::case::CaseRecord;
use crate::cli::OutputFormat;
use crate::error::Result;

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a list of archived cases
    pub fn format_cases(&self, records: &[CaseRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_cases_table(records),
            OutputFormat::Json => self.format_cases_json(records),
            OutputFormat::Markdown => self.format_cases_markdown(records),
            OutputFormat::Csv => self.format_cases_csv(records),
        }
    }

    // Table formatting
    fn format_cases_table(&self, records: &[CaseRecord]) -> Result<String> {
        let mut table = Table::new();

        // Set up headers with color
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Case Number").fg(Color::Cyan),
            Cell::new("Parties").fg(Color::Cyan),
            Cell::new("Filed").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Scraped At").fg(Color::Cyan),
        ]);

        // Add rows
        for (idx, record) in records.iter().enumerate() {
            table.add_row(vec![
                Cell::new((idx + 1).to_string()),
                Cell::new(&record.case_number),
                Cell::new(truncate_string(
                    record.party_names.as_deref().unwrap_or("-"),
                    40,
                )),
                Cell::new(record.filing_date.as_deref().unwrap_or("-")),
                status_cell(record.status.as_deref()),
                Cell::new(scraped_at_display(record)),
            ]);
        }

        // Set table properties
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut result = String::new();

        // Add summary
        result.push_str(&format!(
            "\n{} Total: {}\n\n",
            "📁".cyan(),
            records.len().to_string().yellow()
        ));

        result.push_str(&table.to_string());

        Ok(result)
    }

    // JSON formatting
    fn format_cases_json(&self, records: &[CaseRecord]) -> Result<String> {
        serde_json::to_string_pretty(records).map_err(crate::error::DocketError::Serialization)
    }

    // Markdown formatting
    fn format_cases_markdown(&self, records: &[CaseRecord]) -> Result<String> {
        let mut result = String::new();

        result.push_str("# Archived Cases\n\n");
        result.push_str(&format!("- **Total**: {}\n\n", records.len()));

        result.push_str("| # | Case Number | Parties | Filed | Status | Scraped At |\n");
        result.push_str("|---|-------------|---------|-------|--------|------------|\n");

        for (idx, record) in records.iter().enumerate() {
            result.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                idx + 1,
                escape_markdown(&record.case_number),
                escape_markdown(record.party_names.as_deref().unwrap_or("-")),
                record.filing_date.as_deref().unwrap_or("-"),
                record.status.as_deref().unwrap_or("-"),
                scraped_at_display(record),
            ));
        }

        Ok(result)
    }

    // CSV formatting
    fn format_cases_csv(&self, records: &[CaseRecord]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        // Write headers
        wtr.write_record(["case_number", "party_names", "filing_date", "status", "scraped_at"])?;

        // Write data
        for record in records {
            let scraped_at = record
                .scraped_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            wtr.write_record([
                record.case_number.as_str(),
                record.party_names.as_deref().unwrap_or(""),
                record.filing_date.as_deref().unwrap_or(""),
                record.status.as_deref().unwrap_or(""),
                scraped_at.as_str(),
            ])?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| crate::error::DocketError::Other(e.to_string()))?;

        // Add BOM for Excel compatibility
        let mut result = vec![0xEF, 0xBB, 0xBF];
        result.extend_from_slice(&data);

        String::from_utf8(result).map_err(|e| crate::error::DocketError::Other(e.to_string()))
    }
}

/// Status cell colored by disposition
fn status_cell(status: Option<&str>) -> Cell {
    let text = status.unwrap_or("-");
    let cell = Cell::new(text);
    match text.to_lowercase().as_str() {
        "active" | "open" => cell.fg(Color::Green),
        "closed" => cell.fg(Color::Red),
        "pending" => cell.fg(Color::Yellow),
        _ => cell,
    }
}

fn scraped_at_display(record: &CaseRecord) -> String {
    record
        .scraped_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

// Helper functions
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

fn escape_markdown(s: &str) -> String {
    s.replace("|", "\\|")
        .replace("*", "\\*")
        .replace("_", "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CaseRecord> {
        vec![
            CaseRecord::new(
                "123-ABC-456",
                Some("John Doe vs. Jane Smith".to_string()),
                Some("2023-01-15".to_string()),
                Some("Closed".to_string()),
            )
            .unwrap(),
            CaseRecord::new("789-XYZ-012", None, None, Some("Active".to_string())).unwrap(),
        ]
    }

    #[test]
    fn table_lists_every_case() {
        let output = Formatter::new(OutputFormat::Table)
            .format_cases(&sample())
            .unwrap();
        assert!(output.contains("123-ABC-456"));
        assert!(output.contains("789-XYZ-012"));
        assert!(output.contains("Total:"));
    }

    #[test]
    fn json_round_trips_records() {
        let output = Formatter::new(OutputFormat::Json)
            .format_cases(&sample())
            .unwrap();
        let parsed: Vec<CaseRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn csv_starts_with_bom_and_headers() {
        let output = Formatter::new(OutputFormat::Csv)
            .format_cases(&sample())
            .unwrap();
        assert!(output.starts_with('\u{feff}'));
        assert!(output.contains("case_number,party_names,filing_date,status,scraped_at"));
        assert!(output.contains("123-ABC-456,John Doe vs. Jane Smith,2023-01-15,Closed,"));
    }

    #[test]
    fn markdown_escapes_pipes_in_party_names() {
        let records =
            vec![CaseRecord::new("1-A", Some("Acme | Co vs. B".to_string()), None, None).unwrap()];
        let output = Formatter::new(OutputFormat::Markdown)
            .format_cases(&records)
            .unwrap();
        assert!(output.contains("Acme \\| Co vs. B"));
    }

    #[test]
    fn truncation_keeps_short_strings_intact() {
        assert_eq!(truncate_string("short", 40), "short");
        let long = "x".repeat(50);
        let truncated = truncate_string(&long, 40);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 40);
    }
}
