//! Record table output for list/search/report commands

use console::style;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::record::{InventoryRecord, DISPLAY_HEADERS};

/// Columns shown in terminal table output: (header, max width)
const TABLE_COLUMNS: [(&str, usize); 8] = [
    ("ID", 6),
    ("ASSET ID", 13),
    ("ASSET NAME", 22),
    ("TOOL OF TRADE", 16),
    ("BRANCH", 14),
    ("SERIAL NUMBER", 18),
    ("CUSTODIAN", 14),
    ("ASSET STATUS", 16),
];

fn table_cells(record: &InventoryRecord) -> [String; 8] {
    [
        record.id.to_string(),
        record.asset_id.clone(),
        record.asset_name.clone(),
        record.asset_class.clone(),
        record.branch.clone(),
        record.serial_number.clone(),
        record.custodian.clone(),
        record.device_status.clone(),
    ]
}

/// Print records in the requested format
pub fn print_records(records: &[InventoryRecord], format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Auto | OutputFormat::Tsv => print_table(records, quiet),
        OutputFormat::Csv => print_csv(records),
        OutputFormat::Json => print_json(records),
        OutputFormat::Id => {
            for record in records {
                println!("{}", record.id);
            }
        }
    }
}

fn print_table(records: &[InventoryRecord], quiet: bool) {
    // Size each column to its content, capped at the defined width
    let widths: Vec<usize> = TABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, (header, cap))| {
            let content = records
                .iter()
                .map(|r| table_cells(r)[i].len())
                .max()
                .unwrap_or(0);
            header.len().max(content).min(*cap)
        })
        .collect();

    let header_row: Vec<String> = TABLE_COLUMNS
        .iter()
        .zip(&widths)
        .map(|((header, _), w)| format!("{:<width$}", style(header).bold(), width = *w))
        .collect();
    println!("{}", header_row.join("  "));
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    println!("{}", "-".repeat(total));

    for record in records {
        let cells = table_cells(record);
        let row: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let text = truncate_str(cell, *w);
                if TABLE_COLUMNS[i].0 == "ASSET STATUS" {
                    format!("{:<width$}", style_status(&text), width = *w)
                } else {
                    format!("{:<width$}", text, width = *w)
                }
            })
            .collect();
        println!("{}", row.join("  "));
    }

    if !quiet {
        println!();
        println!("{} record(s) found.", style(records.len()).cyan());
    }
}

/// Color-code device statuses the way the report screen does
fn style_status(status: &str) -> String {
    let styled = match status {
        "ACTIVE" => style(status).green(),
        "FOR REPLACEMENT" => style(status).yellow(),
        "FOR REPAIR" => style(status).magenta(),
        "RETIRED" => style(status).cyan(),
        "FOR DISPOSAL" => style(status).red(),
        _ => style(status).white(),
    };
    styled.to_string()
}

fn print_csv(records: &[InventoryRecord]) {
    println!("{}", DISPLAY_HEADERS.join(","));
    for record in records {
        let row: Vec<String> = record
            .display_cells()
            .iter()
            .map(|c| escape_csv(c))
            .collect();
        println!("{}", row.join(","));
    }
}

fn print_json(records: &[InventoryRecord]) {
    match serde_json::to_string_pretty(records) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize records: {}", e),
    }
}
