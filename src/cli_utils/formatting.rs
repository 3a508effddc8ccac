use bigdecimal::{BigDecimal, RoundingMode};
use colored::Colorize;

/// Format a table with columns and rows
pub fn format_table(headers: Vec<&str>, rows: Vec<Vec<String>>) {
    let col_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let mut width = visible_width(header);
            for row in &rows {
                if i < row.len() {
                    width = width.max(visible_width(&row[i]));
                }
            }
            width
        })
        .collect();

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad_cell(h, col_widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");

    println!("{}", header_line.bold());
    println!("{}", "-".repeat(visible_width(&header_line)));

    for row in rows {
        let row_line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad_cell(cell, col_widths.get(i).copied().unwrap_or(20)))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{}", row_line);
    }
}

/// Character count of `text` ignoring ANSI colour sequences
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // Sequences written by `colored` look like ESC [ ... m
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Right-pad `cell` with spaces to `width` visible characters
pub fn pad_cell(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(cell));
    format!("{}{}", cell, " ".repeat(padding))
}

/// Format a single record as key-value pairs
pub fn format_record(data: Vec<(&str, String)>) {
    let max_key_len = data.iter().map(|(k, _)| k.len()).max().unwrap_or(20);

    for (key, value) in data {
        let padded_key = format!("{:width$}", key, width = max_key_len);
        println!("  {}: {}", padded_key.bright_cyan(), value);
    }
}

/// Currency amount with two decimals
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format BigDecimal with 2 decimal places
pub fn format_decimal(value: &BigDecimal) -> String {
    value.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// Signed amount coloured by transaction type
pub fn format_signed_amount(kind: &str, amount: f64) -> String {
    match kind.to_lowercase().as_str() {
        "income" => format!("+{}", format_amount(amount)).green().to_string(),
        "expense" => format!("-{}", format_amount(amount)).red().to_string(),
        _ => format_amount(amount),
    }
}

/// Goal progress as a percentage of the target
pub fn format_progress(current: f64, target: f64) -> String {
    if target <= 0.0 {
        return "n/a".dimmed().to_string();
    }
    let percent = (current / target * 100.0).clamp(0.0, 100.0);
    let text = format!("{:.0}%", percent);
    if percent >= 100.0 {
        text.green().to_string()
    } else {
        text.yellow().to_string()
    }
}

/// Format a header
pub fn print_header(text: &str) {
    println!();
    println!("{}", text.bold().bright_cyan());
    println!("{}", "=".repeat(text.chars().count()));
    println!();
}

/// Format a section
pub fn print_section(text: &str) {
    println!();
    println!("{}", text.bold().bright_white());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Format a count
pub fn format_count(label: &str, count: usize) -> String {
    format!("{}: {}", label, count.to_string().bright_cyan())
}
