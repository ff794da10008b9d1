use crate::modal::DetailModal;
use crate::models::ValidationIssue;
use crate::sort::{SortState, TableRow};
use crate::summary::Totals;
use crate::terminal::Terminal;
use colored::*;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use serde::Serialize;

pub fn display_summary(totals: &Totals, ranked: &[TableRow], headers: &[&str]) {
    println!("{}", Terminal::separator('═').bright_black());
    println!(
        "{}  {}",
        "📊 MSP Leadership Dashboard".bright_blue().bold(),
        totals.last_updated.dimmed()
    );
    println!("{}", Terminal::separator('═').bright_black());
    println!();

    println!(
        "🏢 Clients: {}  │  👤 Licensed Users: {}  │  💻 Devices: {}",
        totals.total_clients.bright_green().bold(),
        totals.total_users_licensed.bright_magenta().bold(),
        totals.total_devices.bright_cyan().bold()
    );
    println!();

    println!("{}", "🏆 Clients by Licensed Users".bright_green().bold());
    display_rows(headers, ranked, &SortState::default());
}

/// Print rendered rows as a table, marking the sorted column
pub fn display_rows(headers: &[&str], rows: &[TableRow], sort: &SortState) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| Cell::new(header_label(h, i, sort)).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

    for row in rows {
        table.add_row(
            row.cells
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let cell = Cell::new(text);
                    if i == 0 { cell.fg(Color::White) } else { cell }
                })
                .collect::<Vec<_>>(),
        );
    }

    println!("{}", table);
}

pub fn header_label(header: &str, column: usize, sort: &SortState) -> String {
    match sort.direction_for(column) {
        Some(direction) => format!("{} {}", header, direction.arrow()),
        None => header.to_string(),
    }
}

pub fn display_count_label(label: &str) {
    println!("{}", label.dimmed());
}

pub fn display_client_detail(modal: &DetailModal) {
    println!("{}", Terminal::separator('─').bright_black());
    println!("{}", modal.title().bright_blue().bold());
    println!("{}", Terminal::separator('─').bright_black());

    println!("{}", "👤 Licensed Users".bright_green().bold());
    for line in modal.user_lines() {
        print_detail_line(&line);
    }
    println!();

    println!("{}", "💻 Devices".bright_green().bold());
    for line in modal.device_lines() {
        print_detail_line(&line);
    }
}

fn print_detail_line(parts: &[String]) {
    match parts {
        [only] => println!("  {}", only.dimmed()),
        [head, rest @ ..] => {
            println!("  {}", head.bold());
            for part in rest {
                println!("    {}", part.bright_black());
            }
        }
        [] => {}
    }
}

pub fn display_validation_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        println!("{} Dataset is consistent", "✓".green());
        return;
    }
    println!(
        "{}",
        format!("Found {} consistency issue(s):", issues.len())
            .yellow()
            .bold()
    );
    for issue in issues {
        println!("  • {}", issue);
    }
}

pub fn display_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report to JSON: {}", e),
    }
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    #[test]
    fn test_header_label_marks_sorted_column() {
        let sort = SortState {
            column: Some(1),
            direction: SortDirection::Desc,
        };
        assert_eq!(header_label("Users", 1, &sort), "Users ▼");
        assert_eq!(header_label("Client", 0, &sort), "Client");
        assert_eq!(header_label("Client", 0, &SortState::default()), "Client");
    }
}
