//! Terminal listings of clients, selection totals and agents

use balance_core::{AgentDirectory, CurrencyFormat, Record, ReportView};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One visible client row
#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Sel")]
    selected: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Agent")]
    name: String,
}

/// Visible clients as a table, marking selected rows
pub fn clients_table(view: &ReportView, rows: &[&Record], currency: &CurrencyFormat) -> String {
    let rows: Vec<ClientRow> = rows
        .iter()
        .map(|r| ClientRow {
            selected: if view.is_selected(&r.id) { "*" } else { "" },
            id: r.id.clone(),
            name: r.name.clone().unwrap_or_default(),
            agent: r.agent_display.clone(),
            balance: plain_amount(currency, r.balance),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Agent directory as a table
pub fn agents_table(directory: &AgentDirectory) -> String {
    let rows: Vec<AgentRow> = directory
        .entries()
        .iter()
        .map(|e| AgentRow {
            code: e.code.clone(),
            name: e.name.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line selection summary
pub fn selection_summary(view: &ReportView, currency: &CurrencyFormat) -> String {
    let selected = view.selected_records();
    let hidden = selected
        .iter()
        .filter(|r| !view.criteria().matches(r))
        .count();

    let mut line = format!(
        "Selected: {} of {} | Total balance: {}",
        selected.len(),
        view.records().len(),
        plain_amount(currency, Some(view.total()))
    );
    if hidden > 0 {
        line.push_str(&format!(" ({hidden} hidden by filter)"));
    }
    line
}

/// Print the visible clients followed by the selection summary
pub fn print_listing(view: &ReportView, currency: &CurrencyFormat) {
    let visible = view.visible();
    if visible.is_empty() {
        println!("No clients match the current filter.");
    } else {
        println!("{}", clients_table(view, &visible, currency));
    }
    println!("Showing {} of {} client(s)", visible.len(), view.records().len());
    println!("{}", selection_summary(view, currency));
}

/// Currency text without the bidi mark, which terminals render literally
fn plain_amount(currency: &CurrencyFormat, amount: Option<f64>) -> String {
    let text = currency.format_opt(amount);
    match currency.direction_mark.as_deref() {
        Some(mark) if !mark.is_empty() => text.replace(mark, ""),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ReportView {
        let mut view = ReportView::new();
        view.load(vec![
            Record::new("1", Some("Dan"), "Store", Some(100.0)),
            Record::new("2", Some("Dan"), "Gal", None),
            Record::new("3", Some("Ori"), "Gal", Some(50.0)),
        ]);
        view
    }

    #[test]
    fn test_clients_table_marks_selection() {
        let mut view = view();
        view.select("3");
        let visible = view.visible();
        let table = clients_table(&view, &visible, &CurrencyFormat::ils());

        let ori = table.lines().find(|l| l.contains("Ori")).unwrap();
        let dan = table.lines().find(|l| l.contains("Dan")).unwrap();
        assert!(ori.contains('*'));
        assert!(!dan.contains('*'));
        assert!(table.contains("50.00\u{a0}₪"));
        assert!(!table.contains('\u{200f}'));
    }

    #[test]
    fn test_selection_summary_counts_hidden_rows() {
        let mut view = view();
        view.replace_selection(["1", "3"]);
        view.criteria_mut().name_pattern = "Dan".to_string();

        let summary = selection_summary(&view, &CurrencyFormat::ils());
        assert!(summary.starts_with("Selected: 2 of 3"));
        assert!(summary.contains("150.00\u{a0}₪"));
        assert!(summary.ends_with("(1 hidden by filter)"));
    }

    #[test]
    fn test_agents_table() {
        let directory = AgentDirectory::from_pairs([("87", "Shop"), ("257", "Gal")]);
        let table = agents_table(&directory);
        assert!(table.contains("87"));
        assert!(table.contains("Gal"));
    }
}
