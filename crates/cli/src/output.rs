//! Plain-text rendering of expenses and summaries.

use api_types::{expense::Expense, summary::MonthlySummary};

pub fn amount(value: f64) -> String {
    format!("{value:.2}")
}

/// One expense on one line: date, category, amount, description.
pub fn expense_line(expense: &Expense) -> String {
    format!(
        "{}  {:<13} {:>10}  {}",
        expense.date,
        expense.category,
        amount(expense.amount),
        expense.description
    )
}

pub fn expense_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut lines: Vec<String> = expenses.iter().map(expense_line).collect();
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    lines.push(format!(
        "{} expense(s), total {}",
        expenses.len(),
        amount(total)
    ));
    lines.join("\n") + "\n"
}

pub fn summary_text(month: &str, summary: &MonthlySummary) -> String {
    let mut lines = vec![
        format!("Summary for {month}:"),
        format!(
            "  total: {} across {} expense(s)",
            amount(summary.total_expenses),
            summary.total_count
        ),
    ];

    if !summary.category_breakdown.is_empty() {
        lines.push(String::new());
        lines.push("By category:".to_string());
        for share in &summary.category_breakdown {
            lines.push(format!(
                "  {:<13} {:>10}  {:>6.2}%",
                share.category,
                amount(share.amount),
                share.percentage
            ));
        }
    }

    if !summary.daily_expenses.is_empty() {
        lines.push(String::new());
        lines.push("By day:".to_string());
        for day in &summary.daily_expenses {
            lines.push(format!("  {}  {:>10}", day.date, amount(day.amount)));
        }
    }

    lines.join("\n") + "\n"
}
