use chrono::Utc;

use api_types::{Category, expense::Expense};
use engine::{FilterCriteria, filter, month};

fn expense(id: &str, category: Category, description: &str, date: &str) -> Expense {
    Expense {
        id: id.to_string(),
        user_id: "u1".to_string(),
        amount: 50.0,
        category,
        description: description.to_string(),
        date: date.to_string(),
        created_at: Utc::now(),
    }
}

fn three_months() -> Vec<Expense> {
    vec![
        expense("feb", Category::Bills, "Rent", "2024-02-29"),
        expense("mar-1", Category::Food, "Lunch", "2024-03-01"),
        expense("mar-2", Category::Transport, "Taxi", "2024-03-20"),
        expense("mar-3", Category::Food, "Dinner", "2024-03-31"),
        expense("apr", Category::Food, "Groceries", "2024-04-01"),
    ]
}

#[test]
fn month_bucket_then_filter() {
    let range = month::resolve("2024-03").unwrap();

    let in_month: Vec<Expense> = three_months()
        .into_iter()
        .filter(|e| range.contains(&e.date))
        .collect();
    let ids: Vec<&str> = in_month.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["mar-1", "mar-2", "mar-3"]);

    let criteria = FilterCriteria {
        category: Some(Category::Food),
        ..Default::default()
    };
    let food = filter::apply(in_month, &criteria);
    let ids: Vec<&str> = food.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["mar-1", "mar-3"]);
}

#[test]
fn resolved_bounds_work_as_inclusive_filter_criteria() {
    // The API's end_date parameter is inclusive, so a caller turning the
    // half-open range into filter criteria gets one extra day; trimming
    // with MonthRange::contains restores the exact month.
    let range = month::resolve("2024-03").unwrap();
    let criteria = FilterCriteria {
        start_date: Some(range.start.clone()),
        end_date: Some(range.end.clone()),
        ..Default::default()
    };

    let loose = filter::apply(three_months(), &criteria);
    assert!(loose.iter().any(|e| e.id == "apr"));

    let exact: Vec<Expense> = loose
        .into_iter()
        .filter(|e| range.contains(&e.date))
        .collect();
    assert!(exact.iter().all(|e| e.id.starts_with("mar")));
    assert_eq!(exact.len(), 3);
}
