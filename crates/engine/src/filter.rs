//! Client-side narrowing of expense lists.
//!
//! All criteria are combined with logical AND; an absent criterion imposes
//! no constraint. The filter is stable: survivors keep their original
//! relative order.

use api_types::{Category, expense::Expense};

use crate::{EngineError, ResultEngine};

/// Sentinel the UI uses in the category picker to mean "no filter".
///
/// It is normalized away in [`FilterCriteria::from_raw`] and never reaches
/// the predicate.
pub const ALL_CATEGORIES: &str = "all";

/// Constraints to narrow an expense list by. Built from user input, held
/// as plain values, recomputed on every change rather than mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Substring to look for in the description or category name,
    /// case-insensitive.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<Category>,
    /// Inclusive lower date bound, ISO `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper date bound, ISO `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from raw UI input.
    ///
    /// Empty strings mean "no constraint"; the [`ALL_CATEGORIES`] sentinel
    /// (any case) is treated the same. A non-sentinel category name that is
    /// not in the fixed set is rejected.
    pub fn from_raw(
        search: &str,
        category: &str,
        start_date: &str,
        end_date: &str,
    ) -> ResultEngine<Self> {
        let category = match category.trim() {
            "" => None,
            raw if raw.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            raw => Some(
                raw.parse::<Category>()
                    .map_err(|_| EngineError::InvalidCategory(raw.to_string()))?,
            ),
        };

        Ok(Self {
            search: non_empty(search),
            category,
            start_date: non_empty(start_date),
            end_date: non_empty(end_date),
        })
    }

    /// Returns `true` if no criterion is active, i.e. the filter is the
    /// identity.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Returns `true` if `expense` satisfies every active criterion.
pub fn matches(expense: &Expense, criteria: &FilterCriteria) -> bool {
    if let Some(search) = &criteria.search {
        let needle = search.to_lowercase();
        let in_description = expense.description.to_lowercase().contains(&needle);
        let in_category = expense.category.as_str().to_lowercase().contains(&needle);
        if !in_description && !in_category {
            return false;
        }
    }

    if let Some(category) = criteria.category
        && expense.category != category
    {
        return false;
    }

    // Lexicographic comparison is calendar-correct for ISO dates.
    if let Some(start) = &criteria.start_date
        && expense.date.as_str() < start.as_str()
    {
        return false;
    }
    if let Some(end) = &criteria.end_date
        && expense.date.as_str() > end.as_str()
    {
        return false;
    }

    true
}

/// Keeps the expenses satisfying `criteria`, preserving order.
pub fn apply(expenses: Vec<Expense>, criteria: &FilterCriteria) -> Vec<Expense> {
    if criteria.is_unconstrained() {
        return expenses;
    }
    expenses
        .into_iter()
        .filter(|expense| matches(expense, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn expense(id: &str, category: Category, description: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: 100.0,
            category,
            description: description.to_string(),
            date: date.to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("1", Category::Food, "Lunch", "2024-03-05"),
            expense("2", Category::Transport, "Taxi", "2024-03-20"),
            expense("3", Category::Food, "Coffee Shop", "2024-03-10"),
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let filtered = apply(sample(), &FilterCriteria::default());
        assert_eq!(ids(&filtered), ["1", "2", "3"]);
    }

    #[test]
    fn result_preserves_original_order() {
        let criteria = FilterCriteria {
            category: Some(Category::Food),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["1", "3"]);
    }

    #[test]
    fn category_filters_exactly() {
        let criteria = FilterCriteria {
            category: Some(Category::Food),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["1", "3"]);
        assert!(filtered.iter().all(|e| e.category == Category::Food));
    }

    #[test]
    fn search_is_case_insensitive() {
        let criteria = FilterCriteria {
            search: Some("coffee".to_string()),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["3"]);
    }

    #[test]
    fn search_also_matches_category_name() {
        let criteria = FilterCriteria {
            search: Some("transp".to_string()),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["2"]);
    }

    #[test]
    fn criteria_compose_like_sequential_application() {
        let search_only = FilterCriteria {
            search: Some("lu".to_string()),
            ..Default::default()
        };
        let category_only = FilterCriteria {
            category: Some(Category::Food),
            ..Default::default()
        };
        let combined = FilterCriteria {
            search: Some("lu".to_string()),
            category: Some(Category::Food),
            ..Default::default()
        };

        let sequential = apply(apply(sample(), &search_only), &category_only);
        let at_once = apply(sample(), &combined);
        assert_eq!(ids(&sequential), ids(&at_once));
    }

    #[test]
    fn start_date_is_inclusive_lower_bound() {
        let criteria = FilterCriteria {
            start_date: Some("2024-03-10".to_string()),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["2", "3"]);
    }

    #[test]
    fn equal_bounds_select_a_single_day() {
        let criteria = FilterCriteria {
            start_date: Some("2024-03-10".to_string()),
            end_date: Some("2024-03-10".to_string()),
            ..Default::default()
        };
        let filtered = apply(sample(), &criteria);
        assert_eq!(ids(&filtered), ["3"]);
    }

    #[test]
    fn from_raw_treats_empty_strings_as_no_constraint() {
        let criteria = FilterCriteria::from_raw("", "", "", "").unwrap();
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn from_raw_normalizes_the_all_sentinel() {
        let criteria = FilterCriteria::from_raw("", "all", "", "").unwrap();
        assert_eq!(criteria.category, None);
        let criteria = FilterCriteria::from_raw("", "All", "", "").unwrap();
        assert_eq!(criteria.category, None);
    }

    #[test]
    fn from_raw_parses_a_real_category() {
        let criteria = FilterCriteria::from_raw("", "food", "", "").unwrap();
        assert_eq!(criteria.category, Some(Category::Food));
    }

    #[test]
    fn from_raw_rejects_unknown_categories() {
        let err = FilterCriteria::from_raw("", "groceries", "", "").unwrap_err();
        assert!(matches!(err, EngineError::InvalidCategory(_)));
    }
}
