use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expense category, fixed server-side set.
///
/// Serialized as the capitalized name (`"Food"`, `"Transport"`, ...).
/// Anything the server sends outside the known set deserializes as
/// [`Category::Other`] so list decoding never fails on new categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Entertainment,
        Self::Bills,
        Self::Health,
        Self::Education,
        Self::Other,
    ];

    /// Returns the canonical name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Case-insensitive lookup by canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserRegister {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserLogin {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct User {
        pub id: String,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
    }

    /// Response body of `POST /auth/login` and `POST /auth/register`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AuthResponse {
        /// Bearer token for subsequent requests.
        pub token: String,
        pub user: User,
    }
}

pub mod expense {
    use super::*;

    /// A recorded expense as returned by the server.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: String,
        pub user_id: String,
        pub amount: f64,
        pub category: Category,
        pub description: String,
        /// ISO `YYYY-MM-DD`, no time component.
        ///
        /// Kept as a string on purpose: ISO dates sort lexicographically in
        /// calendar order, and range filtering relies on exactly that.
        pub date: String,
        pub created_at: DateTime<Utc>,
    }

    /// Request body for `POST /expenses`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount: f64,
        pub category: Category,
        pub description: String,
        pub date: String,
    }

    /// Request body for `PUT /expenses/{id}`; unset fields are left as-is
    /// by the server and must not appear in the JSON at all.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<Category>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
    }
}

pub mod summary {
    use super::*;

    /// One category's slice of a monthly total.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryShare {
        pub category: String,
        pub amount: f64,
        /// Share of the month total, percent rounded to two decimals.
        pub percentage: f64,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct DailyTotal {
        pub date: String,
        pub amount: f64,
    }

    /// Response body of `GET /expenses/summary/monthly`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MonthlySummary {
        pub total_expenses: f64,
        pub total_count: u64,
        /// All categories, highest amount first.
        pub category_breakdown: Vec<CategoryShare>,
        /// Day totals in ascending date order.
        pub daily_expenses: Vec<DailyTotal>,
        /// Top five of `category_breakdown`.
        pub top_categories: Vec<CategoryShare>,
    }
}

pub mod export {
    use serde::{Deserialize, Serialize};

    /// Export flavor for `GET /expenses/export/{format}`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ExportFormat {
        Pdf,
        Excel,
    }

    impl ExportFormat {
        /// URL path segment of the export endpoint.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Pdf => "pdf",
                Self::Excel => "excel",
            }
        }

        /// File extension for the downloaded attachment.
        pub fn extension(self) -> &'static str {
            match self {
                Self::Pdf => "pdf",
                Self::Excel => "xlsx",
            }
        }
    }
}
