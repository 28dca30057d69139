//! HTTP client for the expense tracker REST API.
//!
//! One async method per endpoint, JSON in and out, bearer-token auth. The
//! server is the source of truth; this crate only moves data and maps
//! failure statuses to [`ClientError`]. Month-scoped calls go through the
//! engine's resolver first so a malformed selector fails here instead of
//! querying an unintended range.

use api_types::{
    Category,
    auth::{AuthResponse, User, UserLogin, UserRegister},
    expense::{Expense, ExpenseNew, ExpenseUpdate},
    export::ExportFormat,
    summary::MonthlySummary,
};
use engine::month;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use session::Session;

mod session;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized: log in again")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("not logged in")]
    MissingToken,
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error body shape used by the server (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

/// Query parameters of `GET /expenses`. Absent fields are not sent.
///
/// Both date bounds are inclusive on the server side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `http://127.0.0.1:8000/api`).
    pub fn new(base_url: &str) -> Result<Self> {
        // Url::join drops the last path segment without a trailing slash,
        // which would silently lose the /api prefix.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|err| ClientError::Url(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        })
    }

    /// Returns the client with a bearer token attached to every
    /// authenticated request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Url(err.to_string()))
    }

    fn bearer(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T> {
        if res.status().is_success() {
            return Ok(res.json::<T>().await?);
        }
        Err(Self::error_for(res).await)
    }

    async fn error_for(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let detail = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.detail)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(detail)
            }
            _ => ClientError::Server(detail),
        }
    }

    pub async fn register(&self, payload: &UserRegister) -> Result<AuthResponse> {
        let endpoint = self.endpoint("auth/register")?;
        tracing::debug!(%endpoint, email = %payload.email, "registering user");
        let res = self.http.post(endpoint).json(payload).send().await?;
        Self::decode(res).await
    }

    pub async fn login(&self, payload: &UserLogin) -> Result<AuthResponse> {
        let endpoint = self.endpoint("auth/login")?;
        tracing::debug!(%endpoint, email = %payload.email, "logging in");
        let res = self.http.post(endpoint).json(payload).send().await?;
        Self::decode(res).await
    }

    pub async fn me(&self) -> Result<User> {
        let endpoint = self.endpoint("auth/me")?;
        let res = self.bearer(self.http.get(endpoint))?.send().await?;
        Self::decode(res).await
    }

    /// Fetches expenses, optionally narrowed server-side by category and
    /// inclusive date bounds.
    pub async fn expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>> {
        let endpoint = self.endpoint("expenses")?;
        tracing::debug!(%endpoint, ?query, "fetching expenses");
        let res = self
            .bearer(self.http.get(endpoint))?
            .query(query)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Fetches the expenses of one `YYYY-MM` month.
    ///
    /// The resolved interval is half-open but the server's `end_date` is
    /// inclusive, so the response is trimmed back to the month locally.
    pub async fn expenses_for_month(&self, selector: &str) -> Result<Vec<Expense>> {
        let range = month::resolve(selector)?;
        let query = ExpenseQuery {
            start_date: Some(range.start.clone()),
            end_date: Some(range.end.clone()),
            ..Default::default()
        };
        let mut expenses = self.expenses(&query).await?;
        expenses.retain(|expense| range.contains(&expense.date));
        Ok(expenses)
    }

    pub async fn expense(&self, id: &str) -> Result<Expense> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let res = self.bearer(self.http.get(endpoint))?.send().await?;
        Self::decode(res).await
    }

    pub async fn create_expense(&self, payload: &ExpenseNew) -> Result<Expense> {
        let endpoint = self.endpoint("expenses")?;
        tracing::debug!(%endpoint, category = %payload.category, "creating expense");
        let res = self
            .bearer(self.http.post(endpoint))?
            .json(payload)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn update_expense(&self, id: &str, payload: &ExpenseUpdate) -> Result<Expense> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let res = self
            .bearer(self.http.put(endpoint))?
            .json(payload)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<()> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        let res = self.bearer(self.http.delete(endpoint))?.send().await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(res).await)
    }

    /// Fetches the server-side aggregate for one `YYYY-MM` month.
    pub async fn monthly_summary(&self, selector: &str) -> Result<MonthlySummary> {
        month::resolve(selector)?;
        let endpoint = self.endpoint("expenses/summary/monthly")?;
        let res = self
            .bearer(self.http.get(endpoint))?
            .query(&[("month", selector)])
            .send()
            .await?;
        Self::decode(res).await
    }

    /// Downloads the month's expense report as raw bytes.
    pub async fn export(&self, selector: &str, format: ExportFormat) -> Result<Vec<u8>> {
        month::resolve(selector)?;
        let endpoint = self.endpoint(&format!("expenses/export/{}", format.as_str()))?;
        tracing::debug!(%endpoint, "downloading export");
        let res = self
            .bearer(self.http.get(endpoint))?
            .query(&[("month", selector)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(Self::error_for(res).await);
        }
        Ok(res.bytes().await?.to_vec())
    }
}
