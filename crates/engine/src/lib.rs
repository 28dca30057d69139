//! Pure client-side core for the expense tracker.
//!
//! Two leaves live here, both free of I/O and shared state:
//!
//! - [`filter`] narrows an in-memory expense list by free-text search,
//!   category and inclusive date bounds.
//! - [`month`] turns a `YYYY-MM` selector into the half-open date interval
//!   covering that month.
//!
//! Callers pass values in and get fresh values back; re-invoking any
//! function here is idempotent.

pub use error::EngineError;
pub use filter::FilterCriteria;
pub use month::MonthRange;

mod error;
pub mod filter;
pub mod month;

type ResultEngine<T> = Result<T, EngineError>;
