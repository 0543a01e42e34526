use chrono::NaiveDate;

use super::endpoints::{keys, Endpoint};
use super::query::QueryBuilder;
use crate::error::{ReportError, Result};

/// A single report call before it is turned into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    endpoint: Endpoint,
    params: QueryBuilder,
}

impl ReportRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: QueryBuilder::new(),
        }
    }

    /// Request scoped to one project. Fails on an empty (or blank) project ID.
    pub fn for_project(endpoint: Endpoint, project_id: &str) -> Result<Self> {
        let project_id = required(keys::PROJECT_ID, project_id)?;
        Ok(Self::new(endpoint).with(|q| q.text(keys::PROJECT_ID, project_id)))
    }

    /// Apply further parameters through the builder.
    pub fn with(mut self, f: impl FnOnce(QueryBuilder) -> QueryBuilder) -> Self {
        self.params = f(self.params);
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn params(&self) -> &QueryBuilder {
        &self.params
    }

    pub fn project_id(&self) -> Option<&str> {
        self.params.get(keys::PROJECT_ID)
    }
}

/// Trimmed value of a required argument, or a validation error naming it.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReportError::missing(field));
    }
    Ok(trimmed)
}

/// Rejects a range whose ISO dates are out of order. Dates in any other
/// format are left for the service to interpret.
pub(crate) fn check_date_order(start: &str, end: &str) -> Result<()> {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    if let (Some(start_date), Some(end_date)) = (parse(start), parse(end)) {
        if start_date > end_date {
            return Err(ReportError::Validation {
                field: keys::START_DATE,
                reason: format!("{} is after end date {}", start, end),
            });
        }
    }
    Ok(())
}
