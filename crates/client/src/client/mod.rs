//! Thin HTTP wrapper over the remote collection store.
//!
//! The store is an opaque REST resource with no transactional
//! guarantees and sloppy payloads, so this layer does two jobs:
//! classify every failure into the closed [`ApiError`] taxonomy, and
//! normalize every fetched record before anything downstream sees it.

use std::time::Duration;

use api_types::{
    expense::{Expense, ExpenseNew, ExpenseUpdate, RawExpense},
    user::User,
};
use chrono::Utc;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{
    amount,
    error::{ApiError, AppError},
    view::{self, SortDirection, SortField},
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Builds a client with a fixed request timeout; on timeout an
    /// operation fails with [`ApiError::Timeout`] instead of hanging.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| AppError::InvalidBaseUrl(err.to_string()))?;
        // `Url::join` drops the last path segment unless the base ends
        // with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Unknown(format!("invalid endpoint: {err}")))
    }

    /// Fetches candidates by username and matches credentials
    /// client-side: the remote filter may return substring matches and
    /// is a convenience, not authoritative.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let endpoint = self.endpoint("users")?;
        tracing::debug!("GET {endpoint}");

        let res = self
            .http
            .get(endpoint)
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|err| map_transport(err, "login"))?;
        tracing::debug!("login response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "login").await);
        }

        let candidates = res
            .json::<Vec<User>>()
            .await
            .map_err(|err| map_transport(err, "login"))?;
        if candidates.is_empty() {
            return Err(ApiError::NotFound("User".to_string()));
        }

        candidates
            .into_iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or_else(|| ApiError::Unknown("Invalid username or password".to_string()))
    }

    /// Fetches the whole collection, normalized and sorted by
    /// `createdAt` descending (consistent with the view-model's
    /// default order).
    pub async fn expenses_list(&self) -> Result<Vec<Expense>, ApiError> {
        let endpoint = self.endpoint("expenses")?;
        tracing::debug!("GET {endpoint}");

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|err| map_transport(err, "fetch expenses"))?;
        tracing::debug!("expenses response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "fetch expenses").await);
        }

        let raw = res
            .json::<Vec<RawExpense>>()
            .await
            .map_err(|err| map_transport(err, "fetch expenses"))?;
        let expenses: Vec<Expense> = raw.into_iter().filter_map(normalize).collect();
        Ok(view::sort(expenses, SortField::Date, SortDirection::Desc))
    }

    pub async fn expense_get(&self, id: &str) -> Result<Expense, ApiError> {
        if id.is_empty() {
            return Err(ApiError::Unknown("Expense ID is required".to_string()));
        }
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        tracing::debug!("GET {endpoint}");

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|err| map_transport(err, "fetch expense"))?;
        tracing::debug!("expense response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "fetch expense").await);
        }

        let raw = res
            .json::<RawExpense>()
            .await
            .map_err(|err| map_transport(err, "fetch expense"))?;
        normalize(raw).ok_or_else(|| ApiError::NotFound("Expense".to_string()))
    }

    /// Creates an expense. Name and description are re-trimmed and the
    /// amount re-canonicalized here so the store only ever sees clean
    /// payloads; the timestamp is defaulted client-side in case the
    /// store does not assign one.
    pub async fn expense_create(
        &self,
        name: &str,
        amount_input: &str,
        description: &str,
    ) -> Result<Expense, ApiError> {
        let endpoint = self.endpoint("expenses")?;
        tracing::debug!("POST {endpoint}");

        let payload = ExpenseNew {
            name: name.trim().to_string(),
            amount: amount::canonical(amount_input),
            description: description.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let res = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| map_transport(err, "create expense"))?;
        tracing::debug!("create response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "create expense").await);
        }

        let raw = res
            .json::<RawExpense>()
            .await
            .map_err(|err| map_transport(err, "create expense"))?;
        normalize(raw).ok_or_else(|| {
            ApiError::Unknown("Failed to create expense - no data returned".to_string())
        })
    }

    /// Partially updates an expense; absent fields stay untouched.
    pub async fn expense_update(
        &self,
        id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense, ApiError> {
        if id.is_empty() {
            return Err(ApiError::Unknown(
                "Expense ID is required for update".to_string(),
            ));
        }
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        tracing::debug!("PUT {endpoint}");

        let payload = ExpenseUpdate {
            name: update
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            amount: update.amount.map(|a| amount::canonical(&a)),
            description: update.description.map(|d| d.trim().to_string()),
        };

        let res = self
            .http
            .put(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| map_transport(err, "update expense"))?;
        tracing::debug!("update response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "update expense").await);
        }

        let raw = res
            .json::<RawExpense>()
            .await
            .map_err(|err| map_transport(err, "update expense"))?;
        normalize(raw).ok_or_else(|| {
            ApiError::Unknown("Failed to update expense - no data returned".to_string())
        })
    }

    pub async fn expense_delete(&self, id: &str) -> Result<(), ApiError> {
        if id.is_empty() {
            return Err(ApiError::Unknown(
                "Expense ID is required for deletion".to_string(),
            ));
        }
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        tracing::debug!("DELETE {endpoint}");

        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(|err| map_transport(err, "delete expense"))?;
        tracing::debug!("delete response: {}", res.status());

        if !res.status().is_success() {
            return Err(read_failure(res, "delete expense").await);
        }
        Ok(())
    }
}

/// Normalizes a wire record; `None` when the record carries no id
/// (it cannot be addressed for update/delete and is dropped).
pub fn normalize(raw: RawExpense) -> Option<Expense> {
    let id = raw.id.filter(|id| !id.is_empty())?;
    Some(Expense {
        id,
        name: raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unnamed Expense".to_string()),
        amount: raw
            .amount
            .as_deref()
            .map(amount::canonical)
            .unwrap_or_else(|| "0".to_string()),
        description: raw.description.unwrap_or_default(),
        created_at: raw
            .created_at
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
    })
}

fn map_transport(err: reqwest::Error, context: &str) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Unknown(format!("Failed to {context}: {err}"))
}

async fn read_failure(res: reqwest::Response, context: &str) -> ApiError {
    let status = res.status();
    let message = res.json::<ErrorBody>().await.ok().and_then(|b| b.message);
    map_status(status, message, context)
}

fn map_status(status: StatusCode, message: Option<String>, context: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound(context.to_string());
    }
    if status == StatusCode::BAD_REQUEST {
        return ApiError::BadRequest(context.to_string());
    }
    if status.is_server_error() {
        return ApiError::ServerError;
    }
    if let Some(message) = message {
        return ApiError::ServerMessage(message);
    }
    ApiError::Unknown(format!("Failed to {context}"))
}
