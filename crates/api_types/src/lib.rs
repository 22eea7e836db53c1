use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// A registered user as stored by the remote collection.
    ///
    /// Immutable once fetched; the client never mutates it locally.
    /// `id` and `username` are unique within the remote store, but the
    /// store enforces that, not the client.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: String,
        pub username: String,
        pub password: String,
        /// RFC3339 timestamp assigned by the store.
        #[serde(rename = "createdAt", default)]
        pub created_at: String,
    }
}

pub mod expense {
    use super::*;

    /// Wire shape of an expense record.
    ///
    /// The remote store makes no guarantees: any field may be missing
    /// or malformed. The client normalizes every fetched record into
    /// an [`Expense`] and drops records without an `id` (they cannot
    /// be addressed for update/delete).
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct RawExpense {
        pub id: Option<String>,
        pub name: Option<String>,
        /// Decimal amount as a string, possibly unparsable.
        pub amount: Option<String>,
        pub description: Option<String>,
        #[serde(rename = "createdAt")]
        pub created_at: Option<String>,
    }

    /// A normalized expense record.
    ///
    /// `amount` is a canonical decimal string: non-negative, at most
    /// two fractional digits, trailing zeros trimmed.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: String,
        pub name: String,
        pub amount: String,
        pub description: String,
        /// RFC3339 timestamp; defaulted client-side when the store
        /// omits it.
        #[serde(rename = "createdAt")]
        pub created_at: String,
    }

    /// Request body for creating an expense.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub name: String,
        pub amount: String,
        pub description: String,
        #[serde(rename = "createdAt")]
        pub created_at: String,
    }

    /// Partial request body for updating an expense.
    ///
    /// Absent fields are left untouched by the store.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
    }
}
