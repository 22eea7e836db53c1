//! Composition root: wires the client, the single session, the
//! expense cache and the view state together, and gates navigation on
//! session readiness.
//!
//! Everything runs on one cooperative thread of control: requests are
//! awaited individually, a completed fetch replaces the visible
//! collection (last-write-wins), and at most one mutation is in
//! flight per user-initiated action.

use std::time::Duration;

use api_types::{
    expense::{Expense, ExpenseUpdate},
    user::User,
};
use chrono::Utc;
use thiserror::Error;

use crate::{
    amount,
    cache::ExpenseCache,
    client::Client,
    config::AppConfig,
    error::{ApiError, AppError, Result},
    session::{Session, SessionStore},
    stats::{self, ExpenseStats},
    validate::{self, ValidationError},
    view::{self, ExpenseView, SortField},
};

/// Which surface is reachable, derived from session state.
///
/// `Loading` while the session is not ready: no authorization
/// decision may be made before hydration completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Loading,
    Login,
    Expenses,
}

/// A failure surfaced to the calling screen.
///
/// Validation failures never reach the network; API failures arrive
/// already classified with a presentable message.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("another action is still in flight")]
    Busy,
}

pub struct App<S: SessionStore> {
    client: Client,
    session: Session,
    store: S,
    cache: ExpenseCache,
    view: ExpenseView,
    mutation_pending: bool,
}

impl<S: SessionStore> App<S> {
    pub fn new(config: &AppConfig, store: S) -> Result<Self> {
        let client = Client::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            client,
            session: Session::new(),
            store,
            cache: ExpenseCache::new(),
            view: ExpenseView::new(),
            mutation_pending: false,
        })
    }

    /// One-time startup hydration; failures degrade to an anonymous
    /// session so startup can never be blocked by local corruption.
    pub fn bootstrap(&mut self) {
        self.session.hydrate(&self.store);
    }

    pub fn route(&self) -> Route {
        if !self.session.ready() {
            return Route::Loading;
        }
        if self.session.is_authenticated() {
            Route::Expenses
        } else {
            Route::Login
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ExpenseView {
        &self.view
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    fn begin_mutation(&mut self) -> std::result::Result<(), ActionError> {
        if self.mutation_pending {
            return Err(ActionError::Busy);
        }
        self.mutation_pending = true;
        Ok(())
    }

    /// Validates locally, authenticates remotely, persists the user.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), ActionError> {
        validate::validate_login(username, password)?;
        self.begin_mutation()?;
        let res = self.client.login(username, password).await;
        self.mutation_pending = false;
        let user = res?;
        self.session.login(&mut self.store, user)?;
        Ok(())
    }

    pub fn logout(&mut self) -> std::result::Result<(), ActionError> {
        self.session.logout(&mut self.store)?;
        Ok(())
    }

    /// Refetches the collection; the completed result replaces the
    /// cached one wholesale.
    pub async fn refresh_expenses(&mut self) -> std::result::Result<(), ActionError> {
        let expenses = self.client.expenses_list().await?;
        self.cache.put_collection(expenses);
        Ok(())
    }

    /// Cached collection; empty until the first successful fetch.
    pub fn expenses(&self) -> &[Expense] {
        self.cache.collection().unwrap_or(&[])
    }

    /// What the user sees: filtered by the search query, sorted by
    /// the current field/direction.
    pub fn visible_expenses(&self) -> Vec<Expense> {
        self.view.apply(self.expenses())
    }

    /// Two-decimal total over the visible subset.
    pub fn total(&self) -> String {
        view::total(&self.visible_expenses())
    }

    pub fn stats(&self) -> ExpenseStats {
        stats::summarize(self.expenses(), Utc::now())
    }

    pub fn set_search(&mut self, query: &str) {
        self.view.set_query(query);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.view.toggle_sort(field);
    }

    pub async fn create_expense(
        &mut self,
        name: &str,
        amount_input: &str,
        description: &str,
    ) -> std::result::Result<Expense, ActionError> {
        validate::validate_expense(name, amount_input, description)?;
        self.begin_mutation()?;
        let res = self
            .client
            .expense_create(name, amount_input, description)
            .await;
        self.mutation_pending = false;
        let created = res?;
        self.cache.on_created();
        self.refresh_expenses().await?;
        Ok(created)
    }

    pub async fn delete_expense(&mut self, id: &str) -> std::result::Result<(), ActionError> {
        self.begin_mutation()?;
        let res = self.client.expense_delete(id).await;
        self.mutation_pending = false;
        res?;
        self.cache.on_deleted(id);
        Ok(())
    }

    pub async fn update_expense(
        &mut self,
        id: &str,
        update: ExpenseUpdate,
    ) -> std::result::Result<Expense, ActionError> {
        if let Some(amount_input) = update.amount.as_deref() {
            let cents = amount::parse_cents(amount_input)
                .ok_or(ValidationError::AmountNotPositive)?;
            if cents <= 0 {
                return Err(ValidationError::AmountNotPositive.into());
            }
        }
        self.begin_mutation()?;
        let res = self.client.expense_update(id, update).await;
        self.mutation_pending = false;
        let updated = res?;
        self.cache.on_updated(updated.clone());
        Ok(updated)
    }
}
