use crate::db::models::DbMember;
use crate::db::sqlite::FlatStore;
use crate::error::FlatshareError;
use crate::service::ledger::{self, Analysis};
use crate::service::password;
use crate::types::country::Country;
use crate::types::session::FlatSession;
use crate::types::view::BillsView;
use tracing::info;

/// Flat-scoped operations behind the HTTP handlers.
#[derive(Clone)]
pub struct FlatOps {
    storage: FlatStore,
}

impl FlatOps {
    pub fn new(storage: FlatStore) -> Self {
        Self { storage }
    }

    pub async fn connect(database_url: &str) -> Result<Self, FlatshareError> {
        Ok(Self::new(FlatStore::connect(database_url).await?))
    }

    /// Register a flat. The caller still has to log in afterwards.
    pub async fn signup(&self, flat_name: &str, password: &str) -> Result<i64, FlatshareError> {
        let plain = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&plain)).await??;
        let flat_id = self.storage.create_flat(flat_name, &hash).await?;
        info!(flat_id, flat_name, "flat registered");
        Ok(flat_id)
    }

    pub async fn login(&self, flat_name: &str, password: &str) -> Result<FlatSession, FlatshareError> {
        let flat = self
            .storage
            .find_flat(flat_name)
            .await?
            .ok_or(FlatshareError::UnknownFlat)?;

        let candidate = password.to_owned();
        let stored = flat.password.clone();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&candidate, &stored))
                .await??;
        if !matches {
            return Err(FlatshareError::InvalidCredentials);
        }

        Ok(FlatSession {
            flat_id: flat.flat_id,
            country: flat.country(),
            flat_name: flat.flat_name,
        })
    }

    pub async fn list_members(&self, flat_id: i64) -> Result<Vec<DbMember>, FlatshareError> {
        self.storage.list_members(flat_id).await
    }

    pub async fn add_member(&self, flat_id: i64, name: &str) -> Result<DbMember, FlatshareError> {
        self.storage.add_member(flat_id, name).await
    }

    /// Validate the code, then persist it. Returns the session with the new country.
    pub async fn change_location(
        &self,
        session: &FlatSession,
        country_code: &str,
    ) -> Result<FlatSession, FlatshareError> {
        let country: Country = country_code.parse()?;
        self.storage
            .set_country(session.flat_id, country.code())
            .await?;
        Ok(FlatSession {
            country: Some(country),
            ..session.clone()
        })
    }

    pub async fn add_bill(
        &self,
        flat_id: i64,
        content: &str,
        amount: &str,
        member_id: Option<&str>,
    ) -> Result<i64, FlatshareError> {
        let amount = ledger::parse_amount(amount)?;
        let member_id: i64 = member_id
            .and_then(|id| id.trim().parse().ok())
            .ok_or(FlatshareError::UnknownMember)?;
        self.storage
            .add_bill(flat_id, content, amount, member_id)
            .await
    }

    pub async fn bills(&self, flat_id: i64) -> Result<BillsView, FlatshareError> {
        let members = self.storage.list_members(flat_id).await?;
        let bills = self.storage.list_bills(flat_id).await?;
        let total = ledger::bills_total(&bills);
        Ok(BillsView {
            members,
            bills,
            total,
        })
    }

    pub async fn analysis(&self, flat_id: i64) -> Result<Analysis, FlatshareError> {
        let members = self.storage.list_members(flat_id).await?;
        let bills = self.storage.list_bills(flat_id).await?;
        Ok(ledger::analyze(&members, &bills))
    }

    pub async fn clear_bills(&self, flat_id: i64) -> Result<(), FlatshareError> {
        let removed = self.storage.clear_bills(flat_id).await?;
        info!(flat_id, removed, "bills cleared");
        Ok(())
    }

    pub async fn reset_flat(&self, flat_id: i64) -> Result<(), FlatshareError> {
        self.storage.reset_flat(flat_id).await?;
        info!(flat_id, "flat reset");
        Ok(())
    }
}
