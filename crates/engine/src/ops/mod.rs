use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod wallet_items;
mod wallets;

pub use wallet_items::{NewWalletItem, Page, UpdateWalletItemCmd, WalletTotals};

/// Page size used when none is configured.
pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    items_per_page: u64,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Number of items returned by paginated queries.
    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidItem(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    items_per_page: u64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Page size of the date-range listing. Zero falls back to the default.
    pub fn items_per_page(mut self, items_per_page: u64) -> EngineBuilder {
        self.items_per_page = if items_per_page == 0 {
            DEFAULT_ITEMS_PER_PAGE
        } else {
            items_per_page
        };
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            items_per_page: self.items_per_page,
        })
    }
}
