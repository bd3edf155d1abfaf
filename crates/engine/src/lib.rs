pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{
    DEFAULT_ITEMS_PER_PAGE, Engine, EngineBuilder, NewWalletItem, Page, UpdateWalletItemCmd,
    WalletTotals,
};
pub use wallet_items::{ItemType, WalletItem};
pub use wallets::Wallet;

mod error;
mod money;
mod ops;
pub mod wallet_items;
pub mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
