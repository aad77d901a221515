pub mod contract;
pub mod cw20;
pub mod error;
mod guard;
mod ledger;
pub mod migration;
pub mod msg;
pub mod query;
pub mod state;
mod whitelist;
mod withdrawal;
