pub mod contract;
pub mod error;
pub mod exchange;
pub mod governor;
pub mod helpers;
pub mod ledger;
pub mod msg;
pub mod points;
pub mod registry;
pub mod state;
