//! Contract definitions for ledger collaborators.
//!
//! The engine never owns transaction or category data; these traits are the
//! only way it reads them.

mod category_service;
mod ledger_reader;

pub use category_service::CategoryService;
pub use ledger_reader::TransactionLedgerReader;
