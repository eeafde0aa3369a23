//! Recipient selection: filters, the selection ledger and paged user search.

pub mod filters;
pub mod ledger;
pub mod search;

pub use filters::{FilterError, FilterState};
pub use ledger::{LedgerInvariantError, PageCheckState, SelectionLedger};
pub use search::{SearchController, SearchKey, SearchPage, SearchState};
