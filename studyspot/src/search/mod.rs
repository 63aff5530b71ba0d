//! Library search: validation, remote queries and result state.
//!
//! [`LibrarySearch`] turns a [`SearchMode`] into a [`SearchOutcome`];
//! [`SearchSession`] keeps the latest outcome and discards late responses
//! from superseded searches.

mod advisory;
mod config;
mod library_search;
mod session;

pub use advisory::{SearchAdvisory, SearchKind};
pub use config::SearchConfig;
pub use library_search::{LibrarySearch, LibrarySource, SearchMode, SearchOutcome, SearchResults};
pub use session::{SearchSession, SearchTicket};
