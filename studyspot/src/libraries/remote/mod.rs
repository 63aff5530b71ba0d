//! Remote library directory backed by the Calil API.

mod client;
mod error;
mod normalize;
mod types;

pub use client::{
    CalilClient, CalilConfig, DEFAULT_LOCATION_LIMIT, DEFAULT_SEARCH_RADIUS_M, filter_by_radius,
};
pub use error::CalilError;
pub use normalize::{LibraryResponse, OneOrMany, Wrapped, normalize_response, strip_jsonp};
pub use types::{
    LibraryCategory, RemoteLibraryRecord, book_url, library_page_url, library_search_url,
};
