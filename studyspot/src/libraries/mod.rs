//! Library directories.
//!
//! [`local`] is a small curated table with known opening hours.
//! [`remote`] queries the Calil API for the full national directory.

pub mod local;
pub mod remote;

pub use local::{
    CalendarEvent, CalendarEventKind, LibraryKind, LibraryStatus, MajorLibrary, NearbyLibrary,
};
pub use remote::{CalilClient, CalilConfig, CalilError, LibraryCategory, RemoteLibraryRecord};
