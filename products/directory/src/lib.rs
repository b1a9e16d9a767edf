//! Employee directory slice: the record shape read from the data service and
//! the pure presentation rules applied before rendering.
//!
//! Nothing here performs I/O. The data access lives in `platform-db`, the
//! markup in the server binary.

pub mod present;
pub mod record;
pub mod view;

mod proptests;

pub use present::{Cell, DisplayRecord, MISSING_MARKER, UNKNOWN_INITIAL, UNKNOWN_NAME};
pub use record::{EmployeeRecord, RecordKey};
pub use view::{Classification, DirectoryView, FetchError, FetchOutcome, classify};
