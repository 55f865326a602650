//! Cities: the validated `City` record, attendee file ingestion, and host
//! resolution against the attendee list and a built-in host dataset.

pub mod builtin;
pub mod ingest;
pub mod resolver;
pub mod types;

pub use builtin::{builtin_host, builtin_host_list, render_host_list, HostInfo};
pub use ingest::{read_attendees, read_attendees_file, read_attendees_json};
pub use resolver::{HostResolver, HostSource, ResolvedHost};
pub use types::City;
