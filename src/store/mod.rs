//! Record store facade and reference implementation.
//!
//! The paginator treats the store as an opaque, possibly slow, async
//! collaborator. [`RecordStore`] is the seam; [`Store`] is the owning
//! wrapper the rest of the crate consumes; [`MemoryStore`] is the
//! in-memory reference engine used by the tests and the demo binary.

pub mod facade;
pub mod memory;
pub mod query;
pub mod record;
pub mod schema;

pub use facade::{RecordStore, Store};
pub use memory::MemoryStore;
pub use query::{Constraint, OrderDirection, Query, SortSpec};
pub use record::{Record, RecordId};
pub use schema::{FieldKind, FieldSpec, Schema};
