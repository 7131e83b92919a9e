pub mod checkpoint;
pub mod entry;
pub mod ids;
pub mod provenance;

pub use checkpoint::Checkpoint;
pub use entry::{Entry, EntryKind};
pub use provenance::Provenance;
