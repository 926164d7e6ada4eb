pub mod content;
pub mod event;
pub mod snapshot;

pub use content::{StructureContent, StructureKind, TreeNode};
pub use event::{Operation, OperationDetail, Timestamp, TraceEvent};
pub use snapshot::{EntitySequence, Snapshot};
