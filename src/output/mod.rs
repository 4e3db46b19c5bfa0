//! Sample sinks and JSON output.

mod json;
mod sink;

pub use json::{state_to_json, to_json, to_json_pretty, MatrixRecord, StateRecord};
pub use sink::{MatrixKind, MemorySink, NullSink, RowMajorWriter, SampleSink};
