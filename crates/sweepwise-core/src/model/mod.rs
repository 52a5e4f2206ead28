/// Data model for Sweepwise scan results and metric samples.
///
/// Every type here is a wire shape: field names are fixed by the JSON
/// contract consumed by the presentation layer and must not be renamed.
pub mod file_info;
pub mod metrics;
pub mod permission;
pub mod result;
pub mod size;

pub use file_info::FileInfo;
pub use metrics::{CpuStats, MemoryStats};
pub use permission::PermissionStatus;
pub use result::CleanerResult;
