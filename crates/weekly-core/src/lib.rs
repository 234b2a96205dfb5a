pub mod config;
pub mod normalize;
pub mod report;
pub mod task;

pub use config::{config_path, AsanaConfig, Config, QuipConfig};
pub use normalize::{normalize, CustomField, NormalizeError, RawTask, BLOCKER_FIELD};
pub use report::{aggregate, Report};
pub use task::{classify, fetch_window, Bucket, Classification, Task};
