//! Wire types shared by the `activity` binary: the configuration snapshot
//! persisted next to the generated history, and the JSON documents printed by
//! `--json` modes.

use serde::Serialize;

mod error;
pub mod report;
pub mod snapshot;

pub use error::{ProtocolError, Result};
pub use report::{
    placement_label, IntensityEntry, PreviewReport, StatusReport, VersionEntry, VersionsReport,
    WindowReport, ROLLOVER_WARNING_WEEK,
};
pub use snapshot::{
    load_snapshot, save_snapshot, snapshot_path, ConfigSnapshot, SnapshotOptions, WindowInfo,
    SNAPSHOT_FILE,
};

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
