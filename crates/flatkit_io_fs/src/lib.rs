//! `flatkit_io_fs` v1:
//! Flat collector for source trees.
//!
//! Modules:
//! - `collect` : traversal, pruning and copy orchestration
//! - `naming`  : collision-free destination names
//! - `bundle`  : single-file dump of collected sources
//! - `spec`    : options/records/errors
//! - `report`  : run-time report model
//! - `util`    : shared helper functions

pub mod bundle;
pub mod collect;
pub mod naming;
pub mod report;
pub mod spec;
mod util;

pub use bundle::{validate_bundle_path, write_bundle};
pub use collect::collect_flat;
pub use naming::{resolve_destination_name, resolve_destination_os_name};
pub use report::{ReportCollect, ReportCollectBuilder};
pub use spec::{
    C_EXTENSION_DEFAULT, CollectError, EnumCollectFailurePolicy, L_NAMES_IGNORE_DIRS_DEFAULT,
    RecordCopiedFile, SpecCollectError, SpecCollectOptions,
};
