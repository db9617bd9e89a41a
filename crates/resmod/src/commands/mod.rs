mod config;
mod edit;
mod export;
mod info;

pub use config::{clear_mod_config, set_mod_config, show_config};
pub use edit::{import_block, remove_resource, ImportBlockArgs, RemoveResourceArgs};
pub use export::{export_block, ExportBlockArgs};
pub use info::{info_snapshot, InfoSnapshotArgs};
