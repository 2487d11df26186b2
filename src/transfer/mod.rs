//! Transfer module: encrypted export bundles.
//!
//! This module provides:
//! - The `ExportBundle` file envelope and its decrypted payload (`bundle`)
//! - Export, merge/replace import and conflict resolution (`codec`)

pub mod bundle;
pub mod codec;

pub use bundle::{ExportBundle, ExportPayload, FORMAT_TAG, PAYLOAD_VERSION};
pub use codec::{
    export_all, import_bundle, resolve_conflicts, Conflict, ImportMode, ImportReport, Resolution,
};
