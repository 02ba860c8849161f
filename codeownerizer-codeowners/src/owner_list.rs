//! Explicit owner lists: an ordered `[{kind, raw}]` document.
//!
//! `.json` files are read with serde_json; anything else is treated as YAML.
//!
//! ```yaml
//! - kind: team
//!   raw: "@org/octocats"
//! - kind: email
//!   raw: docs@example.com
//! ```

use std::fs;
use std::path::Path;

use codeownerizer_core::types::OwnerRecord;

use crate::CodeownersError;

/// Read an owner list file, preserving declaration order.
pub fn load_owner_list(path: &Path) -> Result<Vec<OwnerRecord>, CodeownersError> {
    let content = fs::read_to_string(path).map_err(|e| CodeownersError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str::<Vec<OwnerRecord>>(&content).map_err(|e| e.to_string())
    } else if content.trim().is_empty() {
        Ok(Vec::new())
    } else {
        serde_yaml::from_str::<Vec<OwnerRecord>>(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| CodeownersError::OwnerList {
        path: path.to_path_buf(),
        message,
    })
}
