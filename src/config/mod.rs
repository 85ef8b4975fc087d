//! Configuration management
//!
//! - **settings**: the user settings document and its load/save rules
//! - **panel**: the per-panel layout record stored inside it

pub mod panel;
pub mod settings;

// Re-export commonly used types
pub use panel::PanelLayout;
pub use settings::{LoadOutcome, Settings};

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Field deserializer that treats a value of the wrong type as absent
///
/// Used with `#[serde(default)]` patch structs so one bad field in a
/// hand-edited file costs only that field, not the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(value = %value, error = %e, "Ignoring setting with the wrong type, keeping default");
            Ok(None)
        }
    }
}
