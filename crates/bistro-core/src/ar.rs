//! # AR Metadata
//!
//! Mock AR model descriptors and the local AR session log. No model files
//! are fetched or inspected; the descriptor is derived from the menu item.
//!
//! ## Model Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuItem                         ArModel                               │
//! │  ────────                         ───────                               │
//! │  id ────────────────────────────► id = "ar-<id>", item_id               │
//! │  model_path "/m/pasta.glb" ─────► glb_url  "/m/pasta.glb"               │
//! │                            └────► usdz_url "/m/pasta.usdz"              │
//! │  image_url | image | "" ────────► thumbnail_url                         │
//! │                                   file_size 2_048_000, version "1.0"   │
//! │                                                                         │
//! │  Requires: ar_enabled && has_3d_model && model_path non-empty           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::MenuItem;
use crate::AR_SESSION_LOG_LIMIT;

/// Reported size of every mock model, in bytes.
pub const MOCK_MODEL_FILE_SIZE: u64 = 2_048_000;

pub const MOCK_MODEL_VERSION: &str = "1.0";

// =============================================================================
// AR Model
// =============================================================================

/// Descriptor of a renderable 3D model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArModel {
    pub id: String,
    pub item_id: String,
    pub glb_url: String,
    pub usdz_url: String,
    pub thumbnail_url: String,
    pub file_size: u64,
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
    pub version: String,
}

/// Returns true when `item` can produce an [`ArModel`].
pub fn supports_ar(item: &MenuItem) -> bool {
    item.ar_enabled
        && item.has_3d_model
        && item.model_path.as_deref().is_some_and(|p| !p.is_empty())
}

/// Builds the model descriptor of an AR-capable item.
///
/// Only the first `.glb` occurrence of the path is swapped for `.usdz`.
pub fn model_for(item: &MenuItem, now: DateTime<Utc>) -> Option<ArModel> {
    if !supports_ar(item) {
        return None;
    }
    let glb = item.model_path.as_deref()?;

    Some(ArModel {
        id: format!("ar-{}", item.id),
        item_id: item.id.clone(),
        glb_url: glb.to_string(),
        usdz_url: glb.replacen(".glb", ".usdz", 1),
        thumbnail_url: item.thumbnail_url().to_string(),
        file_size: MOCK_MODEL_FILE_SIZE,
        last_updated: now,
        version: MOCK_MODEL_VERSION.to_string(),
    })
}

// =============================================================================
// Session Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "tablet" => Ok(DeviceType::Tablet),
            "desktop" => Ok(DeviceType::Desktop),
            other => Err(ValidationError::InvalidFormat {
                field: "device_type".to_string(),
                reason: format!("unknown device type '{}'", other),
            }),
        }
    }
}

/// Viewer used to present the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ArMode {
    #[default]
    #[serde(rename = "webxr")]
    WebXr,
    #[serde(rename = "scene-viewer")]
    SceneViewer,
    #[serde(rename = "quick-look")]
    QuickLook,
    #[serde(rename = "fallback")]
    Fallback,
}

impl ArMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ArMode::WebXr => "webxr",
            ArMode::SceneViewer => "scene-viewer",
            ArMode::QuickLook => "quick-look",
            ArMode::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ArMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webxr" => Ok(ArMode::WebXr),
            "scene-viewer" => Ok(ArMode::SceneViewer),
            "quick-look" => Ok(ArMode::QuickLook),
            "fallback" => Ok(ArMode::Fallback),
            other => Err(ValidationError::InvalidFormat {
                field: "ar_mode".to_string(),
                reason: format!("unknown AR mode '{}'", other),
            }),
        }
    }
}

// =============================================================================
// AR Session
// =============================================================================

/// A partial session report from the viewer. Missing fields get defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArSessionDraft {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub device_type: Option<DeviceType>,
    #[serde(default)]
    pub ar_mode: Option<ArMode>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub interaction_count: Option<u32>,
}

impl ArSessionDraft {
    pub fn for_item(item_id: impl Into<String>) -> Self {
        ArSessionDraft {
            item_id: Some(item_id.into()),
            ..ArSessionDraft::default()
        }
    }
}

/// A completed AR session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArSession {
    pub id: String,
    pub item_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[ts(as = "String")]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_time: Option<DateTime<Utc>>,
    pub device_type: DeviceType,
    pub ar_mode: ArMode,
    pub success: bool,
    pub interaction_count: u32,
    /// `end_time - start_time` in milliseconds, when the end is known.
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

impl ArSession {
    /// Fills the draft's gaps.
    ///
    /// ## Defaults
    /// - `id`: `"ar-session-<unix millis of now>"`
    /// - `item_id`: empty
    /// - `start_time`: `now`
    /// - `device_type`: desktop, `ar_mode`: webxr
    /// - `success`: false, `interaction_count`: 0
    pub fn complete(draft: ArSessionDraft, now: DateTime<Utc>) -> Self {
        let start_time = draft.start_time.unwrap_or(now);
        let duration_ms = draft
            .end_time
            .map(|end| (end - start_time).num_milliseconds());

        ArSession {
            id: format!("ar-session-{}", now.timestamp_millis()),
            item_id: draft.item_id.unwrap_or_default(),
            user_id: draft.user_id,
            start_time,
            end_time: draft.end_time,
            device_type: draft.device_type.unwrap_or_default(),
            ar_mode: draft.ar_mode.unwrap_or_default(),
            success: draft.success.unwrap_or(false),
            interaction_count: draft.interaction_count.unwrap_or(0),
            duration_ms,
        }
    }
}

/// The persisted session log, oldest first, bounded to the newest
/// [`AR_SESSION_LOG_LIMIT`] records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArSessionLog {
    sessions: Vec<ArSession>,
}

impl ArSessionLog {
    pub fn from_sessions(sessions: Vec<ArSession>) -> Self {
        let mut log = ArSessionLog { sessions };
        log.trim();
        log
    }

    pub fn sessions(&self) -> &[ArSession] {
        &self.sessions
    }

    pub fn push(&mut self, session: ArSession) {
        self.sessions.push(session);
        self.trim();
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn trim(&mut self) {
        if self.sessions.len() > AR_SESSION_LOG_LIMIT {
            let excess = self.sessions.len() - AR_SESSION_LOG_LIMIT;
            self.sessions.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::{Duration, TimeZone};

    fn ar_item() -> MenuItem {
        let mut item = MenuItem::new("1", "Truffle Pasta", "Main Course", Money::from_cents(2899));
        item.ar_enabled = true;
        item.has_3d_model = true;
        item.model_path = Some("/models/pasta.glb".to_string());
        item.image = Some("pasta.jpg".to_string());
        item
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_model_for_ar_item() {
        let model = model_for(&ar_item(), fixed_now()).unwrap();

        assert_eq!(model.id, "ar-1");
        assert_eq!(model.item_id, "1");
        assert_eq!(model.glb_url, "/models/pasta.glb");
        assert_eq!(model.usdz_url, "/models/pasta.usdz");
        assert_eq!(model.thumbnail_url, "pasta.jpg");
        assert_eq!(model.file_size, 2_048_000);
        assert_eq!(model.version, "1.0");
        assert_eq!(model.last_updated, fixed_now());
    }

    #[test]
    fn test_only_first_glb_is_replaced() {
        let mut item = ar_item();
        item.model_path = Some("/glb/a.glb.glb".to_string());
        let model = model_for(&item, fixed_now()).unwrap();
        assert_eq!(model.usdz_url, "/glb/a.usdz.glb");
    }

    #[test]
    fn test_model_requires_every_flag() {
        let mut disabled = ar_item();
        disabled.ar_enabled = false;
        assert!(model_for(&disabled, fixed_now()).is_none());

        let mut no_model = ar_item();
        no_model.has_3d_model = false;
        assert!(model_for(&no_model, fixed_now()).is_none());

        let mut empty_path = ar_item();
        empty_path.model_path = Some(String::new());
        assert!(model_for(&empty_path, fixed_now()).is_none());

        let mut no_path = ar_item();
        no_path.model_path = None;
        assert!(!supports_ar(&no_path));
    }

    #[test]
    fn test_session_defaults() {
        let session = ArSession::complete(ArSessionDraft::default(), fixed_now());

        assert_eq!(session.id, format!("ar-session-{}", fixed_now().timestamp_millis()));
        assert_eq!(session.item_id, "");
        assert_eq!(session.start_time, fixed_now());
        assert_eq!(session.device_type, DeviceType::Desktop);
        assert_eq!(session.ar_mode, ArMode::WebXr);
        assert!(!session.success);
        assert_eq!(session.interaction_count, 0);
        assert!(session.duration_ms.is_none());
    }

    #[test]
    fn test_session_duration() {
        let start = fixed_now();
        let draft = ArSessionDraft {
            item_id: Some("1".to_string()),
            start_time: Some(start),
            end_time: Some(start + Duration::seconds(42)),
            device_type: Some(DeviceType::Mobile),
            ar_mode: Some(ArMode::SceneViewer),
            success: Some(true),
            interaction_count: Some(7),
            ..ArSessionDraft::default()
        };

        let session = ArSession::complete(draft, fixed_now() + Duration::minutes(1));
        assert_eq!(session.duration_ms, Some(42_000));
        assert_eq!(session.device_type, DeviceType::Mobile);
        assert!(session.success);
    }

    #[test]
    fn test_log_keeps_newest() {
        let mut log = ArSessionLog::default();
        for n in 0..(AR_SESSION_LOG_LIMIT + 5) {
            log.push(ArSession::complete(
                ArSessionDraft::for_item(n.to_string()),
                fixed_now(),
            ));
        }
        assert_eq!(log.len(), AR_SESSION_LOG_LIMIT);
        assert_eq!(log.sessions()[0].item_id, "5");
        assert_eq!(
            log.sessions()[AR_SESSION_LOG_LIMIT - 1].item_id,
            (AR_SESSION_LOG_LIMIT + 4).to_string()
        );
    }

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(serde_json::to_string(&ArMode::QuickLook).unwrap(), "\"quick-look\"");
        assert_eq!("webxr".parse::<ArMode>().unwrap(), ArMode::WebXr);
        assert_eq!("Tablet".parse::<DeviceType>().unwrap(), DeviceType::Tablet);
    }
}
