//! Plain data holders filled in while a session connects, then read-only.

use chrono::{DateTime, Utc};
use url::Url;

/// GetDeviceInformation response.
#[derive(Debug, Default, Clone)]
pub struct DeviceInfo {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    pub serial_number: Option<String>,
    pub hardware_id: Option<String>,
}

/// Per-service endpoints from GetCapabilities. A `None` means the device did
/// not advertise that sub-service; the matching facade refuses calls.
#[derive(Debug, Default, Clone)]
pub struct Capabilities {
    pub url_media: Option<Url>,
    pub url_events: Option<Url>,
    pub url_analytics: Option<Url>,
    pub url_ptz: Option<Url>,
    pub url_imaging: Option<Url>,
}

/// One media profile as listed by GetProfiles.
#[derive(Debug, Clone)]
pub struct Profile {
    pub token: String,
    pub name: Option<String>,
}

/// One entry from GetServices: the service namespace and where it answers.
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    pub namespace: String,
    pub xaddr: String,
}

/// GetStreamUri response.
#[derive(Debug, Default, Clone)]
pub struct StreamUri {
    pub uri: Option<String>,
    pub invalid_after_connect: Option<String>,
    pub timeout: Option<String>,
}

/// One device account from GetUsers.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub user_level: String,
}

/// One PTZ or imaging preset.
#[derive(Debug, Clone)]
pub struct Preset {
    pub token: String,
    pub name: Option<String>,
}

/// Device clock reading from GetSystemDateAndTime.
#[derive(Debug, Clone)]
pub struct SystemDateTime {
    pub utc: DateTime<Utc>,
}
