//! Per-service facades built from a connected [`crate::session::DeviceSession`].
//! Each facade caches the endpoint its sub-service answers on; a device that
//! does not advertise the service yields [`crate::error::Error::Unsupported`]
//! on every call instead of a request to nowhere.
//!
//! Write operations return `Result<()>` once the response passed fault
//! detection. Read operations return typed values where callers need the
//! fields, and the raw response XML for the catalogs whose shape is
//! device specific.

pub mod analytics;
pub mod device;
pub mod event;
pub mod imaging;
pub mod media;
pub mod ptz;

pub use analytics::AnalyticsService;
pub use device::DeviceService;
pub use event::{EventService, PullPointSubscription, RenewResponse};
pub use imaging::ImagingService;
pub use media::MediaService;
pub use ptz::PtzService;

use std::io::BufReader;

use log::warn;
use xml::reader::{EventReader, XmlEvent};

use crate::device::Preset;

/// Extracts `(token, Name)` pairs from a GetPresets response. Shared by PTZ
/// and imaging, which use the same Preset shape.
pub(crate) fn parse_presets(response: &[u8]) -> Vec<Preset> {
    let parser = EventReader::new(BufReader::new(response));

    let mut presets: Vec<Preset> = Vec::new();
    let mut in_preset = false;
    let mut capture_name = false;

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => match name.local_name.as_str() {
                "Preset" => {
                    in_preset = true;
                    let token = attributes
                        .iter()
                        .find(|a| a.name.local_name == "token")
                        .map(|a| a.value.clone())
                        .unwrap_or_default();
                    presets.push(Preset { token, name: None });
                }
                "Name" if in_preset => capture_name = true,
                _ => {}
            },
            Ok(XmlEvent::EndElement { name }) => match name.local_name.as_str() {
                "Preset" => in_preset = false,
                "Name" => capture_name = false,
                _ => {}
            },
            Ok(XmlEvent::Characters(chars)) => {
                if capture_name {
                    if let Some(preset) = presets.last_mut() {
                        preset.name = Some(chars);
                    }
                    capture_name = false;
                }
            }
            Err(e) => {
                warn!("[parse_presets] XML error: {e}");
                break;
            }
            _ => {}
        }
    }

    presets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_keep_token_and_name() {
        let xml = r#"<Envelope><Body><GetPresetsResponse>
            <Preset token="preset_1"><Name>door</Name></Preset>
            <Preset token="preset_2"/>
        </GetPresetsResponse></Body></Envelope>"#;

        let presets = parse_presets(xml.as_bytes());
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].token, "preset_1");
        assert_eq!(presets[0].name.as_deref(), Some("door"));
        assert_eq!(presets[1].token, "preset_2");
        assert!(presets[1].name.is_none());
    }
}
