//! Imaging request bodies.

use crate::params::imaging::{FocusMove, ImagingSettings20};
use crate::params::ToXml;
use crate::utils::xml_escape;

#[derive(Debug, Clone)]
pub struct MoveFocus {
    pub video_source_token: String,
    pub focus: FocusMove,
}

impl MoveFocus {
    pub fn new(video_source_token: &str, focus: FocusMove) -> Self {
        MoveFocus {
            video_source_token: video_source_token.to_string(),
            focus,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<timg:Move>");
        body.push_str(&format!(
            "<timg:VideoSourceToken>{}</timg:VideoSourceToken>",
            xml_escape(&self.video_source_token)
        ));
        body.push_str("<timg:Focus>");
        self.focus.write_xml(&mut body);
        body.push_str("</timg:Focus></timg:Move>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct SetImagingSettings {
    pub video_source_token: String,
    pub imaging_settings: ImagingSettings20,
    pub force_persistence: Option<bool>,
}

impl SetImagingSettings {
    pub fn new(video_source_token: &str, imaging_settings: ImagingSettings20) -> Self {
        SetImagingSettings {
            video_source_token: video_source_token.to_string(),
            imaging_settings,
            force_persistence: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<timg:SetImagingSettings>");
        body.push_str(&format!(
            "<timg:VideoSourceToken>{}</timg:VideoSourceToken>",
            xml_escape(&self.video_source_token)
        ));
        body.push_str("<timg:ImagingSettings>");
        self.imaging_settings.write_xml(&mut body);
        body.push_str("</timg:ImagingSettings>");
        if let Some(force) = self.force_persistence {
            body.push_str(&format!(
                "<timg:ForcePersistence>{force}</timg:ForcePersistence>"
            ));
        }
        body.push_str("</timg:SetImagingSettings>");
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_body_nests_focus_variant() {
        let body = MoveFocus::new("vs_0", FocusMove::absolute(0.8, Some(0.5))).to_body();
        assert!(body.contains("<timg:VideoSourceToken>vs_0</timg:VideoSourceToken>"));
        assert!(body.contains("<timg:Focus><tt:Absolute><tt:Position>0.8</tt:Position>"));
    }

    #[test]
    fn force_persistence_is_optional() {
        let mut message = SetImagingSettings::new("vs_0", ImagingSettings20::default());
        assert!(!message.to_body().contains("ForcePersistence"));
        message.force_persistence = Some(true);
        assert!(message
            .to_body()
            .contains("<timg:ForcePersistence>true</timg:ForcePersistence>"));
    }
}
