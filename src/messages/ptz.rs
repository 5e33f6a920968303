//! PTZ request bodies.

use crate::params::ptz::{
    PresetTour, PtzConfiguration, PtzGeoLocation, PtzSpeed, PtzVector,
};
use crate::params::ToXml;
use crate::utils::xml_escape;

fn profile_token(body: &mut String, token: &str) {
    body.push_str(&format!(
        "<tptz:ProfileToken>{}</tptz:ProfileToken>",
        xml_escape(token)
    ));
}

#[derive(Debug, Clone)]
pub struct AbsoluteMove {
    pub profile_token: String,
    pub position: PtzVector,
    pub speed: Option<PtzSpeed>,
}

impl AbsoluteMove {
    pub fn new(profile_token: &str, position: PtzVector) -> Self {
        AbsoluteMove {
            profile_token: profile_token.to_string(),
            position,
            speed: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:AbsoluteMove>");
        profile_token(&mut body, &self.profile_token);
        body.push_str("<tptz:Position>");
        self.position.write_xml(&mut body);
        body.push_str("</tptz:Position>");
        if let Some(speed) = &self.speed {
            body.push_str("<tptz:Speed>");
            speed.write_xml(&mut body);
            body.push_str("</tptz:Speed>");
        }
        body.push_str("</tptz:AbsoluteMove>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct RelativeMove {
    pub profile_token: String,
    pub translation: PtzVector,
    pub speed: Option<PtzSpeed>,
}

impl RelativeMove {
    pub fn new(profile_token: &str, translation: PtzVector) -> Self {
        RelativeMove {
            profile_token: profile_token.to_string(),
            translation,
            speed: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:RelativeMove>");
        profile_token(&mut body, &self.profile_token);
        body.push_str("<tptz:Translation>");
        self.translation.write_xml(&mut body);
        body.push_str("</tptz:Translation>");
        if let Some(speed) = &self.speed {
            body.push_str("<tptz:Speed>");
            speed.write_xml(&mut body);
            body.push_str("</tptz:Speed>");
        }
        body.push_str("</tptz:RelativeMove>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct ContinuousMove {
    pub profile_token: String,
    pub velocity: PtzSpeed,
    /// ISO-8601 duration after which the device stops on its own.
    pub timeout: Option<String>,
}

impl ContinuousMove {
    pub fn new(profile_token: &str, velocity: PtzSpeed) -> Self {
        ContinuousMove {
            profile_token: profile_token.to_string(),
            velocity,
            timeout: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:ContinuousMove>");
        profile_token(&mut body, &self.profile_token);
        body.push_str("<tptz:Velocity>");
        self.velocity.write_xml(&mut body);
        body.push_str("</tptz:Velocity>");
        if let Some(timeout) = &self.timeout {
            body.push_str(&format!(
                "<tptz:Timeout>{}</tptz:Timeout>",
                xml_escape(timeout)
            ));
        }
        body.push_str("</tptz:ContinuousMove>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct GeoMove {
    pub profile_token: String,
    pub target: PtzGeoLocation,
    pub speed: Option<PtzSpeed>,
    pub area_height: Option<f32>,
    pub area_width: Option<f32>,
}

impl GeoMove {
    pub fn new(profile_token: &str, target: PtzGeoLocation) -> Self {
        GeoMove {
            profile_token: profile_token.to_string(),
            target,
            speed: None,
            area_height: None,
            area_width: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:GeoMove>");
        profile_token(&mut body, &self.profile_token);
        self.target.write_as(&mut body, "tptz:Target");
        if let Some(speed) = &self.speed {
            body.push_str("<tptz:Speed>");
            speed.write_xml(&mut body);
            body.push_str("</tptz:Speed>");
        }
        if let Some(height) = self.area_height {
            body.push_str(&format!("<tptz:AreaHeight>{height}</tptz:AreaHeight>"));
        }
        if let Some(width) = self.area_width {
            body.push_str(&format!("<tptz:AreaWidth>{width}</tptz:AreaWidth>"));
        }
        body.push_str("</tptz:GeoMove>");
        body
    }
}

/// Combined move plus tracking start. Exactly one of `preset_token`,
/// `geo_location` or `target_position` should be set.
#[derive(Debug, Clone)]
pub struct MoveAndStartTracking {
    pub profile_token: String,
    pub preset_token: Option<String>,
    pub geo_location: Option<PtzGeoLocation>,
    pub target_position: Option<PtzVector>,
    pub speed: Option<PtzSpeed>,
    pub object_id: Option<i32>,
}

impl MoveAndStartTracking {
    pub fn to_preset(profile_token: &str, preset_token: &str) -> Self {
        MoveAndStartTracking {
            profile_token: profile_token.to_string(),
            preset_token: Some(preset_token.to_string()),
            geo_location: None,
            target_position: None,
            speed: None,
            object_id: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:MoveAndStartTracking>");
        profile_token(&mut body, &self.profile_token);
        if let Some(token) = &self.preset_token {
            body.push_str(&format!(
                "<tptz:PresetToken>{}</tptz:PresetToken>",
                xml_escape(token)
            ));
        }
        if let Some(location) = &self.geo_location {
            location.write_as(&mut body, "tptz:GeoLocation");
        }
        if let Some(position) = &self.target_position {
            body.push_str("<tptz:TargetPosition>");
            position.write_xml(&mut body);
            body.push_str("</tptz:TargetPosition>");
        }
        if let Some(speed) = &self.speed {
            body.push_str("<tptz:Speed>");
            speed.write_xml(&mut body);
            body.push_str("</tptz:Speed>");
        }
        if let Some(id) = self.object_id {
            body.push_str(&format!("<tptz:ObjectID>{id}</tptz:ObjectID>"));
        }
        body.push_str("</tptz:MoveAndStartTracking>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct ModifyPresetTour {
    pub profile_token: String,
    pub preset_tour: PresetTour,
}

impl ModifyPresetTour {
    pub fn new(profile_token: &str, preset_tour: PresetTour) -> Self {
        ModifyPresetTour {
            profile_token: profile_token.to_string(),
            preset_tour,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:ModifyPresetTour>");
        profile_token(&mut body, &self.profile_token);
        body.push_str(&format!(
            "<tptz:PresetTour token=\"{}\">",
            xml_escape(&self.preset_tour.token)
        ));
        self.preset_tour.write_xml(&mut body);
        body.push_str("</tptz:PresetTour></tptz:ModifyPresetTour>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct SetConfiguration {
    pub ptz_configuration: PtzConfiguration,
    pub force_persistence: bool,
}

impl SetConfiguration {
    pub fn new(ptz_configuration: PtzConfiguration) -> Self {
        SetConfiguration {
            ptz_configuration,
            force_persistence: false,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tptz:SetConfiguration>");
        body.push_str(&format!(
            "<tptz:PTZConfiguration token=\"{}\">",
            xml_escape(&self.ptz_configuration.token)
        ));
        self.ptz_configuration.write_xml(&mut body);
        body.push_str("</tptz:PTZConfiguration>");
        body.push_str(&format!(
            "<tptz:ForcePersistence>{}</tptz:ForcePersistence>",
            self.force_persistence
        ));
        body.push_str("</tptz:SetConfiguration>");
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_move_orders_token_position_speed() {
        let mut message = AbsoluteMove::new("prof_0", PtzVector::new(0.5, -0.25, 0.0));
        message.speed = Some(PtzSpeed::new(1.0, 1.0, 1.0));
        let body = message.to_body();
        let token_at = body.find("ProfileToken").unwrap();
        let position_at = body.find("tptz:Position").unwrap();
        let speed_at = body.find("tptz:Speed").unwrap();
        assert!(token_at < position_at && position_at < speed_at);
    }

    #[test]
    fn continuous_move_timeout_optional() {
        let mut message = ContinuousMove::new("prof_0", PtzSpeed::new(0.5, 0.0, 0.0));
        assert!(!message.to_body().contains("Timeout"));
        message.timeout = Some("PT5S".into());
        assert!(message.to_body().contains("<tptz:Timeout>PT5S</tptz:Timeout>"));
    }

    #[test]
    fn geo_move_target_uses_attributes() {
        let body = GeoMove::new(
            "prof_0",
            PtzGeoLocation { lon: 11.6, lat: 48.1, elevation: Some(520.0) },
        )
        .to_body();
        assert!(body.contains(r#"<tptz:Target lon="11.6" lat="48.1" elevation="520"/>"#));
    }

    #[test]
    fn move_and_start_tracking_preset_variant() {
        let body = MoveAndStartTracking::to_preset("prof_0", "preset_3").to_body();
        assert!(body.contains("<tptz:PresetToken>preset_3</tptz:PresetToken>"));
        assert!(!body.contains("GeoLocation"));
        assert!(!body.contains("TargetPosition"));
    }
}
