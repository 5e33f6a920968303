//! Media request bodies.

use crate::params::media::{OsdConfiguration, StreamSetup};
use crate::params::ToXml;
use crate::utils::xml_escape;

#[derive(Debug, Clone)]
pub struct GetStreamUri {
    pub stream_setup: StreamSetup,
    pub profile_token: String,
}

impl GetStreamUri {
    pub fn new(stream_setup: StreamSetup, profile_token: &str) -> Self {
        GetStreamUri {
            stream_setup,
            profile_token: profile_token.to_string(),
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<trt:GetStreamUri><trt:StreamSetup>");
        self.stream_setup.write_xml(&mut body);
        body.push_str("</trt:StreamSetup>");
        body.push_str(&format!(
            "<trt:ProfileToken>{}</trt:ProfileToken>",
            xml_escape(&self.profile_token)
        ));
        body.push_str("</trt:GetStreamUri>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct CreateOsd {
    pub osd: OsdConfiguration,
}

impl CreateOsd {
    pub fn new(osd: OsdConfiguration) -> Self {
        CreateOsd { osd }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<trt:CreateOSD>");
        body.push_str(&format!("<trt:OSD token=\"{}\">", xml_escape(&self.osd.token)));
        self.osd.write_xml(&mut body);
        body.push_str("</trt:OSD></trt:CreateOSD>");
        body
    }
}
