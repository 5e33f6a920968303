//! Media parameter types: OSD configuration and stream setup.

use super::{attr, elem, wrap, ToXml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsdType {
    Text,
    Image,
    Extended,
}

impl OsdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsdType::Text => "Text",
            OsdType::Image => "Image",
            OsdType::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsdPositionType {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    Custom,
}

impl OsdPositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsdPositionType::UpperLeft => "UpperLeft",
            OsdPositionType::UpperRight => "UpperRight",
            OsdPositionType::LowerLeft => "LowerLeft",
            OsdPositionType::LowerRight => "LowerRight",
            OsdPositionType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsdTextStringType {
    Plain,
    Date,
    Time,
    DateAndTime,
}

impl OsdTextStringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsdTextStringType::Plain => "Plain",
            OsdTextStringType::Date => "Date",
            OsdTextStringType::Time => "Time",
            OsdTextStringType::DateAndTime => "DateAndTime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    RtpUnicast,
    RtpMulticast,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::RtpUnicast => "RTP-Unicast",
            StreamType::RtpMulticast => "RTP-Multicast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Udp,
    Tcp,
    Rtsp,
    Http,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportProtocol::Udp => "UDP",
            TransportProtocol::Tcp => "TCP",
            TransportProtocol::Rtsp => "RTSP",
            TransportProtocol::Http => "HTTP",
        }
    }
}

/// Normalized screen coordinate for a custom OSD position.
#[derive(Debug, Clone, Copy)]
pub struct OsdVector {
    pub x: f32,
    pub y: f32,
}

impl ToXml for OsdVector {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<tt:Pos");
        attr(out, "x", &self.x.to_string());
        attr(out, "y", &self.y.to_string());
        out.push_str("/>");
    }
}

/// Color string uses the schema's space-separated `X Y Z` form.
#[derive(Debug, Clone)]
pub struct OsdColor {
    pub color: String,
    pub transparent: Option<i32>,
}

impl ToXml for OsdColor {
    fn write_xml(&self, out: &mut String) {
        if let Some(transparent) = self.transparent {
            elem(out, "tt:Transparent", &transparent.to_string());
        }
        elem(out, "tt:Color", &self.color);
    }
}

#[derive(Debug, Clone)]
pub struct OsdPosConfiguration {
    pub position: OsdPositionType,
    pub pos: Option<OsdVector>,
}

impl ToXml for OsdPosConfiguration {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Type", self.position.as_str());
        if let Some(pos) = &self.pos {
            pos.write_xml(out);
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsdTextConfiguration {
    pub text_type: OsdTextStringType,
    pub is_persistent_text: Option<bool>,
    pub date_format: Option<String>,
    pub time_format: Option<String>,
    pub font_size: Option<i32>,
    pub font_color: Option<OsdColor>,
    pub background_color: Option<OsdColor>,
    pub plain_text: Option<String>,
}

impl OsdTextConfiguration {
    pub fn plain(text: &str) -> Self {
        OsdTextConfiguration {
            text_type: OsdTextStringType::Plain,
            is_persistent_text: None,
            date_format: None,
            time_format: None,
            font_size: None,
            font_color: None,
            background_color: None,
            plain_text: Some(text.to_string()),
        }
    }
}

impl ToXml for OsdTextConfiguration {
    fn write_xml(&self, out: &mut String) {
        if let Some(persistent) = self.is_persistent_text {
            elem(out, "tt:IsPersistentText", &persistent.to_string());
        }
        elem(out, "tt:Type", self.text_type.as_str());
        if let Some(format) = &self.date_format {
            elem(out, "tt:DateFormat", format);
        }
        if let Some(format) = &self.time_format {
            elem(out, "tt:TimeFormat", format);
        }
        if let Some(size) = self.font_size {
            elem(out, "tt:FontSize", &size.to_string());
        }
        if let Some(color) = &self.font_color {
            wrap(out, "tt:FontColor", color);
        }
        if let Some(color) = &self.background_color {
            wrap(out, "tt:BackgroundColor", color);
        }
        if let Some(text) = &self.plain_text {
            elem(out, "tt:PlainText", text);
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsdImgConfiguration {
    pub img_path: String,
}

impl ToXml for OsdImgConfiguration {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:ImgPath", &self.img_path);
    }
}

/// Full OSD description. The `token` attribute and the `<trt:OSD>` wrapper
/// come from the message builder since create and modify name them
/// differently.
#[derive(Debug, Clone)]
pub struct OsdConfiguration {
    pub token: String,
    pub video_source_configuration_token: String,
    pub osd_type: OsdType,
    pub position: OsdPosConfiguration,
    pub text_string: Option<OsdTextConfiguration>,
    pub image: Option<OsdImgConfiguration>,
}

impl ToXml for OsdConfiguration {
    fn write_xml(&self, out: &mut String) {
        elem(
            out,
            "tt:VideoSourceConfigurationToken",
            &self.video_source_configuration_token,
        );
        elem(out, "tt:Type", self.osd_type.as_str());
        wrap(out, "tt:Position", &self.position);
        if let Some(text) = &self.text_string {
            wrap(out, "tt:TextString", text);
        }
        if let Some(image) = &self.image {
            wrap(out, "tt:Image", image);
        }
    }
}

/// Streaming transport. A tunnelled setup (RTSP over HTTP) nests another
/// transport inside `tunnel`.
#[derive(Debug, Clone)]
pub struct Transport {
    pub protocol: TransportProtocol,
    pub tunnel: Option<Box<Transport>>,
}

impl Transport {
    pub fn new(protocol: TransportProtocol) -> Self {
        Transport { protocol, tunnel: None }
    }
}

impl ToXml for Transport {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Protocol", self.protocol.as_str());
        if let Some(tunnel) = &self.tunnel {
            wrap(out, "tt:Tunnel", tunnel.as_ref());
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreamSetup {
    pub stream: StreamType,
    pub transport: Transport,
}

impl StreamSetup {
    pub fn rtsp_unicast() -> Self {
        StreamSetup {
            stream: StreamType::RtpUnicast,
            transport: Transport::new(TransportProtocol::Rtsp),
        }
    }
}

impl ToXml for StreamSetup {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Stream", self.stream.as_str());
        wrap(out, "tt:Transport", &self.transport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_tunnel_nests_recursively() {
        let setup = Transport {
            protocol: TransportProtocol::Rtsp,
            tunnel: Some(Box::new(Transport::new(TransportProtocol::Http))),
        };
        assert_eq!(
            setup.to_xml(),
            "<tt:Protocol>RTSP</tt:Protocol>\
             <tt:Tunnel><tt:Protocol>HTTP</tt:Protocol></tt:Tunnel>"
        );
    }

    #[test]
    fn stream_setup_defaults_to_rtsp_unicast() {
        let xml = StreamSetup::rtsp_unicast().to_xml();
        assert!(xml.contains("<tt:Stream>RTP-Unicast</tt:Stream>"));
        assert!(xml.contains("<tt:Protocol>RTSP</tt:Protocol>"));
    }

    #[test]
    fn osd_text_keeps_schema_field_order() {
        let text = OsdTextConfiguration::plain("Cam 1 & 2");
        let xml = text.to_xml();
        assert!(xml.contains("<tt:Type>Plain</tt:Type>"));
        assert!(xml.contains("<tt:PlainText>Cam 1 &amp; 2</tt:PlainText>"));
    }

    #[test]
    fn osd_position_writes_vector_attributes() {
        let pos = OsdPosConfiguration {
            position: OsdPositionType::Custom,
            pos: Some(OsdVector { x: -0.5, y: 0.25 }),
        };
        let xml = pos.to_xml();
        assert!(xml.contains("<tt:Type>Custom</tt:Type>"));
        assert!(xml.contains(r#"<tt:Pos x="-0.5" y="0.25"/>"#));
    }
}
