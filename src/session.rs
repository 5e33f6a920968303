//! Device session: owns the connection parameters and the read-only caches
//! (clock, info, capabilities, profiles, services) that the per-service
//! facades are built from.

use std::io::BufReader;

use chrono::{DateTime, TimeZone, Utc};
use log::{error, info, warn};
use url::Url;
use xml::reader::{EventReader, XmlEvent};

use crate::device::{Capabilities, DeviceInfo, Profile, ServiceEntry, SystemDateTime};
use crate::error::{Error, Result};
use crate::soap::{Credentials, SoapClient};
use crate::utils::parse_soap;

pub struct DeviceSession {
    host: String,
    port: u16,
    client: SoapClient,
    connected: bool,
    device_time: Option<SystemDateTime>,
    device_info: DeviceInfo,
    capabilities: Capabilities,
    profiles: Vec<Profile>,
    services: Vec<ServiceEntry>,
}

impl DeviceSession {
    pub fn new(host: impl Into<String>, port: u16, credentials: Option<Credentials>) -> Self {
        Self::with_client(host, port, SoapClient::new(credentials))
    }

    /// Builds a session over an explicit SOAP client; tests hand in one with
    /// a canned transport.
    pub fn with_client(host: impl Into<String>, port: u16, client: SoapClient) -> Self {
        DeviceSession {
            host: host.into(),
            port,
            client,
            connected: false,
            device_time: None,
            device_info: DeviceInfo::default(),
            capabilities: Capabilities::default(),
            profiles: Vec::new(),
            services: Vec::new(),
        }
    }

    /// The device management endpoint derived from host and port.
    pub fn connection_address(&self) -> String {
        format!("http://{}:{}/onvif/device_service", self.host, self.port)
    }

    pub fn connection_status(&self) -> bool {
        self.connected
    }

    pub fn client(&self) -> &SoapClient {
        &self.client
    }

    pub fn device_time(&self) -> Option<&SystemDateTime> {
        self.device_time.as_ref()
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn first_profile(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    /// Namespace of the eventing service as advertised by GetServices, used
    /// to bind pull-point requests. Falls back to `None` when the device did
    /// not list one.
    pub fn event_namespace(&self) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.namespace.contains("event"))
            .map(|s| s.namespace.as_str())
    }

    fn device_endpoint(&self) -> Result<Url> {
        Ok(self.connection_address().parse()?)
    }

    /// Runs the full connect sequence: clock, device information,
    /// capabilities, media profiles, service listing. The clock call doubles
    /// as the reachability probe; its failure aborts the connect and leaves
    /// the session disconnected.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Try to connect onvif device: {}", self.host);

        self.connected = false;
        match self.fetch_device_time().await {
            Ok(time) => {
                self.device_time = time;
                self.connected = true;
                info!("Device connection successful: {}", self.host);
            }
            Err(e) => {
                error!("No onvif connection to {}: {e}", self.host);
                return Err(e);
            }
        }

        self.device_info = self.fetch_device_info().await?;
        self.capabilities = self.fetch_capabilities().await?;

        match &self.capabilities.url_media {
            Some(media) => {
                let media = media.clone();
                self.profiles = self.fetch_profiles(&media).await?;
            }
            None => warn!("Device advertises no media service, skipping profiles"),
        }

        self.services = self.fetch_services().await?;
        info!(
            "Connected to {}: {} profiles, {} services",
            self.host,
            self.profiles.len(),
            self.services.len()
        );

        Ok(())
    }

    async fn fetch_device_time(&self) -> Result<Option<SystemDateTime>> {
        let endpoint = self.device_endpoint()?;
        let response = self
            .client
            .call(&endpoint, "<tds:GetSystemDateAndTime/>")
            .await?;
        match parse_utc_date_time(response.as_bytes()) {
            Some(utc) => Ok(Some(SystemDateTime { utc })),
            None => {
                // Reachability is proven; a clock we cannot read is not fatal.
                warn!("Could not read UTCDateTime from GetSystemDateAndTime response");
                Ok(None)
            }
        }
    }

    #[rustfmt::skip]
    async fn fetch_device_info(&self) -> Result<DeviceInfo> {
        let endpoint  = self.device_endpoint()?;
        let response  = self.client.call(&endpoint, "<tds:GetDeviceInformation/>").await?;
        let response  = response.as_bytes();

        let mut info = DeviceInfo::default();
        info.manufacturer     = parse_soap(response, "Manufacturer",    None, true).pop();
        info.model            = parse_soap(response, "Model",           None, true).pop();
        info.firmware_version = parse_soap(response, "FirmwareVersion", None, true).pop();
        info.serial_number    = parse_soap(response, "SerialNumber",    None, true).pop();
        info.hardware_id      = parse_soap(response, "HardwareId",      None, true).pop();

        info!("Manufacturer: {:?}, Model: {:?}", info.manufacturer, info.model);

        Ok(info)
    }

    #[rustfmt::skip]
    async fn fetch_capabilities(&self) -> Result<Capabilities> {
        let endpoint = self.device_endpoint()?;
        let body     = "<tds:GetCapabilities><tds:Category>All</tds:Category></tds:GetCapabilities>";
        let response = self.client.call(&endpoint, body).await?;
        let response = response.as_bytes();

        let xaddr = |parent: &str| -> Option<Url> {
            let raw = parse_soap(response, "XAddr", Some(parent), true).pop()?;
            match raw.parse() {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("Bad {parent} XAddr {raw:?}: {e}");
                    None
                }
            }
        };

        let mut caps = Capabilities::default();
        caps.url_media     = xaddr("Media");
        caps.url_events    = xaddr("Events");
        caps.url_analytics = xaddr("Analytics");
        caps.url_ptz       = xaddr("PTZ");
        caps.url_imaging   = xaddr("Imaging");

        Ok(caps)
    }

    async fn fetch_profiles(&self, media_xaddr: &Url) -> Result<Vec<Profile>> {
        let response = self.client.call(media_xaddr, "<trt:GetProfiles/>").await?;
        Ok(parse_profiles(response.as_bytes()))
    }

    async fn fetch_services(&self) -> Result<Vec<ServiceEntry>> {
        let endpoint = self.device_endpoint()?;
        let body = "<tds:GetServices><tds:IncludeCapability>false</tds:IncludeCapability></tds:GetServices>";
        let response = self.client.call(&endpoint, body).await?;
        Ok(parse_services(response.as_bytes()))
    }
}

/// Assembles the `UTCDateTime` fields of a GetSystemDateAndTime response
/// into one timestamp.
pub(crate) fn parse_utc_date_time(response: &[u8]) -> Option<DateTime<Utc>> {
    let field = |name: &str| -> Option<u32> {
        parse_soap(response, name, Some("UTCDateTime"), true)
            .pop()?
            .parse()
            .ok()
    };

    let year = field("Year")? as i32;
    Utc.with_ymd_and_hms(
        year,
        field("Month")?,
        field("Day")?,
        field("Hour")?,
        field("Minute")?,
        field("Second")?,
    )
    .single()
}

/// Extracts `(token, Name)` pairs from a GetProfiles response. The token is
/// an attribute of each `Profiles` element; only the profile's own `Name`
/// child counts, not the nested configuration names.
fn parse_profiles(response: &[u8]) -> Vec<Profile> {
    let parser = EventReader::new(BufReader::new(response));

    let mut profiles: Vec<Profile> = Vec::new();
    let mut depth = 0usize;
    let mut profile_depth: Option<usize> = None;
    let mut capture_name = false;

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                depth += 1;

                if name.local_name == "Profiles" && profile_depth.is_none() {
                    profile_depth = Some(depth);
                    let token = attributes
                        .iter()
                        .find(|a| a.name.local_name == "token")
                        .map(|a| a.value.clone())
                        .unwrap_or_default();
                    profiles.push(Profile { token, name: None });
                } else if let Some(pd) = profile_depth {
                    if name.local_name == "Name" && depth == pd + 1 {
                        capture_name = matches!(profiles.last(), Some(p) if p.name.is_none());
                    }
                }
            }
            Ok(XmlEvent::EndElement { name }) => {
                if profile_depth == Some(depth) {
                    profile_depth = None;
                }
                if name.local_name == "Name" {
                    capture_name = false;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(XmlEvent::Characters(chars)) => {
                if capture_name {
                    if let Some(p) = profiles.last_mut() {
                        p.name = Some(chars);
                    }
                    capture_name = false;
                }
            }
            Err(e) => {
                warn!("[parse_profiles] XML error: {e}");
                break;
            }
            _ => {}
        }
    }

    profiles
}

/// Extracts `(Namespace, XAddr)` pairs from a GetServices response.
fn parse_services(response: &[u8]) -> Vec<ServiceEntry> {
    #[derive(PartialEq)]
    enum Field {
        None,
        Namespace,
        XAddr,
    }

    let parser = EventReader::new(BufReader::new(response));

    let mut services: Vec<ServiceEntry> = Vec::new();
    let mut field = Field::None;

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement { name, .. }) => match name.local_name.as_str() {
                "Service" => services.push(ServiceEntry {
                    namespace: String::new(),
                    xaddr: String::new(),
                }),
                "Namespace" if !services.is_empty() => field = Field::Namespace,
                "XAddr" if !services.is_empty() => field = Field::XAddr,
                _ => {}
            },
            Ok(XmlEvent::EndElement { .. }) => field = Field::None,
            Ok(XmlEvent::Characters(chars)) => {
                if let Some(entry) = services.last_mut() {
                    match field {
                        Field::Namespace => entry.namespace = chars,
                        Field::XAddr => entry.xaddr = chars,
                        Field::None => {}
                    }
                }
            }
            Err(e) => {
                warn!("[parse_services] XML error: {e}");
                break;
            }
            _ => {}
        }
    }

    services
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_keep_token_and_own_name_only() {
        let xml = r#"<Envelope><Body><GetProfilesResponse>
            <Profiles token="prof_0" fixed="true">
                <Name>mainStream</Name>
                <VideoEncoderConfiguration token="vec_0"><Name>encoderName</Name></VideoEncoderConfiguration>
            </Profiles>
            <Profiles token="prof_1"><Name>subStream</Name></Profiles>
        </GetProfilesResponse></Body></Envelope>"#;

        let profiles = parse_profiles(xml.as_bytes());
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].token, "prof_0");
        assert_eq!(profiles[0].name.as_deref(), Some("mainStream"));
        assert_eq!(profiles[1].token, "prof_1");
        assert_eq!(profiles[1].name.as_deref(), Some("subStream"));
    }

    #[test]
    fn services_pair_namespace_with_xaddr() {
        let xml = r#"<Envelope><Body><GetServicesResponse>
            <Service>
                <Namespace>http://www.onvif.org/ver10/device/wsdl</Namespace>
                <XAddr>http://cam/onvif/device_service</XAddr>
            </Service>
            <Service>
                <Namespace>http://www.onvif.org/ver10/events/wsdl</Namespace>
                <XAddr>http://cam/onvif/event_service</XAddr>
            </Service>
        </GetServicesResponse></Body></Envelope>"#;

        let services = parse_services(xml.as_bytes());
        assert_eq!(services.len(), 2);
        assert_eq!(services[1].namespace, "http://www.onvif.org/ver10/events/wsdl");
        assert_eq!(services[1].xaddr, "http://cam/onvif/event_service");
    }

    #[test]
    fn event_namespace_lookup() {
        let mut session = DeviceSession::new("192.168.1.168", 80, None);
        session.services = vec![
            ServiceEntry {
                namespace: "http://www.onvif.org/ver10/device/wsdl".into(),
                xaddr: "http://cam/onvif/device_service".into(),
            },
            ServiceEntry {
                namespace: "http://www.onvif.org/ver10/events/wsdl".into(),
                xaddr: "http://cam/onvif/event_service".into(),
            },
        ];

        assert_eq!(
            session.event_namespace(),
            Some("http://www.onvif.org/ver10/events/wsdl")
        );
    }

    #[test]
    fn utc_date_time_assembled_from_fields() {
        let xml = r#"<Envelope><Body><GetSystemDateAndTimeResponse><SystemDateAndTime>
            <UTCDateTime>
                <Time><Hour>23</Hour><Minute>59</Minute><Second>7</Second></Time>
                <Date><Year>2024</Year><Month>12</Month><Day>31</Day></Date>
            </UTCDateTime>
        </SystemDateAndTime></GetSystemDateAndTimeResponse></Body></Envelope>"#;

        let utc = parse_utc_date_time(xml.as_bytes()).expect("should parse");
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 7).unwrap());

        assert!(parse_utc_date_time(b"<Envelope><Body/></Envelope>").is_none());
    }

    #[test]
    fn connection_address_from_parts() {
        let session = DeviceSession::new("192.168.1.168", 8080, None);
        assert_eq!(
            session.connection_address(),
            "http://192.168.1.168:8080/onvif/device_service"
        );
        assert!(!session.connection_status());
    }
}
