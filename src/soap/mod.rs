//! Generic SOAP client capability: envelope construction, WS-Security
//! username token header, HTTP transport with bounded retries and SOAP fault
//! detection. Everything above this module talks in operation bodies (the
//! fragment inside `<s:Body>`) and never sees HTTP.

use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::RequestBuilder;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;
use xml::reader::{EventReader, XmlEvent};

use crate::error::{Error, Result};
use crate::utils::{parse_soap, xml_escape};

pub const DEVICE_NS: &str = "http://www.onvif.org/ver10/device/wsdl";
pub const MEDIA_NS: &str = "http://www.onvif.org/ver10/media/wsdl";
pub const IMAGING_NS: &str = "http://www.onvif.org/ver20/imaging/wsdl";
pub const PTZ_NS: &str = "http://www.onvif.org/ver20/ptz/wsdl";
pub const EVENTS_NS: &str = "http://www.onvif.org/ver10/events/wsdl";
pub const ANALYTICS_NS: &str = "http://www.onvif.org/ver20/analytics/wsdl";
pub const SCHEMA_NS: &str = "http://www.onvif.org/ver10/schema";
pub const WSNT_NS: &str = "http://docs.oasis-open.org/wsn/b-2";
pub const WSA_NS: &str = "http://www.w3.org/2005/08/addressing";

const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
const PASSWORD_TEXT: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// Per-try timeout for ordinary (non long-poll) calls.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);
const SEND_TRIES: u32 = 3;

/// Device account used for WS-Security. The password travels as PasswordText;
/// digest tokens are the device SOAP stack's business, not ours.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Seam between the SOAP layer and the wire. Tests swap in a canned-response
/// transport; production uses [`HttpTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, endpoint: &Url, envelope: &str, per_try: Duration) -> Result<String>;
}

/// POSTs SOAP envelopes over HTTP, retrying on per-try timeout.
pub struct HttpTransport {
    http: reqwest::Client,
    tries: u32,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            http: reqwest::Client::new(),
            tries: SEND_TRIES,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, endpoint: &Url, envelope: &str, per_try: Duration) -> Result<String> {
        let mut try_times = 0;

        loop {
            try_times += 1;

            let request: RequestBuilder = self
                .http
                .post(endpoint.clone())
                .header("Content-Type", "application/soap+xml; charset=utf-8")
                .body(envelope.to_owned());

            match timeout(per_try, request.send()).await {
                Ok(resp) => {
                    // Faults arrive as 400/500 with a SOAP body; keep the
                    // text either way and let the caller inspect it.
                    let text = resp?.text().await?;
                    return Ok(text);
                }
                Err(_) if try_times < self.tries => {
                    warn!("[Transport] no response from {endpoint}, trying again...");
                }
                Err(_) => {
                    return Err(Error::Timeout {
                        endpoint: endpoint.to_string(),
                        tries: try_times,
                    });
                }
            }
        }
    }
}

/// Wraps operation bodies into SOAP 1.2 envelopes and dispatches them through
/// a [`Transport`]. Cheap to clone; one instance is shared by the session and
/// every facade built from it.
#[derive(Clone)]
pub struct SoapClient {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
}

impl SoapClient {
    pub fn new(credentials: Option<Credentials>) -> Self {
        SoapClient {
            transport: Arc::new(HttpTransport::new()),
            credentials,
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>, credentials: Option<Credentials>) -> Self {
        SoapClient {
            transport,
            credentials,
        }
    }

    /// Sends one operation body and returns the raw response XML.
    pub async fn call(&self, endpoint: &Url, body: &str) -> Result<String> {
        self.call_with_header(endpoint, "", body, DEFAULT_CALL_TIMEOUT)
            .await
    }

    /// Same as [`call`](Self::call) with extra header XML (WS-Addressing for
    /// pull-point operations) and an explicit transport timeout for
    /// long-polls.
    pub async fn call_with_header(
        &self,
        endpoint: &Url,
        extra_header: &str,
        body: &str,
        per_try: Duration,
    ) -> Result<String> {
        let envelope = self.envelope(extra_header, body);
        debug!("[SoapClient] -> {endpoint}: {body}");

        let response = self.transport.request(endpoint, &envelope, per_try).await?;
        debug!("[SoapClient] <- {endpoint}: {response}");

        if let Some((code, reason)) = extract_fault(&response) {
            return Err(Error::Fault { code, reason });
        }

        Ok(response)
    }

    fn envelope(&self, extra_header: &str, body: &str) -> String {
        let mut header = String::new();

        if let Some(creds) = &self.credentials {
            let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            header.push_str(&format!(
                r#"<wsse:Security><wsse:UsernameToken><wsse:Username>{}</wsse:Username><wsse:Password Type="{PASSWORD_TEXT}">{}</wsse:Password><wsu:Created>{created}</wsu:Created></wsse:UsernameToken></wsse:Security>"#,
                xml_escape(&creds.username),
                xml_escape(&creds.password),
            ));
        }
        header.push_str(extra_header);

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope" xmlns:tds="{DEVICE_NS}" xmlns:trt="{MEDIA_NS}" xmlns:timg="{IMAGING_NS}" xmlns:tptz="{PTZ_NS}" xmlns:tev="{EVENTS_NS}" xmlns:tan="{ANALYTICS_NS}" xmlns:tt="{SCHEMA_NS}" xmlns:wsnt="{WSNT_NS}" xmlns:wsa="{WSA_NS}" xmlns:wsse="{WSSE_NS}" xmlns:wsu="{WSU_NS}"><s:Header>{header}</s:Header><s:Body>{body}</s:Body></s:Envelope>"#
        )
    }
}

/// WS-Addressing header for operations addressed to a pull-point
/// subscription manager rather than a fixed service endpoint.
pub fn addressing_header(action: &str, to: &str) -> String {
    let message_id = Uuid::new_v4();
    format!(
        r#"<wsa:MessageID>urn:uuid:{message_id}</wsa:MessageID><wsa:To>{}</wsa:To><wsa:Action>{}</wsa:Action><wsa:ReplyTo><wsa:Address>http://www.w3.org/2005/08/addressing/anonymous</wsa:Address></wsa:ReplyTo>"#,
        xml_escape(to),
        xml_escape(action),
    )
}

/// Returns `(code, reason)` when the response carries a SOAP fault.
fn extract_fault(response: &str) -> Option<(String, String)> {
    let mut has_fault = false;

    let parser = EventReader::new(BufReader::new(response.as_bytes()));
    for e in parser {
        match e {
            Ok(XmlEvent::StartElement { name, .. }) if name.local_name == "Fault" => {
                has_fault = true;
                break;
            }
            Err(_) => break,
            _ => {}
        }
    }

    if !has_fault {
        return None;
    }

    let code = parse_soap(response.as_bytes(), "Value", Some("Code"), true)
        .pop()
        .unwrap_or_else(|| "Unknown".to_owned());
    let reason = parse_soap(response.as_bytes(), "Text", Some("Reason"), true)
        .pop()
        .unwrap_or_default();

    Some((code, reason))
}

/// Parses an XML-schema duration of the shape the eventing API uses
/// (`PT1M`, `PT30S`, `PT1H2M3S`, optionally with a day component). Returns
/// `None` for anything it cannot make sense of.
pub fn parse_iso8601_duration(raw: &str) -> Option<Duration> {
    let rest = raw.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, t),
        None => (rest, ""),
    };

    let mut secs = 0u64;

    let mut num = String::new();
    for c in date_part.chars() {
        if c.is_ascii_digit() {
            num.push(c);
        } else if c == 'D' {
            secs += num.parse::<u64>().ok()? * 86_400;
            num.clear();
        } else {
            // Year/month durations have no fixed length in seconds.
            return None;
        }
    }
    if !num.is_empty() {
        return None;
    }

    for c in time_part.chars() {
        if c.is_ascii_digit() || c == '.' {
            num.push(c);
        } else {
            let value = num.parse::<f64>().ok()?;
            num.clear();
            match c {
                'H' => secs += (value * 3600.0) as u64,
                'M' => secs += (value * 60.0) as u64,
                'S' => secs += value.ceil() as u64,
                _ => return None,
            }
        }
    }
    if !num.is_empty() {
        return None;
    }

    Some(Duration::from_secs(secs))
}
