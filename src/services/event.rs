//! Event facade: pull-point subscription lifecycle and notification
//! decoding. This is the service the crate exists for; the pull loop is
//! create -> pull -> (renew) -> unsubscribe, with Seek and
//! SetSynchronizationPoint addressed to the same subscription manager.

use std::collections::HashMap;
use std::io::BufReader;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, error, warn};
use url::Url;
use xml::reader::{EventReader, XmlEvent};

use crate::error::{Error, Result};
use crate::messages::event::{AddEventBroker, CreatePullPointSubscription};
use crate::params::event::{NotificationMessage, PullMessagesResponse, SimpleItem};
use crate::session::DeviceSession;
use crate::soap::{
    addressing_header, parse_iso8601_duration, SoapClient, DEFAULT_CALL_TIMEOUT, EVENTS_NS,
    SCHEMA_NS, WSNT_NS,
};
use crate::utils::{parse_soap, xml_escape};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const PULL_MESSAGES_ACTION: &str =
    "http://www.onvif.org/ver10/events/wsdl/PullPointSubscription/PullMessagesRequest";
const SET_SYNCHRONIZATION_POINT_ACTION: &str =
    "http://www.onvif.org/ver10/events/wsdl/PullPointSubscription/SetSynchronizationPointRequest";
const SEEK_ACTION: &str = "http://www.onvif.org/ver10/events/wsdl/SubscriptionManager/SeekRequest";
const RENEW_ACTION: &str =
    "http://docs.oasis-open.org/wsn/bw-2/SubscriptionManager/RenewRequest";
const UNSUBSCRIBE_ACTION: &str =
    "http://docs.oasis-open.org/wsn/bw-2/SubscriptionManager/UnsubscribeRequest";

/// Slack added to the transport timeout on top of the device-side pull
/// timeout, so a device answering right at the deadline still gets through.
const PULL_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);
/// Transport timeout when the caller's pull timeout cannot be parsed.
const PULL_TIMEOUT_FALLBACK: Duration = Duration::from_secs(60);

/// Live pull-point subscription. `address` is the subscription manager
/// endpoint every follow-up operation is sent to.
#[derive(Debug, Clone)]
pub struct PullPointSubscription {
    pub address: String,
    pub current_time: Option<DateTime<Utc>>,
    pub termination_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct RenewResponse {
    pub current_time: Option<DateTime<Utc>>,
    pub termination_time: Option<DateTime<Utc>>,
}

pub struct EventService {
    client: SoapClient,
    endpoint: Option<Url>,
}

impl EventService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.capabilities().url_events.clone()
        } else {
            None
        };
        if endpoint.is_none() {
            error!(
                "Event service not available on {}",
                session.connection_address()
            );
        }

        EventService {
            client: session.client().clone(),
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::Unsupported("event"))
    }

    /// Subscription-manager operations must not hit the wire without an
    /// address to send them to.
    fn subscription_endpoint(&self, address: &str) -> Result<Url> {
        self.endpoint()?;
        if address.trim().is_empty() {
            return Err(Error::NotSubscribed);
        }
        Ok(address.parse()?)
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.client
            .call(self.endpoint()?, "<tev:GetServiceCapabilities/>")
            .await
    }

    /// Topic tree and supported dialects, raw. The shape is too device
    /// specific to type.
    pub async fn get_event_properties(&self) -> Result<String> {
        self.client
            .call(self.endpoint()?, "<tev:GetEventProperties/>")
            .await
    }

    pub async fn create_pull_point_subscription(
        &self,
        message: CreatePullPointSubscription,
    ) -> Result<PullPointSubscription> {
        let response = self
            .client
            .call(self.endpoint()?, &message.to_body())
            .await?;
        let bytes = response.as_bytes();

        let address = parse_soap(bytes, "Address", Some("SubscriptionReference"), true)
            .pop()
            .ok_or_else(|| {
                Error::Parse("CreatePullPointSubscriptionResponse carries no subscription Address".into())
            })?;

        let subscription = PullPointSubscription {
            address,
            current_time: first_time(bytes, "CurrentTime"),
            termination_time: first_time(bytes, "TerminationTime"),
        };
        debug!("Created pull point {}", subscription.address);
        Ok(subscription)
    }

    /// Long-polls the subscription for up to `timeout` (ISO-8601 duration,
    /// e.g. `PT1M`), returning at most `message_limit` notifications. The
    /// limit is enforced by the device; nothing is truncated locally.
    pub async fn pull_messages(
        &self,
        address: &str,
        timeout: &str,
        message_limit: u32,
    ) -> Result<PullMessagesResponse> {
        let endpoint = self.subscription_endpoint(address)?;

        let per_try = match parse_iso8601_duration(timeout) {
            Some(d) => d + PULL_TIMEOUT_MARGIN,
            None => {
                warn!("Unparsable pull timeout {timeout:?}, waiting {PULL_TIMEOUT_FALLBACK:?} on the transport");
                PULL_TIMEOUT_FALLBACK
            }
        };

        let header = addressing_header(PULL_MESSAGES_ACTION, address);
        let body = format!(
            "<tev:PullMessages><tev:Timeout>{}</tev:Timeout><tev:MessageLimit>{message_limit}</tev:MessageLimit></tev:PullMessages>",
            xml_escape(timeout)
        );

        let response = self
            .client
            .call_with_header(&endpoint, &header, &body, per_try)
            .await?;
        Ok(parse_pull_response(&response))
    }

    /// Extends the subscription lifetime. `termination_time` is an ISO-8601
    /// duration or an absolute time.
    pub async fn renew(&self, address: &str, termination_time: &str) -> Result<RenewResponse> {
        let endpoint = self.subscription_endpoint(address)?;

        let header = addressing_header(RENEW_ACTION, address);
        let body = format!(
            "<wsnt:Renew><wsnt:TerminationTime>{}</wsnt:TerminationTime></wsnt:Renew>",
            xml_escape(termination_time)
        );

        let response = self
            .client
            .call_with_header(&endpoint, &header, &body, DEFAULT_CALL_TIMEOUT)
            .await?;
        let bytes = response.as_bytes();

        Ok(RenewResponse {
            current_time: first_time(bytes, "CurrentTime"),
            termination_time: first_time(bytes, "TerminationTime"),
        })
    }

    pub async fn unsubscribe(&self, address: &str) -> Result<()> {
        let endpoint = self.subscription_endpoint(address)?;

        let header = addressing_header(UNSUBSCRIBE_ACTION, address);
        self.client
            .call_with_header(&endpoint, &header, "<wsnt:Unsubscribe/>", DEFAULT_CALL_TIMEOUT)
            .await?;
        debug!("Unsubscribed from {address}");
        Ok(())
    }

    /// Repositions the subscription's notification cursor; only meaningful
    /// on devices with a persistent notification store.
    pub async fn seek(
        &self,
        address: &str,
        utc_time: DateTime<Utc>,
        reverse: Option<bool>,
    ) -> Result<()> {
        let endpoint = self.subscription_endpoint(address)?;

        let header = addressing_header(SEEK_ACTION, address);
        let mut body = format!(
            "<tev:Seek><tev:UtcTime>{}</tev:UtcTime>",
            utc_time.format(TIME_FORMAT)
        );
        if let Some(reverse) = reverse {
            body.push_str(&format!("<tev:Reverse>{reverse}</tev:Reverse>"));
        }
        body.push_str("</tev:Seek>");

        self.client
            .call_with_header(&endpoint, &header, &body, DEFAULT_CALL_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Asks the device to resend the current state of all properties covered
    /// by the subscription on the next pull.
    pub async fn set_synchronization_point(&self, address: &str) -> Result<()> {
        let endpoint = self.subscription_endpoint(address)?;

        let header = addressing_header(SET_SYNCHRONIZATION_POINT_ACTION, address);
        self.client
            .call_with_header(
                &endpoint,
                &header,
                "<tev:SetSynchronizationPoint/>",
                DEFAULT_CALL_TIMEOUT,
            )
            .await?;
        Ok(())
    }

    pub async fn add_event_broker(&self, message: AddEventBroker) -> Result<()> {
        self.client
            .call(self.endpoint()?, &message.to_body())
            .await?;
        Ok(())
    }

    /// `broker_address` is the broker URL given to AddEventBroker, not a
    /// subscription address.
    pub async fn delete_event_broker(&self, broker_address: &str) -> Result<()> {
        let body = format!(
            "<tev:DeleteEventBroker><tev:Address>{}</tev:Address></tev:DeleteEventBroker>",
            xml_escape(broker_address)
        );
        self.client.call(self.endpoint()?, &body).await?;
        Ok(())
    }

    pub async fn get_event_brokers(&self) -> Result<String> {
        self.client
            .call(self.endpoint()?, "<tev:GetEventBrokers/>")
            .await
    }
}

fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// First occurrence of `element` anywhere in the response, decoded as a
/// timestamp. Create and Renew responses carry their times in different
/// namespaces, so matching on the local name is the robust choice there.
fn first_time(response: &[u8], element: &str) -> Option<DateTime<Utc>> {
    let raw = parse_soap(response, element, None, true).pop()?;
    let parsed = parse_event_time(&raw);
    if parsed.is_none() {
        warn!("Unparsable {element} {raw:?}");
    }
    parsed
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Outside,
    Source,
    Data,
}

#[derive(Default)]
struct PendingMessage {
    topic: Option<String>,
    message: Option<HashMap<String, String>>,
    source: Option<SimpleItem>,
    data: Option<SimpleItem>,
}

impl PendingMessage {
    fn finish(self) -> Option<NotificationMessage> {
        Some(NotificationMessage {
            topic: self.topic?,
            message: self.message?,
            source: self.source?,
            data: self.data?,
        })
    }
}

/// Decodes a PullMessagesResponse. Never fails: timestamps the device
/// omitted or garbled come back as [`sentinel_time`], and one malformed
/// notification drops the whole message list (the timestamps survive) so
/// callers never see a half-decoded batch. Document order is preserved.
pub(crate) fn parse_pull_response(response: &str) -> PullMessagesResponse {
    let mut result = PullMessagesResponse::default();

    let mut messages: Vec<NotificationMessage> = Vec::new();
    let mut pending: Option<PendingMessage> = None;
    let mut section = Section::Outside;
    let mut in_topic = false;
    let mut text_buf = String::new();
    let mut time_target: Option<bool> = None; // true = CurrentTime

    let parser = EventReader::new(BufReader::new(response.as_bytes()));

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                let ns = name.namespace.as_deref().unwrap_or("");
                match (ns, name.local_name.as_str()) {
                    (EVENTS_NS, "CurrentTime") if pending.is_none() => {
                        time_target = Some(true);
                        text_buf.clear();
                    }
                    (EVENTS_NS, "TerminationTime") if pending.is_none() => {
                        time_target = Some(false);
                        text_buf.clear();
                    }
                    (WSNT_NS, "NotificationMessage") => {
                        pending = Some(PendingMessage::default());
                        section = Section::Outside;
                        in_topic = false;
                    }
                    (WSNT_NS, "Topic") if pending.is_some() => {
                        in_topic = true;
                        text_buf.clear();
                    }
                    (SCHEMA_NS, "Message") => {
                        if let Some(p) = pending.as_mut() {
                            let attrs = attributes
                                .iter()
                                .map(|a| (a.name.local_name.clone(), a.value.clone()))
                                .collect();
                            p.message = Some(attrs);
                        }
                    }
                    (SCHEMA_NS, "Source") if pending.is_some() => section = Section::Source,
                    (SCHEMA_NS, "Data") if pending.is_some() => section = Section::Data,
                    (SCHEMA_NS, "SimpleItem") => {
                        if let Some(p) = pending.as_mut() {
                            let field = |attr: &str| {
                                attributes
                                    .iter()
                                    .find(|a| a.name.local_name == attr)
                                    .map(|a| a.value.clone())
                            };
                            let item = match (field("Name"), field("Value")) {
                                (Some(name), Some(value)) => {
                                    Some(SimpleItem { name, value })
                                }
                                _ => None,
                            };
                            // First item per section wins.
                            match section {
                                Section::Source if p.source.is_none() => p.source = item,
                                Section::Data if p.data.is_none() => p.data = item,
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(XmlEvent::Characters(chars)) => {
                if time_target.is_some() || in_topic {
                    text_buf.push_str(&chars);
                }
            }
            Ok(XmlEvent::EndElement { name }) => {
                let ns = name.namespace.as_deref().unwrap_or("");
                match (ns, name.local_name.as_str()) {
                    (EVENTS_NS, "CurrentTime") | (EVENTS_NS, "TerminationTime")
                        if pending.is_none() =>
                    {
                        if let Some(is_current) = time_target.take() {
                            match parse_event_time(&text_buf) {
                                Some(time) if is_current => result.current_time = time,
                                Some(time) => result.termination_time = time,
                                None => {
                                    warn!(
                                        "Unparsable {} {:?}, keeping sentinel",
                                        name.local_name,
                                        text_buf.trim()
                                    );
                                }
                            }
                        }
                        text_buf.clear();
                    }
                    (WSNT_NS, "Topic") => {
                        if in_topic {
                            if let Some(p) = pending.as_mut() {
                                p.topic = Some(text_buf.trim().to_string());
                            }
                            in_topic = false;
                            text_buf.clear();
                        }
                    }
                    (SCHEMA_NS, "Source") | (SCHEMA_NS, "Data") => section = Section::Outside,
                    (WSNT_NS, "NotificationMessage") => {
                        match pending.take().and_then(PendingMessage::finish) {
                            Some(message) => messages.push(message),
                            None => {
                                warn!("Malformed NotificationMessage, dropping this batch");
                                return result;
                            }
                        }
                    }
                    _ => {}
                }
            }
            Err(e) => {
                warn!("[parse_pull_response] XML error: {e}");
                return result;
            }
            _ => {}
        }
    }

    result.notification_messages = messages;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::event::sentinel_time;

    const PULL_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
                    xmlns:tev="http://www.onvif.org/ver10/events/wsdl"
                    xmlns:wsnt="http://docs.oasis-open.org/wsn/b-2"
                    xmlns:tt="http://www.onvif.org/ver10/schema"
                    xmlns:tns1="http://www.onvif.org/ver10/topics">
        <s:Body><tev:PullMessagesResponse>
            <tev:CurrentTime>2024-06-01T12:00:00Z</tev:CurrentTime>
            <tev:TerminationTime>2024-06-01T12:01:00Z</tev:TerminationTime>
            <wsnt:NotificationMessage>
                <wsnt:Topic Dialect="http://www.onvif.org/ver10/tev/topicExpression/ConcreteSet">tns1:VideoSource/MotionAlarm</wsnt:Topic>
                <wsnt:Message>
                    <tt:Message UtcTime="2024-06-01T11:59:58Z" PropertyOperation="Changed">
                        <tt:Source>
                            <tt:SimpleItem Name="Source" Value="vs_0"/>
                        </tt:Source>
                        <tt:Data>
                            <tt:SimpleItem Name="State" Value="true"/>
                        </tt:Data>
                    </tt:Message>
                </wsnt:Message>
            </wsnt:NotificationMessage>
            <wsnt:NotificationMessage>
                <wsnt:Topic Dialect="http://www.onvif.org/ver10/tev/topicExpression/ConcreteSet">tns1:VideoSource/MotionAlarm</wsnt:Topic>
                <wsnt:Message>
                    <tt:Message UtcTime="2024-06-01T11:59:59Z" PropertyOperation="Changed">
                        <tt:Source>
                            <tt:SimpleItem Name="Source" Value="vs_0"/>
                        </tt:Source>
                        <tt:Data>
                            <tt:SimpleItem Name="State" Value="false"/>
                        </tt:Data>
                    </tt:Message>
                </wsnt:Message>
            </wsnt:NotificationMessage>
        </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

    #[test]
    fn decodes_times_and_messages_in_order() {
        let response = parse_pull_response(PULL_RESPONSE);

        assert_eq!(response.current_time, parse_event_time("2024-06-01T12:00:00Z").unwrap());
        assert_eq!(
            response.termination_time,
            parse_event_time("2024-06-01T12:01:00Z").unwrap()
        );

        let messages = &response.notification_messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].topic, "tns1:VideoSource/MotionAlarm");
        assert_eq!(messages[0].data, SimpleItem::new("State", "true"));
        assert_eq!(messages[1].data, SimpleItem::new("State", "false"));
        assert_eq!(messages[0].source, SimpleItem::new("Source", "vs_0"));
        assert_eq!(
            messages[0].message.get("PropertyOperation").map(String::as_str),
            Some("Changed")
        );
        assert_eq!(
            messages[0].message.get("UtcTime").map(String::as_str),
            Some("2024-06-01T11:59:58Z")
        );
    }

    #[test]
    fn empty_response_keeps_sentinels_and_empty_list() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl">
            <s:Body><tev:PullMessagesResponse/></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        assert_eq!(response.current_time, sentinel_time());
        assert_eq!(response.termination_time, sentinel_time());
        assert!(response.notification_messages.is_empty());
    }

    #[test]
    fn absent_termination_time_keeps_its_sentinel_only() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl">
            <s:Body><tev:PullMessagesResponse>
                <tev:CurrentTime>2024-06-01T12:00:00Z</tev:CurrentTime>
            </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        assert_eq!(
            response.current_time,
            parse_event_time("2024-06-01T12:00:00Z").unwrap()
        );
        assert_eq!(response.termination_time, sentinel_time());
        assert!(response.notification_messages.is_empty());
    }

    #[test]
    fn garbled_timestamp_falls_back_to_sentinel() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl">
            <s:Body><tev:PullMessagesResponse>
                <tev:CurrentTime>not-a-time</tev:CurrentTime>
                <tev:TerminationTime>2024-06-01T12:01:00Z</tev:TerminationTime>
            </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        assert_eq!(response.current_time, sentinel_time());
        assert_eq!(
            response.termination_time,
            parse_event_time("2024-06-01T12:01:00Z").unwrap()
        );
    }

    #[test]
    fn malformed_notification_drops_the_batch_but_keeps_times() {
        // Second message has no Data section.
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl"
            xmlns:wsnt="http://docs.oasis-open.org/wsn/b-2"
            xmlns:tt="http://www.onvif.org/ver10/schema">
            <s:Body><tev:PullMessagesResponse>
                <tev:CurrentTime>2024-06-01T12:00:00Z</tev:CurrentTime>
                <tev:TerminationTime>2024-06-01T12:01:00Z</tev:TerminationTime>
                <wsnt:NotificationMessage>
                    <wsnt:Topic>tns1:VideoSource/MotionAlarm</wsnt:Topic>
                    <wsnt:Message><tt:Message UtcTime="2024-06-01T11:59:58Z">
                        <tt:Source><tt:SimpleItem Name="Source" Value="vs_0"/></tt:Source>
                        <tt:Data><tt:SimpleItem Name="State" Value="true"/></tt:Data>
                    </tt:Message></wsnt:Message>
                </wsnt:NotificationMessage>
                <wsnt:NotificationMessage>
                    <wsnt:Topic>tns1:VideoSource/MotionAlarm</wsnt:Topic>
                    <wsnt:Message><tt:Message UtcTime="2024-06-01T11:59:59Z">
                        <tt:Source><tt:SimpleItem Name="Source" Value="vs_0"/></tt:Source>
                    </tt:Message></wsnt:Message>
                </wsnt:NotificationMessage>
            </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        assert_eq!(response.current_time, parse_event_time("2024-06-01T12:00:00Z").unwrap());
        assert!(response.notification_messages.is_empty());
    }

    #[test]
    fn first_simple_item_per_section_wins() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl"
            xmlns:wsnt="http://docs.oasis-open.org/wsn/b-2"
            xmlns:tt="http://www.onvif.org/ver10/schema">
            <s:Body><tev:PullMessagesResponse>
                <tev:CurrentTime>2024-06-01T12:00:00Z</tev:CurrentTime>
                <tev:TerminationTime>2024-06-01T12:01:00Z</tev:TerminationTime>
                <wsnt:NotificationMessage>
                    <wsnt:Topic>tns1:RuleEngine/CellMotionDetector/Motion</wsnt:Topic>
                    <wsnt:Message><tt:Message UtcTime="2024-06-01T11:59:58Z">
                        <tt:Source>
                            <tt:SimpleItem Name="VideoSourceConfigurationToken" Value="vsc_0"/>
                            <tt:SimpleItem Name="Rule" Value="MyMotion"/>
                        </tt:Source>
                        <tt:Data><tt:SimpleItem Name="IsMotion" Value="true"/></tt:Data>
                    </tt:Message></wsnt:Message>
                </wsnt:NotificationMessage>
            </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        let message = &response.notification_messages[0];
        assert_eq!(
            message.source,
            SimpleItem::new("VideoSourceConfigurationToken", "vsc_0")
        );
    }

    #[test]
    fn foreign_namespace_elements_are_ignored() {
        // NotificationMessage in the wrong namespace must not be decoded.
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"
            xmlns:tev="http://www.onvif.org/ver10/events/wsdl"
            xmlns:other="http://example.com/not-wsnt">
            <s:Body><tev:PullMessagesResponse>
                <tev:CurrentTime>2024-06-01T12:00:00Z</tev:CurrentTime>
                <tev:TerminationTime>2024-06-01T12:01:00Z</tev:TerminationTime>
                <other:NotificationMessage><other:Topic>bogus</other:Topic></other:NotificationMessage>
            </tev:PullMessagesResponse></s:Body></s:Envelope>"#;

        let response = parse_pull_response(xml);
        assert!(response.notification_messages.is_empty());
        assert_eq!(response.current_time, parse_event_time("2024-06-01T12:00:00Z").unwrap());
    }

    #[test]
    fn strict_time_format_only() {
        assert!(parse_event_time("2024-06-01T12:00:00Z").is_some());
        assert!(parse_event_time("  2024-06-01T12:00:00Z ").is_some());
        assert!(parse_event_time("2024-06-01T12:00:00+02:00").is_none());
        assert!(parse_event_time("").is_none());
    }
}
