//! Event parameter and result types: topic filters, broker configuration and
//! the notification model filled in by PullMessages.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

use super::{attr, elem, ToXml};

pub const CONCRETE_TOPIC_DIALECT: &str =
    "http://www.onvif.org/ver10/tev/topicExpression/ConcreteSet";

/// Placeholder timestamp used when a response omits or garbles a time field.
/// Callers can compare against it to detect an unusable value.
pub fn sentinel_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

/// Topic filter for subscriptions and broker publish filters.
#[derive(Debug, Clone)]
pub struct FilterType {
    pub topic_expression: String,
    pub dialect: String,
}

impl FilterType {
    pub fn topic(expression: &str) -> Self {
        FilterType {
            topic_expression: expression.to_string(),
            dialect: CONCRETE_TOPIC_DIALECT.to_string(),
        }
    }
}

impl ToXml for FilterType {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<wsnt:TopicExpression");
        attr(out, "Dialect", &self.dialect);
        out.push('>');
        out.push_str(&crate::utils::xml_escape(&self.topic_expression));
        out.push_str("</wsnt:TopicExpression>");
    }
}

/// MQTT/AMQP broker registration for AddEventBroker.
#[derive(Debug, Clone)]
pub struct EventBrokerConfig {
    pub address: String,
    pub topic_prefix: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub certificate_id: Option<String>,
    pub publish_filter: Option<FilterType>,
    pub qos: Option<i32>,
    pub cert_path_validation_policy_id: Option<String>,
}

impl EventBrokerConfig {
    pub fn new(address: &str, topic_prefix: &str) -> Self {
        EventBrokerConfig {
            address: address.to_string(),
            topic_prefix: topic_prefix.to_string(),
            username: None,
            password: None,
            certificate_id: None,
            publish_filter: None,
            qos: None,
            cert_path_validation_policy_id: None,
        }
    }
}

impl ToXml for EventBrokerConfig {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Address", &self.address);
        elem(out, "tt:TopicPrefix", &self.topic_prefix);
        if let Some(username) = &self.username {
            elem(out, "tt:UserName", username);
        }
        if let Some(password) = &self.password {
            elem(out, "tt:Password", password);
        }
        if let Some(id) = &self.certificate_id {
            elem(out, "tt:CertificateID", id);
        }
        if let Some(filter) = &self.publish_filter {
            out.push_str("<tt:PublishFilter>");
            filter.write_xml(out);
            out.push_str("</tt:PublishFilter>");
        }
        if let Some(qos) = self.qos {
            elem(out, "tt:QoS", &qos.to_string());
        }
        if let Some(id) = &self.cert_path_validation_policy_id {
            elem(out, "tt:CertPathValidationPolicyID", id);
        }
    }
}

/// First SimpleItem found under a notification's Source or Data section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleItem {
    pub name: String,
    pub value: String,
}

impl SimpleItem {
    pub fn new(name: &str, value: &str) -> Self {
        SimpleItem {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// One decoded wsnt:NotificationMessage.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// Topic path, e.g. `tns1:VideoSource/MotionAlarm`.
    pub topic: String,
    /// Attributes of the inner tt:Message element (UtcTime,
    /// PropertyOperation, ...), keyed by attribute name.
    pub message: HashMap<String, String>,
    pub source: SimpleItem,
    pub data: SimpleItem,
}

/// Everything PullMessages returns. Times fall back to [`sentinel_time`]
/// when the response is missing or malformed; the message list is empty
/// rather than absent when no events arrived.
#[derive(Debug, Clone)]
pub struct PullMessagesResponse {
    pub current_time: DateTime<Utc>,
    pub termination_time: DateTime<Utc>,
    pub notification_messages: Vec<NotificationMessage>,
}

impl Default for PullMessagesResponse {
    fn default() -> Self {
        PullMessagesResponse {
            current_time: sentinel_time(),
            termination_time: sentinel_time(),
            notification_messages: Vec::new(),
        }
    }
}
