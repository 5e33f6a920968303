//! Event request bodies.

use crate::params::event::{EventBrokerConfig, FilterType};
use crate::params::ToXml;
use crate::utils::xml_escape;

#[derive(Debug, Clone, Default)]
pub struct CreatePullPointSubscription {
    pub filter: Option<FilterType>,
    /// ISO-8601 duration or absolute time for the subscription lifetime.
    pub initial_termination_time: Option<String>,
}

impl CreatePullPointSubscription {
    pub fn with_filter(filter: FilterType) -> Self {
        CreatePullPointSubscription {
            filter: Some(filter),
            initial_termination_time: None,
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tev:CreatePullPointSubscription>");
        if let Some(filter) = &self.filter {
            body.push_str("<tev:Filter>");
            filter.write_xml(&mut body);
            body.push_str("</tev:Filter>");
        }
        if let Some(time) = &self.initial_termination_time {
            body.push_str(&format!(
                "<tev:InitialTerminationTime>{}</tev:InitialTerminationTime>",
                xml_escape(time)
            ));
        }
        body.push_str("</tev:CreatePullPointSubscription>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct AddEventBroker {
    pub config: EventBrokerConfig,
}

impl AddEventBroker {
    pub fn new(config: EventBrokerConfig) -> Self {
        AddEventBroker { config }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tev:AddEventBroker><tev:EventBroker>");
        self.config.write_xml(&mut body);
        body.push_str("</tev:EventBroker></tev:AddEventBroker>");
        body
    }
}
