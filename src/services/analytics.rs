//! Analytics facade: module and rule management for one video analytics
//! configuration.

use log::error;
use url::Url;

use crate::error::{Error, Result};
use crate::messages::analytics::{
    CreateAnalyticsModules, CreateRules, ModifyAnalyticsModules, ModifyRules,
};
use crate::session::DeviceSession;
use crate::soap::SoapClient;
use crate::utils::xml_escape;

pub struct AnalyticsService {
    client: SoapClient,
    endpoint: Option<Url>,
}

impl AnalyticsService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.capabilities().url_analytics.clone()
        } else {
            None
        };
        if endpoint.is_none() {
            error!(
                "Analytics service not available on {}",
                session.connection_address()
            );
        }

        AnalyticsService {
            client: session.client().clone(),
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::Unsupported("analytics"))
    }

    async fn call(&self, body: &str) -> Result<String> {
        self.client.call(self.endpoint()?, body).await
    }

    /// One-element body of the shape `<tan:Op><tan:ConfigurationToken>..`.
    async fn call_for_configuration(&self, operation: &str, token: &str) -> Result<String> {
        let body = format!(
            "<tan:{operation}><tan:ConfigurationToken>{}</tan:ConfigurationToken></tan:{operation}>",
            xml_escape(token)
        );
        self.call(&body).await
    }

    /// Token list body used by the delete operations; `item` names the
    /// per-entry element.
    async fn call_with_names(
        &self,
        operation: &str,
        configuration_token: &str,
        item: &str,
        names: &[&str],
    ) -> Result<String> {
        let mut body = format!(
            "<tan:{operation}><tan:ConfigurationToken>{}</tan:ConfigurationToken>",
            xml_escape(configuration_token)
        );
        for name in names {
            body.push_str(&format!("<tan:{item}>{}</tan:{item}>", xml_escape(name)));
        }
        body.push_str(&format!("</tan:{operation}>"));
        self.call(&body).await
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.call("<tan:GetServiceCapabilities/>").await
    }

    pub async fn get_supported_analytics_modules(&self, configuration_token: &str) -> Result<String> {
        self.call_for_configuration("GetSupportedAnalyticsModules", configuration_token)
            .await
    }

    pub async fn get_analytics_modules(&self, configuration_token: &str) -> Result<String> {
        self.call_for_configuration("GetAnalyticsModules", configuration_token)
            .await
    }

    pub async fn get_analytics_module_options(
        &self,
        configuration_token: &str,
        module_type: Option<&str>,
    ) -> Result<String> {
        let mut body = String::from("<tan:GetAnalyticsModuleOptions>");
        if let Some(kind) = module_type {
            body.push_str(&format!("<tan:Type>{}</tan:Type>", xml_escape(kind)));
        }
        body.push_str(&format!(
            "<tan:ConfigurationToken>{}</tan:ConfigurationToken></tan:GetAnalyticsModuleOptions>",
            xml_escape(configuration_token)
        ));
        self.call(&body).await
    }

    pub async fn create_analytics_modules(&self, message: CreateAnalyticsModules) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn modify_analytics_modules(&self, message: ModifyAnalyticsModules) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn delete_analytics_modules(
        &self,
        configuration_token: &str,
        module_names: &[&str],
    ) -> Result<()> {
        self.call_with_names(
            "DeleteAnalyticsModules",
            configuration_token,
            "AnalyticsModuleName",
            module_names,
        )
        .await?;
        Ok(())
    }

    pub async fn get_supported_rules(&self, configuration_token: &str) -> Result<String> {
        self.call_for_configuration("GetSupportedRules", configuration_token)
            .await
    }

    pub async fn get_rules(&self, configuration_token: &str) -> Result<String> {
        self.call_for_configuration("GetRules", configuration_token)
            .await
    }

    pub async fn get_rule_options(
        &self,
        configuration_token: &str,
        rule_type: Option<&str>,
    ) -> Result<String> {
        let mut body = String::from("<tan:GetRuleOptions>");
        if let Some(kind) = rule_type {
            body.push_str(&format!("<tan:RuleType>{}</tan:RuleType>", xml_escape(kind)));
        }
        body.push_str(&format!(
            "<tan:ConfigurationToken>{}</tan:ConfigurationToken></tan:GetRuleOptions>",
            xml_escape(configuration_token)
        ));
        self.call(&body).await
    }

    pub async fn get_supported_metadata(&self, configuration_token: &str) -> Result<String> {
        self.call_for_configuration("GetSupportedMetadata", configuration_token)
            .await
    }

    pub async fn create_rules(&self, message: CreateRules) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn modify_rules(&self, message: ModifyRules) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn delete_rules(&self, configuration_token: &str, rule_names: &[&str]) -> Result<()> {
        self.call_with_names("DeleteRules", configuration_token, "RuleName", rule_names)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_analytics_capability_disables_facade() {
        let session = DeviceSession::new("192.168.1.168", 80, None);
        let service = AnalyticsService::new(&session);
        assert!(matches!(
            service.endpoint(),
            Err(Error::Unsupported("analytics"))
        ));
    }
}
