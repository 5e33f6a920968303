//! Analytics request bodies. Modules and rules share the Config shape; only
//! the operation and item element names differ.

use crate::params::analytics::Config;
use crate::utils::xml_escape;

fn config_list_body(operation: &str, token: &str, element: &str, configs: &[Config]) -> String {
    let mut body = format!("<tan:{operation}>");
    body.push_str(&format!(
        "<tan:ConfigurationToken>{}</tan:ConfigurationToken>",
        xml_escape(token)
    ));
    for config in configs {
        config.write_as(&mut body, element);
    }
    body.push_str(&format!("</tan:{operation}>"));
    body
}

#[derive(Debug, Clone)]
pub struct CreateAnalyticsModules {
    pub configuration_token: String,
    pub modules: Vec<Config>,
}

impl CreateAnalyticsModules {
    pub fn new(configuration_token: &str, modules: Vec<Config>) -> Self {
        CreateAnalyticsModules {
            configuration_token: configuration_token.to_string(),
            modules,
        }
    }

    pub fn to_body(&self) -> String {
        config_list_body(
            "CreateAnalyticsModules",
            &self.configuration_token,
            "tan:AnalyticsModule",
            &self.modules,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ModifyAnalyticsModules {
    pub configuration_token: String,
    pub modules: Vec<Config>,
}

impl ModifyAnalyticsModules {
    pub fn new(configuration_token: &str, modules: Vec<Config>) -> Self {
        ModifyAnalyticsModules {
            configuration_token: configuration_token.to_string(),
            modules,
        }
    }

    pub fn to_body(&self) -> String {
        config_list_body(
            "ModifyAnalyticsModules",
            &self.configuration_token,
            "tan:AnalyticsModule",
            &self.modules,
        )
    }
}

#[derive(Debug, Clone)]
pub struct CreateRules {
    pub configuration_token: String,
    pub rules: Vec<Config>,
}

impl CreateRules {
    pub fn new(configuration_token: &str, rules: Vec<Config>) -> Self {
        CreateRules {
            configuration_token: configuration_token.to_string(),
            rules,
        }
    }

    pub fn to_body(&self) -> String {
        config_list_body("CreateRules", &self.configuration_token, "tan:Rule", &self.rules)
    }
}

#[derive(Debug, Clone)]
pub struct ModifyRules {
    pub configuration_token: String,
    pub rules: Vec<Config>,
}

impl ModifyRules {
    pub fn new(configuration_token: &str, rules: Vec<Config>) -> Self {
        ModifyRules {
            configuration_token: configuration_token.to_string(),
            rules,
        }
    }

    pub fn to_body(&self) -> String {
        config_list_body("ModifyRules", &self.configuration_token, "tan:Rule", &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::analytics::SimpleItem;

    #[test]
    fn create_modules_lists_each_module() {
        let mut motion = Config::new("MyMotion", "tt:CellMotionEngine");
        motion.parameters.simple_items.push(SimpleItem::new("Sensitivity", "90"));
        let body =
            CreateAnalyticsModules::new("vac_0", vec![motion, Config::new("Tamper", "tt:TamperEngine")])
                .to_body();
        assert!(body.starts_with("<tan:CreateAnalyticsModules>"));
        assert!(body.contains("<tan:ConfigurationToken>vac_0</tan:ConfigurationToken>"));
        assert_eq!(body.matches("<tan:AnalyticsModule ").count(), 2);
    }

    #[test]
    fn rules_use_rule_element() {
        let body = ModifyRules::new("vac_0", vec![Config::new("Line1", "tt:LineDetector")]).to_body();
        assert!(body.contains(r#"<tan:Rule Name="Line1" Type="tt:LineDetector">"#));
        assert!(body.ends_with("</tan:ModifyRules>"));
    }
}
