//! Analytics parameter types: the generic ItemList/Config shapes used by
//! analytics modules and rules.

use super::{attr, wrap, ToXml};

/// Name/value pair carried as attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl ToXml for SimpleItem {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<tt:SimpleItem");
        attr(out, "Name", &self.name);
        attr(out, "Value", &self.value);
        out.push_str("/>");
    }
}

/// Named slot for structured content (polygons, cell layouts). The content
/// itself is device specific, so it travels as a raw fragment.
#[derive(Debug, Clone)]
pub struct ElementItem {
    pub name: String,
    pub content: Option<String>,
}

impl ElementItem {
    pub fn new(name: &str) -> Self {
        ElementItem { name: name.to_string(), content: None }
    }
}

impl ToXml for ElementItem {
    fn write_xml(&self, out: &mut String) {
        out.push_str("<tt:ElementItem");
        attr(out, "Name", &self.name);
        match &self.content {
            Some(content) => {
                out.push('>');
                out.push_str(content);
                out.push_str("</tt:ElementItem>");
            }
            None => out.push_str("/>"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemList {
    pub simple_items: Vec<SimpleItem>,
    pub element_items: Vec<ElementItem>,
}

impl ToXml for ItemList {
    fn write_xml(&self, out: &mut String) {
        for item in &self.simple_items {
            item.write_xml(out);
        }
        for item in &self.element_items {
            item.write_xml(out);
        }
    }
}

/// One analytics module or rule: `Name` and `Type` attributes plus a
/// parameter list. The wrapping element differs per operation, so the
/// message builder names it.
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub config_type: String,
    pub parameters: ItemList,
}

impl Config {
    pub fn new(name: &str, config_type: &str) -> Self {
        Config {
            name: name.to_string(),
            config_type: config_type.to_string(),
            parameters: ItemList::default(),
        }
    }

    pub(crate) fn write_as(&self, out: &mut String, element: &str) {
        out.push('<');
        out.push_str(element);
        attr(out, "Name", &self.name);
        attr(out, "Type", &self.config_type);
        out.push('>');
        wrap(out, "tt:Parameters", &self.parameters);
        out.push_str("</");
        out.push_str(element);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_item_escapes_attribute_values() {
        let item = SimpleItem::new("Sensitivity", "a\"b");
        assert_eq!(item.to_xml(), r#"<tt:SimpleItem Name="Sensitivity" Value="a&quot;b"/>"#);
    }

    #[test]
    fn config_wraps_parameters() {
        let mut config = Config::new("MyMotion", "tt:CellMotionEngine");
        config.parameters.simple_items.push(SimpleItem::new("Sensitivity", "80"));
        let mut out = String::new();
        config.write_as(&mut out, "tan:AnalyticsModule");
        assert_eq!(
            out,
            r#"<tan:AnalyticsModule Name="MyMotion" Type="tt:CellMotionEngine">"#.to_owned()
                + r#"<tt:Parameters><tt:SimpleItem Name="Sensitivity" Value="80"/></tt:Parameters>"#
                + "</tan:AnalyticsModule>"
        );
    }

    #[test]
    fn element_item_without_content_self_closes() {
        assert_eq!(ElementItem::new("Polygon").to_xml(), r#"<tt:ElementItem Name="Polygon"/>"#);
    }
}
