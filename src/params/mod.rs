//! Request parameter builders: plain typed values, one per ONVIF schema
//! concept. Serialization happens exactly once, at the SOAP boundary, through
//! [`ToXml`]; the request message builders in [`crate::messages`] compose
//! these fragments into operation bodies.

pub mod analytics;
pub mod device;
pub mod event;
pub mod imaging;
pub mod media;
pub mod ptz;

use crate::utils::xml_escape;

/// Writes the ONVIF-schema XML fragment for one parameter value. Types whose
/// element name depends on context (vectors, speeds) write their children
/// only; the enclosing message supplies the wrapper element.
pub trait ToXml {
    fn write_xml(&self, out: &mut String);

    fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }
}

/// `<name>escaped-text</name>`
pub(crate) fn elem(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&xml_escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// `<name>...child.write_xml()...</name>`
pub(crate) fn wrap(out: &mut String, name: &str, child: &dyn ToXml) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    child.write_xml(out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub(crate) fn attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&xml_escape(value));
    out.push('"');
}
