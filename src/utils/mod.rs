use std::io::BufReader;

use log::warn;
use xml::reader::{EventReader, XmlEvent};

/// Collects the text of every element whose local name matches
/// `element_to_find`. When `parent` is given, collection only starts once an
/// element with that local name has been seen. `only_once` stops at the first
/// hit.
pub fn parse_soap(
    response: &[u8],
    element_to_find: &str,
    parent: Option<&str>,
    only_once: bool,
) -> Vec<String> {
    let mut element_found = false;
    let mut result = Vec::new();

    let buffer = BufReader::new(response);
    let parser = EventReader::new(buffer);

    let mut parent_found = parent.is_none();

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement { name, .. }) => {
                let element = name.local_name;

                if !parent_found && Some(element.as_str()) == parent {
                    parent_found = true;
                }

                if parent_found && element == element_to_find {
                    element_found = true;
                }
            }
            Ok(XmlEvent::EndElement { name, .. }) => {
                if element_found && name.local_name == element_to_find {
                    element_found = false;
                }
            }
            Ok(XmlEvent::Characters(chars)) => {
                if element_found {
                    result.push(chars);

                    if only_once {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!("[parse_soap] XML error: {e}");
                break;
            }
            _ => {}
        }
    }

    result
}

/// Collects the value of attribute `attr` from every element whose local name
/// matches `element_to_find`. Token references in ONVIF responses (profile
/// tokens, OSD tokens) live in attributes, not element text.
pub fn parse_soap_attr(response: &[u8], element_to_find: &str, attr: &str) -> Vec<String> {
    let mut result = Vec::new();

    let buffer = BufReader::new(response);
    let parser = EventReader::new(buffer);

    for e in parser {
        match e {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                if name.local_name == element_to_find {
                    for a in attributes {
                        if a.name.local_name == attr {
                            result.push(a.value);
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                warn!("[parse_soap_attr] XML error: {e}");
                break;
            }
            _ => {}
        }
    }

    result
}

/// Escapes text destined for element content or attribute values.
pub fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
        <Envelope xmlns:tt="http://www.onvif.org/ver10/schema">
            <Body>
                <Media><XAddr>http://cam/media</XAddr></Media>
                <Events><XAddr>http://cam/events</XAddr></Events>
                <tt:Profiles token="prof_0"><tt:Name>main</tt:Name></tt:Profiles>
                <tt:Profiles token="prof_1"><tt:Name>sub</tt:Name></tt:Profiles>
            </Body>
        </Envelope>"#;

    #[test]
    fn finds_element_under_parent() {
        let found = parse_soap(SAMPLE.as_bytes(), "XAddr", Some("Events"), true);
        assert_eq!(found, vec!["http://cam/events".to_string()]);
    }

    #[test]
    fn finds_all_without_parent() {
        let found = parse_soap(SAMPLE.as_bytes(), "XAddr", None, false);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], "http://cam/media");
    }

    #[test]
    fn missing_element_yields_empty() {
        assert!(parse_soap(SAMPLE.as_bytes(), "Nope", None, false).is_empty());
    }

    #[test]
    fn collects_attributes_in_document_order() {
        let tokens = parse_soap_attr(SAMPLE.as_bytes(), "Profiles", "token");
        assert_eq!(tokens, vec!["prof_0".to_string(), "prof_1".to_string()]);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(xml_escape(r#"a<b&"c""#), "a&lt;b&amp;&quot;c&quot;");
    }
}
