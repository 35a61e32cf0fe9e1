//! Attribute helpers shared by the tileset and map readers

use crate::TiledError;
use roxmltree::Node;
use std::collections::HashMap;
use std::str::FromStr;
use tilesmith_core::Value;

pub(crate) fn parse_value<T: FromStr>(
    element: &'static str,
    attribute: &str,
    value: &str,
) -> Result<T, TiledError> {
    value.trim().parse().map_err(|_| TiledError::InvalidAttribute {
        element,
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Tile reference attribute where any negative value (Tiled writes -1) means none
pub(crate) fn parse_tile_ref(
    element: &'static str,
    attribute: &str,
    value: &str,
) -> Result<Option<u32>, TiledError> {
    let id: i64 = parse_value(element, attribute, value)?;
    if id < 0 {
        return Ok(None);
    }
    u32::try_from(id).map(Some).map_err(|_| TiledError::InvalidAttribute {
        element,
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn require<T>(
    value: Option<T>,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, TiledError> {
    value.ok_or(TiledError::MissingAttribute { element, attribute })
}

/// Reads the `<property>` children of a `<properties>` element
pub(crate) fn read_properties(node: Node) -> Result<HashMap<String, Value>, TiledError> {
    let mut properties = HashMap::new();
    for property in node.children().filter(|n| n.has_tag_name("property")) {
        let name = require(property.attribute("name"), "property", "name")?;
        let type_name = property.attribute("type").unwrap_or("string");
        // Multi-line strings are stored as text content instead of `value`
        let raw = property
            .attribute("value")
            .or_else(|| property.text())
            .unwrap_or_default();
        let value =
            Value::parse_typed(type_name, raw).ok_or_else(|| TiledError::InvalidAttribute {
                element: "property",
                attribute: name.to_string(),
                value: raw.to_string(),
            })?;
        properties.insert(name.to_string(), value);
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_parse_tile_ref() {
        assert_eq!(parse_tile_ref("wangcolor", "tile", "-1").unwrap(), None);
        assert_eq!(parse_tile_ref("wangcolor", "tile", "52").unwrap(), Some(52));
        assert!(parse_tile_ref("wangcolor", "tile", "x").is_err());
        assert!(parse_tile_ref("wangcolor", "tile", "99999999999").is_err());
    }

    #[test]
    fn test_read_properties() {
        let doc = Document::parse(
            r#"<properties>
                <property name="solid" type="bool" value="true"/>
                <property name="speed" type="float" value="1.5"/>
                <property name="note">multi
line</property>
            </properties>"#,
        )
        .unwrap();
        let props = read_properties(doc.root_element()).unwrap();
        assert_eq!(props.get("solid"), Some(&Value::Bool(true)));
        assert_eq!(props.get("speed"), Some(&Value::Float(1.5)));
        assert_eq!(props.get("note"), Some(&Value::String("multi\nline".to_string())));
    }

    #[test]
    fn test_read_properties_rejects_bad_value() {
        let doc = Document::parse(r#"<properties><property name="n" type="int" value="many"/></properties>"#)
            .unwrap();
        assert!(matches!(
            read_properties(doc.root_element()),
            Err(TiledError::InvalidAttribute { element: "property", .. })
        ));
    }
}
