//! Helpers for pulling typed values out of Armory XML trees.

use std::collections::BTreeMap;

use roxmltree::Node;
use serde::Serialize;

use crate::error::{Error, Result};

/// A single attribute value, typed by its lexical content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

/// What a stat node carries: one bare value when it has a single attribute,
/// otherwise every attribute keyed by its normalized name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stat {
    Value(Value),
    Group(BTreeMap<String, Value>),
}

impl Stat {
    pub fn as_group(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Stat::Group(g) => Some(g),
            Stat::Value(_) => None,
        }
    }

    /// Looks up a field of a grouped stat.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_group().and_then(|g| g.get(key))
    }
}

/// A section of the character tab: child tag (normalized) to its stat.
pub type StatBlock = BTreeMap<String, Stat>;

/// Types an attribute string: all digits is an integer, digits with periods
/// is a float, anything else (including a leading `-`) stays text.
pub fn typed_value(s: &str) -> Value {
    let all_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());

    if all_digits(s) {
        if let Ok(i) = s.parse() {
            return Value::Int(i);
        }
    } else if all_digits(&s.replace('.', "")) {
        if let Ok(f) = s.parse() {
            return Value::Float(f);
        }
    }
    Value::Text(s.to_string())
}

/// Converts `camelCase` to `camel_case`. Only a lowercase letter followed by
/// an uppercase one is split, so `aBC` becomes `a_bC`.
pub fn decamel(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Direct element children with the given tag, in document order.
pub fn children_by_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let tag = tag.to_string();
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(tag.as_str()))
}

/// First descendant (not the node itself) with the given tag.
pub fn find<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.has_tag_name(tag))
}

/// All descendants (not the node itself) with the given tag.
pub fn find_all<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    let tag = tag.to_string();
    node.descendants()
        .skip(1)
        .filter(move |n| n.is_element() && n.has_tag_name(tag.as_str()))
}

/// Like [`find`], but a missing element is an error.
pub fn require<'a, 'input>(node: Node<'a, 'input>, tag: &'static str) -> Result<Node<'a, 'input>> {
    find(node, tag).ok_or(Error::MissingElement(tag))
}

/// Concatenated direct text children of a node.
pub fn node_text(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Text of the first descendant with the tag, or an empty string.
pub fn text_by_tag(node: Node, tag: &str) -> String {
    find(node, tag).map(node_text).unwrap_or_default()
}

/// Every attribute of a node, keyed by normalized name.
pub fn attribute_map(node: Node) -> BTreeMap<String, Value> {
    node.attributes()
        .map(|a| (decamel(a.name()), typed_value(a.value())))
        .collect()
}

/// A node's attributes as a [`Stat`]: the bare value if there is exactly one
/// attribute, a group otherwise.
pub fn attributes(node: Node) -> Stat {
    let mut attrs = node.attributes();
    match (attrs.next(), attrs.next()) {
        (Some(only), None) => Stat::Value(typed_value(only.value())),
        _ => Stat::Group(attribute_map(node)),
    }
}

/// For the first descendant tagged `section`, maps each element child's
/// normalized tag to its attributes. Empty when the section is missing.
pub fn stat_block(node: Node, section: &str) -> StatBlock {
    let Some(section) = find(node, section) else {
        return StatBlock::new();
    };
    section
        .children()
        .filter(|n| n.is_element())
        .map(|n| (decamel(n.tag_name().name()), attributes(n)))
        .collect()
}

/// An attribute as a string, empty when absent.
pub fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// An attribute as an unsigned integer; absent or empty reads as zero.
pub fn attr_u32_or_zero(node: Node, name: &'static str) -> Result<u32> {
    match node.attribute(name) {
        None | Some("") => Ok(0),
        Some(v) => parse_number(name, v),
    }
}

/// A required integer attribute.
pub fn attr_number<T: std::str::FromStr>(node: Node, name: &'static str) -> Result<T> {
    let v = node
        .attribute(name)
        .ok_or_else(|| Error::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: name,
        })?;
    parse_number(name, v)
}

pub(crate) fn parse_number<T: std::str::FromStr>(field: &'static str, v: &str) -> Result<T> {
    v.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: v.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_value_digits_are_integers() {
        assert_eq!(typed_value("0"), Value::Int(0));
        assert_eq!(typed_value("1337"), Value::Int(1337));
    }

    #[test]
    fn typed_value_dotted_digits_are_floats() {
        assert_eq!(typed_value("12.50"), Value::Float(12.5));
        assert_eq!(typed_value(".5"), Value::Float(0.5));
    }

    #[test]
    fn typed_value_leaves_everything_else_as_text() {
        assert_eq!(typed_value("-12"), Value::Text("-12".into()));
        assert_eq!(typed_value("-1.5"), Value::Text("-1.5".into()));
        assert_eq!(typed_value("Lothar"), Value::Text("Lothar".into()));
        assert_eq!(typed_value(""), Value::Text(String::new()));
        assert_eq!(typed_value("."), Value::Text(".".into()));
        assert_eq!(typed_value("1.2.3"), Value::Text("1.2.3".into()));
        assert_eq!(
            typed_value("99999999999999999999999"),
            Value::Text("99999999999999999999999".into())
        );
    }

    #[test]
    fn decamel_splits_simple_camel_case() {
        assert_eq!(decamel("armorType"), "armor_type");
        assert_eq!(decamel("hitRating"), "hit_rating");
        assert_eq!(decamel("seasonGamesPlayed"), "season_games_played");
    }

    #[test]
    fn decamel_does_not_split_uppercase_runs() {
        assert_eq!(decamel("aBC"), "a_bC");
        assert_eq!(decamel("petBonusAP"), "pet_bonus_aP");
        assert_eq!(decamel("HP"), "HP");
    }

    #[test]
    fn decamel_is_idempotent_without_uppercase() {
        for s in ["armor_type", "value", "", "mana_regen_5"] {
            assert_eq!(decamel(s), s);
            assert_eq!(decamel(&decamel(s)), s);
        }
    }

    const DOC: &str = r#"<page>
        <stats>
            <health effective="4000"/>
            <armor base="1200" effective="1350" percent="12.5" petBonus="-1"/>
            <label>Hello <b>bold</b>world</label>
        </stats>
        <nested><deep><label>deep</label></deep></nested>
    </page>"#;

    #[test]
    fn attributes_single_attribute_is_bare_value() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let health = find(doc.root_element(), "health").unwrap();
        assert_eq!(attributes(health), Stat::Value(Value::Int(4000)));
    }

    #[test]
    fn attributes_many_attributes_are_a_group() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let armor = find(doc.root_element(), "armor").unwrap();
        let stat = attributes(armor);
        let group = stat.as_group().unwrap();
        assert_eq!(group.len(), 4);
        assert_eq!(group["base"], Value::Int(1200));
        assert_eq!(group["percent"], Value::Float(12.5));
        assert_eq!(group["pet_bonus"], Value::Text("-1".into()));
    }

    #[test]
    fn node_text_only_joins_direct_text() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let label = find(doc.root_element(), "label").unwrap();
        assert_eq!(node_text(label), "Hello world");
    }

    #[test]
    fn text_by_tag_searches_any_depth() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let nested = find(doc.root_element(), "nested").unwrap();
        assert_eq!(text_by_tag(nested, "label"), "deep");
        assert_eq!(text_by_tag(nested, "missing"), "");
    }

    #[test]
    fn children_by_tag_ignores_grandchildren() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let page = doc.root_element();
        assert_eq!(children_by_tag(page, "label").count(), 0);
        assert_eq!(children_by_tag(page, "stats").count(), 1);
    }

    #[test]
    fn stat_block_maps_children_by_normalized_tag() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let block = stat_block(doc.root_element(), "stats");
        assert_eq!(block.len(), 3);
        assert_eq!(block["health"], Stat::Value(Value::Int(4000)));
        assert_eq!(block["armor"].get("effective"), Some(&Value::Int(1350)));
        assert_eq!(block["label"], Stat::Group(BTreeMap::new()));
        assert!(stat_block(doc.root_element(), "resistances").is_empty());
    }
}
