use std::fmt;

use roxmltree::Node;
use serde::Serialize;

use super::Identified;
use crate::error::{Error, Result};
use crate::xml;

/// Id-keyed identity, equality and `<prefix>:<id>` display.
macro_rules! by_id {
    ($ty:ty, $prefix:literal) => {
        impl Identified for $ty {
            type Key<'a> = u32;

            fn key(&self) -> Self::Key<'_> {
                self.id
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.id)
            }
        }
    };
}

by_id!(EquippedItem, "item");
by_id!(DetailedItem, "item");
by_id!(Glyph, "glyph");

/// An item as listed on a character sheet.
#[derive(Debug, Clone, Serialize)]
pub struct EquippedItem {
    pub id: u32,
    pub name: String,
    pub slot: i32,
    /// Texture name, e.g. `inv_chest_plate_25`.
    pub icon: String,
    pub rarity: u32,
    pub enchant: u32,
    pub seed: i64,
    pub random_properties: i32,
    pub durability: u32,
    pub max_durability: u32,
    pub gems: (u32, u32, u32),
}

impl EquippedItem {
    pub fn from_node(node: Node) -> Result<Self> {
        Ok(EquippedItem {
            id: xml::attr_number(node, "id")?,
            name: xml::attr(node, "name"),
            slot: xml::attr_number(node, "slot")?,
            icon: xml::attr(node, "icon"),
            rarity: xml::attr_number(node, "rarity")?,
            enchant: xml::attr_number(node, "permanentenchant")?,
            seed: xml::attr_number(node, "seed")?,
            random_properties: xml::attr_number(node, "randomPropertiesId")?,
            durability: xml::attr_number(node, "durability")?,
            max_durability: xml::attr_number(node, "maxDurability")?,
            gems: (
                xml::attr_number(node, "gem0Id")?,
                xml::attr_number(node, "gem1Id")?,
                xml::attr_number(node, "gem2Id")?,
            ),
        })
    }
}

/// An item as described by its tooltip.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedItem {
    pub id: u32,
    pub name: String,
    pub icon: String,
    /// 0 (poor) through 5 (legendary).
    pub quality: Option<u8>,
    /// 1 binds on pickup, 2 on equip, 3 on use, 4 and 5 are quest items.
    pub bonding: Option<u8>,
    /// Inventory type; absent for items that can't be equipped.
    pub slot: Option<u32>,
    /// Class id and subclass name, e.g. `(Some(4), "Plate")`.
    pub item_class: (Option<u32>, String),
}

impl DetailedItem {
    /// Builds from an `itemTooltip` node.
    pub fn from_node(node: Node) -> Result<Self> {
        let id = xml::find(node, "id").ok_or(Error::MissingElement("id"))?;

        Ok(DetailedItem {
            id: xml::parse_number("id", &xml::node_text(id))?,
            name: xml::text_by_tag(node, "name"),
            icon: xml::text_by_tag(node, "icon"),
            quality: optional_text(node, "overallQualityId")?,
            bonding: optional_text(node, "bonding")?,
            slot: optional_text(node, "inventoryType")?,
            item_class: (
                optional_text(node, "classId")?,
                xml::text_by_tag(node, "subclassName"),
            ),
        })
    }
}

/// A numeric text field; a missing or empty element is `None`.
fn optional_text<T: std::str::FromStr>(node: Node, tag: &'static str) -> Result<Option<T>> {
    match xml::text_by_tag(node, tag).trim() {
        "" => Ok(None),
        text => xml::parse_number(tag, text).map(Some),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Glyph {
    pub id: u32,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub effect: String,
}

impl Glyph {
    pub fn from_node(node: Node) -> Result<Self> {
        Ok(Glyph {
            id: xml::attr_number(node, "id")?,
            name: xml::attr(node, "name"),
            icon: xml::attr(node, "icon"),
            kind: xml::attr(node, "type"),
            effect: xml::attr(node, "effect"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"<item id="40481" name="Heroes' Plagueheart Robe" slot="4"
        icon="inv_chest_cloth_43" rarity="4" permanentenchant="3832" seed="0"
        randomPropertiesId="0" durability="100" maxDurability="100"
        gem0Id="40133" gem1Id="39998" gem2Id="0"/>"#;

    #[test]
    fn equipped_item_reads_every_attribute() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let item = EquippedItem::from_node(doc.root_element()).unwrap();
        assert_eq!(item.id, 40481);
        assert_eq!(item.slot, 4);
        assert_eq!(item.enchant, 3832);
        assert_eq!(item.gems, (40133, 39998, 0));
        assert_eq!(item.to_string(), "item:40481");
    }

    #[test]
    fn equipped_item_missing_id_is_an_error() {
        let doc = roxmltree::Document::parse(r#"<item name="Nothing"/>"#).unwrap();
        let err = EquippedItem::from_node(doc.root_element()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute { attribute: "id", .. }
        ));
    }

    #[test]
    fn glyphs_compare_by_id() {
        let a = roxmltree::Document::parse(r#"<glyph id="7" name="A" type="major"/>"#).unwrap();
        let b = roxmltree::Document::parse(r#"<glyph id="7" name="B" type="minor"/>"#).unwrap();
        let a = Glyph::from_node(a.root_element()).unwrap();
        let b = Glyph::from_node(b.root_element()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.key(), 7);
        assert_eq!(b.to_string(), "glyph:7");
    }
}
