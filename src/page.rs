//! Parsing of whole Armory documents, independent of how they were fetched.

use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::response::{DetailedCharacter, DetailedItem, Guild};
use crate::xml;

/// The `page` element every Armory document is wrapped in.
fn page<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.has_tag_name("page") {
        return Ok(root);
    }
    xml::require(root, "page")
}

/// Parses a `character-sheet.xml` document.
pub fn character_sheet(text: &str) -> Result<DetailedCharacter> {
    let doc = Document::parse(text)?;
    let info = xml::require(page(&doc)?, "characterInfo")?;

    if let Some(code) = info.attribute("errCode") {
        tracing::warn!(code, "armory rejected character lookup");
        return Err(Error::Upstream {
            code: code.to_string(),
        });
    }
    DetailedCharacter::from_node(info)
}

/// Parses an `item-tooltip.xml` document for item `id`.
pub fn item_tooltip(text: &str, id: u32) -> Result<DetailedItem> {
    let doc = Document::parse(text)?;
    let Some(tooltip) = xml::find(page(&doc)?, "itemTooltip") else {
        return Err(Error::ItemNotFound { id });
    };
    DetailedItem::from_node(tooltip)
}

/// Parses a guild roster document.
pub fn guild_info(text: &str) -> Result<Guild> {
    let doc = Document::parse(text)?;
    let info = xml::require(page(&doc)?, "guildInfo")?;
    Guild::from_node(info)
}
