use std::fmt;

use reqwest::{header, Client};

use crate::error::{Error, Result};
use crate::page;
use crate::response::{DetailedCharacter, DetailedItem};

const US_URL: &str = "http://wowarmory.com";
const EU_URL: &str = "http://eu.wowarmory.com";

/// Sent with every request; the Armory only serves XML to browsers it
/// recognises.
pub const USER_AGENT: &str = "armory-rs (treat as Firefox/2.0.0.8)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Us,
    Eu,
}

impl Region {
    /// Looks up a region code case-insensitively; unknown codes mean US.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "EU" => Region::Eu,
            _ => Region::Us,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::Eu => write!(f, "EU"),
        }
    }
}

/// Base URLs per region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub us: String,
    pub eu: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            us: US_URL.to_string(),
            eu: EU_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn base(&self, region: Region) -> &str {
        match region {
            Region::Us => &self.us,
            Region::Eu => &self.eu,
        }
    }

    /// Character sheet URL. Spaces in the realm become `+`.
    pub fn character_sheet(&self, region: Region, realm: &str, name: &str) -> String {
        format!(
            "{}/character-sheet.xml?r={}&n={}",
            self.base(region),
            realm.replace(' ', "+"),
            name
        )
    }

    /// Item tooltips are only looked up on the US site.
    pub fn item_tooltip(&self, id: u32) -> String {
        format!("{}/item-tooltip.xml?i={}", self.base(Region::Us), id)
    }
}

/// A handle on the Armory. Cloning is cheap; every call is one GET.
#[derive(Debug, Clone)]
pub struct Armory {
    client: Client,
    endpoints: Endpoints,
}

impl Armory {
    /// A client with reqwest's defaults.
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Uses a caller-configured client, e.g. one with a proxy or timeout.
    pub fn with_client(client: Client) -> Self {
        Armory {
            client,
            endpoints: Endpoints::default(),
        }
    }

    /// Points the client at different base URLs, e.g. a mirror.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches a character sheet. `region` is a code such as `"us"` or `"EU"`.
    pub async fn character(&self, region: &str, realm: &str, name: &str) -> Result<DetailedCharacter> {
        let url = self
            .endpoints
            .character_sheet(Region::from_code(region), realm, name);
        let text = self.get_page(&url).await?;
        page::character_sheet(&text)
    }

    pub async fn item(&self, id: u32) -> Result<DetailedItem> {
        let url = self.endpoints.item_tooltip(id);
        let text = self.get_page(&url).await?;
        page::item_tooltip(&text, id)
    }

    async fn get_page(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching armory page");
        let res = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }
        let text = res.text().await?;
        tracing::debug!(url, bytes = text.len(), "fetched armory page");
        Ok(text)
    }
}

/// Fetches a character sheet with a default [`Armory`].
pub async fn get_character(region: &str, realm: &str, name: &str) -> Result<DetailedCharacter> {
    Armory::new()?.character(region, realm, name).await
}

/// Fetches an item tooltip with a default [`Armory`].
pub async fn get_item(id: u32) -> Result<DetailedItem> {
    Armory::new()?.item(id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_codes_are_case_insensitive() {
        assert_eq!(Region::from_code("eu"), Region::Eu);
        assert_eq!(Region::from_code("EU"), Region::Eu);
        assert_eq!(Region::from_code("us"), Region::Us);
    }

    #[test]
    fn unknown_region_falls_back_to_us() {
        let endpoints = Endpoints::default();
        assert_eq!(Region::from_code("XX"), Region::Us);
        assert_eq!(
            endpoints.character_sheet(Region::from_code("XX"), "Lothar", "Retcon"),
            "http://wowarmory.com/character-sheet.xml?r=Lothar&n=Retcon"
        );
    }

    #[test]
    fn realm_spaces_become_plus() {
        let url = Endpoints::default().character_sheet(Region::Eu, "Argent Dawn", "Kemayo");
        assert_eq!(
            url,
            "http://eu.wowarmory.com/character-sheet.xml?r=Argent+Dawn&n=Kemayo"
        );
    }

    #[test]
    fn item_tooltip_always_uses_us() {
        assert_eq!(
            Endpoints::default().item_tooltip(40481),
            "http://wowarmory.com/item-tooltip.xml?i=40481"
        );
    }

    #[test]
    fn overridden_endpoints_are_used() {
        let armory = Armory::with_client(Client::new()).with_endpoints(Endpoints {
            us: "http://localhost:8080".into(),
            eu: "http://localhost:8081".into(),
        });
        assert_eq!(
            armory.endpoints().item_tooltip(1),
            "http://localhost:8080/item-tooltip.xml?i=1"
        );
    }
}
