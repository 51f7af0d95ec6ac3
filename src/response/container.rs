use std::collections::BTreeMap;
use std::fmt;

use roxmltree::Node;
use serde::Serialize;

use super::character::{ArenaTeamCharacter, GuildCharacter};
use super::{Faction, Identified};
use crate::error::Result;
use crate::xml::{self, Value};

/// A named roster of characters on a realm.
pub trait CharacterContainer {
    type Member;

    fn name(&self) -> &str;
    fn realm(&self) -> &str;
    fn members(&self) -> &[Self::Member];

    fn len(&self) -> usize {
        self.members().len()
    }

    fn is_empty(&self) -> bool {
        self.members().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Member> {
        self.members().iter()
    }
}

macro_rules! container {
    ($ty:ty, $member:ty) => {
        impl CharacterContainer for $ty {
            type Member = $member;

            fn name(&self) -> &str {
                &self.name
            }

            fn realm(&self) -> &str {
                &self.realm
            }

            fn members(&self) -> &[$member] {
                &self.members
            }
        }

        impl Identified for $ty {
            type Key<'a> = (&'a str, &'a str);

            fn key(&self) -> Self::Key<'_> {
                (&self.name, &self.realm)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.key() == other.key()
            }
        }

        impl Eq for $ty {}

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name)
            }
        }

        impl<'a> IntoIterator for &'a $ty {
            type Item = &'a $member;
            type IntoIter = std::slice::Iter<'a, $member>;

            fn into_iter(self) -> Self::IntoIter {
                self.members.iter()
            }
        }
    };
}

container!(ArenaTeam, ArenaTeamCharacter);
container!(Guild, GuildCharacter);

/// What an arena team hands down to each member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamKey {
    pub name: String,
    pub faction: String,
    pub realm: String,
    pub battlegroup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArenaTeam {
    pub name: String,
    pub faction: String,
    pub realm: String,
    pub battlegroup: String,
    pub ranking: u32,
    pub last_season_ranking: u32,
    pub rating: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub season_games_played: u32,
    pub season_games_won: u32,
    pub emblem: BTreeMap<String, Value>,
    pub members: Vec<ArenaTeamCharacter>,
}

impl ArenaTeam {
    pub fn from_node(node: Node) -> Result<Self> {
        let key = TeamKey {
            name: xml::attr(node, "name"),
            faction: xml::attr(node, "faction"),
            realm: xml::attr(node, "realm"),
            battlegroup: xml::attr(node, "battleGroup"),
        };
        let members = xml::find_all(node, "character")
            .map(|c| ArenaTeamCharacter::from_node(c, &key))
            .collect::<Result<_>>()?;

        Ok(ArenaTeam {
            ranking: xml::attr_u32_or_zero(node, "ranking")?,
            last_season_ranking: xml::attr_u32_or_zero(node, "lastSeasonRanking")?,
            rating: xml::attr_u32_or_zero(node, "rating")?,
            games_played: xml::attr_u32_or_zero(node, "gamesPlayed")?,
            games_won: xml::attr_u32_or_zero(node, "gamesWon")?,
            season_games_played: xml::attr_u32_or_zero(node, "seasonGamesPlayed")?,
            season_games_won: xml::attr_u32_or_zero(node, "seasonGamesWon")?,
            emblem: xml::find(node, "emblem")
                .map(xml::attribute_map)
                .unwrap_or_default(),
            members,
            name: key.name,
            faction: key.faction,
            realm: key.realm,
            battlegroup: key.battlegroup,
        })
    }
}

/// Identity of a guild, read from its `guildKey` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildKey {
    pub name: String,
    pub realm: String,
    pub faction: Option<Faction>,
}

impl GuildKey {
    pub fn from_node(node: Node) -> Result<Self> {
        let faction = match node.attribute("factionId") {
            Some(id) => Faction::from_id(xml::parse_number("factionId", id)?),
            None => None,
        };

        Ok(GuildKey {
            name: xml::attr(node, "name"),
            realm: xml::attr(node, "realm"),
            faction,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Guild {
    pub name: String,
    pub realm: String,
    pub faction: Option<Faction>,
    pub members: Vec<GuildCharacter>,
}

impl Guild {
    /// Builds from a `guildInfo` node: identity from its `guildKey`, members
    /// from every `character` beneath it.
    pub fn from_node(node: Node) -> Result<Self> {
        let key = GuildKey::from_node(xml::require(node, "guildKey")?)?;
        let members = xml::find_all(node, "character")
            .map(|c| GuildCharacter::from_node(c, &key))
            .collect::<Result<_>>()?;

        Ok(Guild {
            name: key.name,
            realm: key.realm,
            faction: key.faction,
            members,
        })
    }
}
