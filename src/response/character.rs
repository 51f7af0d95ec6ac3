use std::cmp::Ordering;
use std::fmt;

use roxmltree::Node;
use serde::Serialize;

use super::container::{ArenaTeam, GuildKey, TeamKey};
use super::item::{EquippedItem, Glyph};
use super::{Faction, Identified};
use crate::error::{Error, Result};
use crate::xml::{self, Stat, StatBlock};

/// The fields every character node carries, whichever page it came from.
#[derive(Default, Debug, Clone, Serialize)]
pub struct Character {
    pub name: String,
    #[serde(rename = "class")]
    pub character_class: String,
    pub class_id: String,
    pub level: u32,
    pub race: String,
    pub gender: String,
    pub guild: Option<String>,
    pub realm: String,
}

impl Character {
    pub fn from_node(node: Node) -> Result<Self> {
        let guild = ["guild", "guildName"]
            .into_iter()
            .filter_map(|a| node.attribute(a))
            .find(|g| !g.is_empty())
            .map(str::to_string);

        Ok(Character {
            name: xml::attr(node, "name"),
            character_class: xml::attr(node, "class"),
            class_id: xml::attr(node, "classId"),
            level: xml::attr_u32_or_zero(node, "level")?,
            race: xml::attr(node, "race"),
            gender: xml::attr(node, "gender"),
            guild,
            realm: xml::attr(node, "realm"),
        })
    }

    /// Orders characters by level alone.
    pub fn cmp_level(&self, other: &impl AsRef<Character>) -> Ordering {
        self.level.cmp(&other.as_ref().level)
    }

    /// Same name and realm, whatever page either side came from.
    pub fn same_as(&self, other: &impl AsRef<Character>) -> bool {
        self.key() == other.as_ref().key()
    }
}

impl Identified for Character {
    type Key<'a> = (&'a str, &'a str);

    fn key(&self) -> Self::Key<'_> {
        (&self.name, &self.realm)
    }
}

impl PartialEq for Character {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Character {}

impl AsRef<Character> for Character {
    fn as_ref(&self) -> &Character {
        self
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.guild {
            Some(guild) => write!(f, "{} <{}> ({})", self.name, guild, self.realm),
            None => write!(f, "{} ({})", self.name, self.realm),
        }
    }
}

/// Implements identity, equality and display for a record wrapping a
/// [`Character`] in its `character` field.
macro_rules! character_variant {
    ($ty:ty) => {
        impl AsRef<Character> for $ty {
            fn as_ref(&self) -> &Character {
                &self.character
            }
        }

        impl Identified for $ty {
            type Key<'a> = (&'a str, &'a str);

            fn key(&self) -> Self::Key<'_> {
                self.character.key()
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
                fmt::Display::fmt(&self.character, f)
            }
        }
    };
}

character_variant!(DetailedCharacter);
character_variant!(GuildCharacter);
character_variant!(ArenaTeamCharacter);

/// A character as shown on the character sheet.
///
/// `details` is `None` when the sheet had no populated `characterTab`, which
/// is what the Armory serves on a cache miss.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedCharacter {
    #[serde(flatten)]
    pub character: Character,
    pub last_modified: String,
    pub arena_teams: Vec<ArenaTeam>,
    pub details: Option<CharacterDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetails {
    pub bars: StatBlock,
    pub talents: (u32, u32, u32),
    pub base_stats: StatBlock,
    pub resistances: StatBlock,
    pub melee: StatBlock,
    pub ranged: StatBlock,
    pub defenses: StatBlock,
    pub spell: SpellStats,
    pub items: Vec<EquippedItem>,
    pub glyphs: Vec<Glyph>,
    pub pvp: StatBlock,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpellStats {
    pub bonus_damage: StatBlock,
    pub bonus_healing: Stat,
    pub hit_rating: Stat,
    /// The rating sits on the `critChance` node itself; per-school chances
    /// are its children.
    pub crit_rating: Stat,
    pub crit_chance: StatBlock,
    pub penetration: Stat,
    pub mana_regen: Stat,
}

impl DetailedCharacter {
    /// Builds from a `characterInfo` node.
    pub fn from_node(info: Node) -> Result<Self> {
        let node = xml::children_by_tag(info, "character")
            .next()
            .ok_or(Error::MissingElement("character"))?;

        let arena_teams = xml::find_all(info, "arenaTeam")
            .map(ArenaTeam::from_node)
            .collect::<Result<Vec<_>>>()?;

        let details = match xml::find(info, "characterTab") {
            Some(tab) if tab.children().any(|n| n.is_element()) => {
                Some(CharacterDetails::from_node(tab)?)
            }
            _ => {
                tracing::warn!(
                    name = node.attribute("name").unwrap_or_default(),
                    "character sheet has no character tab, returning basic info only"
                );
                None
            }
        };

        Ok(DetailedCharacter {
            character: Character::from_node(node)?,
            last_modified: xml::attr(node, "lastModified"),
            arena_teams,
            details,
        })
    }
}

impl CharacterDetails {
    fn from_node(tab: Node) -> Result<Self> {
        let talents = xml::require(tab, "talentSpec")?;
        let spell = xml::children_by_tag(tab, "spell")
            .next()
            .ok_or(Error::MissingElement("spell"))?;

        Ok(CharacterDetails {
            bars: xml::stat_block(tab, "characterBars"),
            talents: (
                xml::attr_number(talents, "treeOne")?,
                xml::attr_number(talents, "treeTwo")?,
                xml::attr_number(talents, "treeThree")?,
            ),
            base_stats: xml::stat_block(tab, "baseStats"),
            resistances: xml::stat_block(tab, "resistances"),
            melee: xml::stat_block(tab, "melee"),
            ranged: xml::stat_block(tab, "ranged"),
            defenses: xml::stat_block(tab, "defenses"),
            spell: SpellStats::from_node(spell)?,
            items: xml::find_all(tab, "item")
                .map(EquippedItem::from_node)
                .collect::<Result<_>>()?,
            glyphs: xml::find_all(tab, "glyph")
                .map(Glyph::from_node)
                .collect::<Result<_>>()?,
            pvp: xml::stat_block(tab, "pvp"),
        })
    }
}

impl SpellStats {
    fn from_node(spell: Node) -> Result<Self> {
        let stat = |tag| xml::require(spell, tag).map(xml::attributes);

        Ok(SpellStats {
            bonus_damage: xml::stat_block(spell, "bonusDamage"),
            bonus_healing: stat("bonusHealing")?,
            hit_rating: stat("hitRating")?,
            crit_rating: stat("critChance")?,
            crit_chance: xml::stat_block(spell, "critChance"),
            penetration: stat("penetration")?,
            mana_regen: stat("manaRegen")?,
        })
    }
}

/// A member of a guild roster.
#[derive(Debug, Clone, Serialize)]
pub struct GuildCharacter {
    #[serde(flatten)]
    pub character: Character,
    pub faction: Option<Faction>,
}

impl GuildCharacter {
    /// Realm and guild name come from the roster's key, not the member node.
    pub fn from_node(node: Node, guild: &GuildKey) -> Result<Self> {
        let mut character = Character::from_node(node)?;
        character.realm = guild.realm.clone();
        character.guild = Some(guild.name.clone());

        Ok(GuildCharacter {
            character,
            faction: guild.faction,
        })
    }
}

/// A member of an arena team, with their share of the team's games.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaTeamCharacter {
    #[serde(flatten)]
    pub character: Character,
    pub team: String,
    pub faction: String,
    pub battlegroup: String,
    pub contribution: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub season_games_played: u32,
    pub season_games_won: u32,
    pub team_rank: u32,
}

impl ArenaTeamCharacter {
    pub fn from_node(node: Node, team: &TeamKey) -> Result<Self> {
        let mut character = Character::from_node(node)?;
        character.realm = team.realm.clone();

        Ok(ArenaTeamCharacter {
            character,
            team: team.name.clone(),
            faction: team.faction.clone(),
            battlegroup: team.battlegroup.clone(),
            contribution: xml::attr_u32_or_zero(node, "contribution")?,
            games_played: xml::attr_u32_or_zero(node, "gamesPlayed")?,
            games_won: xml::attr_u32_or_zero(node, "gamesWon")?,
            season_games_played: xml::attr_u32_or_zero(node, "seasonGamesPlayed")?,
            season_games_won: xml::attr_u32_or_zero(node, "seasonGamesWon")?,
            team_rank: xml::attr_u32_or_zero(node, "teamRank")?,
        })
    }
}
