//! Records built from Armory documents.

use std::fmt;

use serde::Serialize;

pub mod character;
pub mod container;
pub mod item;

pub use character::{
    ArenaTeamCharacter, Character, CharacterDetails, DetailedCharacter, GuildCharacter, SpellStats,
};
pub use container::{ArenaTeam, CharacterContainer, Guild, GuildKey, TeamKey};
pub use item::{DetailedItem, EquippedItem, Glyph};

/// Records compare by an identity key, never by their stats.
pub trait Identified {
    type Key<'a>: PartialEq + fmt::Debug
    where
        Self: 'a;

    fn key(&self) -> Self::Key<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Faction {
    Alliance,
    Horde,
}

impl Faction {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Faction::Alliance),
            1 => Some(Faction::Horde),
            _ => None,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Alliance => write!(f, "Alliance"),
            Faction::Horde => write!(f, "Horde"),
        }
    }
}
