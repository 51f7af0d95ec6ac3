//! Guild roster documents parsed into `Guild`s.

use armory::page;
use armory::response::{CharacterContainer, Faction};

const GUILD: &str = include_str!("fixtures/guild_info.xml");

#[test]
fn guild_identity_comes_from_the_guild_key() {
    let guild = page::guild_info(GUILD).expect("roster should parse");

    assert_eq!(guild.to_string(), "Boom");
    assert_eq!(guild.realm(), "Lothar");
    assert_eq!(guild.faction, Some(Faction::Horde));
    assert_eq!(guild.len(), 2);
    assert!(!guild.is_empty());
}

#[test]
fn members_inherit_realm_guild_and_faction() {
    let guild = page::guild_info(GUILD).unwrap();

    for member in &guild {
        assert_eq!(member.character.realm, "Lothar");
        assert_eq!(member.character.guild.as_deref(), Some("Boom"));
        assert_eq!(member.faction, Some(Faction::Horde));
    }
    assert_eq!(guild.members[1].to_string(), "Strafe <Boom> (Lothar)");
    assert_eq!(guild.members[1].character.level, 71);
}

#[test]
fn members_can_be_ranked_by_level() {
    let guild = page::guild_info(GUILD).unwrap();
    let mut members: Vec<_> = guild.iter().collect();
    members.sort_by(|a, b| a.character.cmp_level(*b));

    let names: Vec<_> = members.iter().map(|m| m.character.name.as_str()).collect();
    assert_eq!(names, ["Strafe", "Retcon"]);
}

#[test]
fn guilds_compare_by_name_and_realm() {
    let a = page::guild_info(GUILD).unwrap();
    let mut b = a.clone();
    b.members.clear();
    b.faction = None;
    assert_eq!(a, b);

    b.realm = "Medivh".into();
    assert_ne!(a, b);
}

#[test]
fn unknown_faction_id_is_absent() {
    let xml = r#"<page><guildInfo><guildKey factionId="7" name="Odd" realm="Lothar"/></guildInfo></page>"#;
    let guild = page::guild_info(xml).unwrap();
    assert_eq!(guild.faction, None);
    assert!(guild.is_empty());
}
