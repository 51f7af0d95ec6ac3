use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use armory::Armory;
use armory::response::{CharacterContainer, DetailedCharacter, DetailedItem};

#[derive(Parser, Debug)]
#[clap(author, version, about = "WoW CLI for the Armory character sheets and item tooltips", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Character(CharacterCmd),
    Item(ItemCmd),
}

#[derive(Args, Debug)]
struct CharacterCmd {
    /// Region code; anything other than EU means US
    #[clap(short, long, default_value = "us")]
    pub region: String,
    #[clap(short = 's', long)]
    pub realm: String,
    #[clap(short, long)]
    pub name: String,
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
struct ItemCmd {
    #[clap(short, long)]
    pub id: u32,
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug)]
enum Error {
    Armory(armory::Error),
    Json(serde_json::Error),
}

impl From<armory::Error> for Error {
    fn from(value: armory::Error) -> Self {
        Self::Armory(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_character(character: &DetailedCharacter) {
    let c = &character.character;
    println!("{}", character);
    println!("Level {} {} {} {}\n", c.level, c.gender, c.race, c.character_class);

    for team in &character.arena_teams {
        println!("{} - rating {} ({} members)", team, team.rating, team.len());
    }

    match &character.details {
        Some(details) => {
            let (one, two, three) = details.talents;
            println!("Talents: {}/{}/{}", one, two, three);
            println!("------------------------------------");
            for item in &details.items {
                println!("{}\t{}\t{}", item.slot, item.id, item.name);
            }
        }
        None => println!("No character tab in the armory's answer"),
    }
}

fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn print_item(item: &DetailedItem) {
    println!("{}\t{}", item, item.name);
    println!(
        "quality {}\tslot {}\tclass {} ({})",
        or_dash(item.quality),
        or_dash(item.slot),
        or_dash(item.item_class.0),
        item.item_class.1
    );
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "armory=info".into()),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    let armory = Armory::new()?;

    match &cli.command {
        Commands::Character(args) => {
            let character = armory.character(&args.region, &args.realm, &args.name).await?;
            if args.json {
                print_json(&character)?;
            } else {
                print_character(&character);
            }
        }
        Commands::Item(args) => {
            let item = armory.item(args.id).await?;
            if args.json {
                print_json(&item)?;
            } else {
                print_item(&item);
            }
        }
    }
    Ok(())
}
