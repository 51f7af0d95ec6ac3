//! Client for the WoW Armory's XML character sheets and item tooltips.
//!
//! ```no_run
//! # async fn run() -> armory::Result<()> {
//! let armory = armory::Armory::new()?;
//! let character = armory.character("us", "Lothar", "Retcon").await?;
//! println!("{character} is level {}", character.character.level);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod page;
pub mod response;
pub mod xml;

pub use client::{get_character, get_item, Armory, Endpoints, Region};
pub use error::{Error, Result};
