//! Card system: definitions, categories and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card within the catalog
//! - `Category`: Truth, Task, Group, Duel, Wildcard
//! - `Card`: Static prompt text and drink cost
//! - `CardCatalog`: Every card the game ships with
//! - `CategorySelection`: Which categories a session deals

pub mod catalog;
pub mod definition;

pub use catalog::{CardCatalog, CategorySelection};
pub use definition::{Card, CardId, Category, CategoryStyle};
