//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition the engine can deploy,
//! including ability-spawned tokens. It provides lookup by `CardId` and by
//! name, and iterates in insertion order so anything derived from it (the
//! bot's card choice, default decks) is deterministic.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::error::CatalogError;

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use lane_battle::cards::{CardCatalog, CardDefinition, CardId, CardKind};
///
/// let mut catalog = CardCatalog::new();
/// let knight = CardDefinition::new(CardId::new(1), "knight", CardKind::Troop)
///     .with_cost(3)
///     .with_stats(1400.0, 120.0);
/// catalog.insert(knight).unwrap();
///
/// assert_eq!(catalog.by_name("knight").unwrap().id, CardId::new(1));
/// assert!(catalog.insert(CardDefinition::new(CardId::new(1), "copy", CardKind::Troop)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    by_id: FxHashMap<CardId, usize>,
    by_name: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Ids and names must both be unique.
    pub fn insert(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        if self.by_name.contains_key(&card.name) {
            return Err(CatalogError::DuplicateName(card.name));
        }
        let index = self.cards.len();
        self.by_id.insert(card.id, index);
        self.by_name.insert(card.name.clone(), index);
        self.cards.push(card);
        Ok(())
    }

    /// Load a catalog from a JSON array of card entries.
    ///
    /// Every token an ability spawns must be present in the same catalog, and
    /// an entry whose key names a handled ability must carry valid params.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every handled ability parsed and every token an ability
    /// refers to exists.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for card in &self.cards {
            for declared in &card.abilities {
                if let Some(err) = declared.malformed() {
                    return Err(CatalogError::MalformedAbility {
                        card: card.id,
                        key: declared.key().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
            for ability in card.known_abilities() {
                if let Some(token) = ability.token_refs() {
                    if !self.by_name.contains_key(token) {
                        return Err(CatalogError::UnknownToken {
                            card: card.id,
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.by_id.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.by_id.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Cards a player may hold: everything except tokens.
    pub fn playable(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(|c| !c.token)
    }

    /// Resolve a list of names to ids, skipping names not in the catalog.
    #[must_use]
    pub fn ids_for(&self, names: &[&str]) -> Vec<CardId> {
        names.iter().filter_map(|n| self.by_name(n)).map(|c| c.id).collect()
    }
}
