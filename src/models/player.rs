//! Player model and registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId};
use crate::classify::normalize;

/// A player seen in the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Derived from the normalized name
    pub id: PlayerId,

    /// Name as first logged
    pub name: String,

    pub position: Option<String>,

    pub team: Option<String>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            id: Self::id_for(name),
            name: name.trim().to_string(),
            position: None,
            team: None,
        }
    }

    /// The id a name maps to. Names differing only in case, accents or
    /// spacing share an id.
    pub fn id_for(name: &str) -> PlayerId {
        EntityId::generate(&["player", &normalize(name)])
    }
}

/// Players keyed by normalized name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    index: HashMap<String, usize>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the player for `name`, creating it on first mention.
    ///
    /// Position and team are filled in when first known and never overwritten.
    /// Blank names are ignored.
    pub fn get_or_create(
        &mut self,
        name: &str,
        position: Option<&str>,
        team: Option<&str>,
    ) -> Option<&Player> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }

        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.players.push(Player::new(name));
                let idx = self.players.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };

        let player = &mut self.players[idx];
        if player.position.is_none() {
            player.position = position.filter(|p| !p.trim().is_empty()).map(str::to_string);
        }
        if player.team.is_none() {
            player.team = team.filter(|t| !t.trim().is_empty()).map(str::to_string);
        }
        Some(&self.players[idx])
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.index.get(&normalize(name)).map(|&idx| &self.players[idx])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_is_idempotent() {
        let mut registry = PlayerRegistry::new();
        let first = registry
            .get_or_create("Hugo Descat", None, Some("PSG"))
            .unwrap()
            .id
            .clone();
        let second = registry
            .get_or_create("  hugo   DESCAT ", Some("ailier gauche"), Some("Nantes"))
            .unwrap();

        assert_eq!(first, second.id);
        assert_eq!(second.name, "Hugo Descat");
        assert_eq!(second.position.as_deref(), Some("ailier gauche"));
        // team keeps the first value seen
        assert_eq!(second.team.as_deref(), Some("PSG"));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Hugo Descat"]
        );
    }

    #[test]
    fn test_accents_share_identity() {
        let mut registry = PlayerRegistry::new();
        registry.get_or_create("Rémi Desbonnet", None, None);
        assert!(registry.get("remi desbonnet").is_some());
        assert_eq!(Player::id_for("Rémi Desbonnet"), Player::id_for("REMI DESBONNET"));
    }

    #[test]
    fn test_blank_names_ignored() {
        let mut registry = PlayerRegistry::new();
        assert!(registry.get_or_create("   ", None, None).is_none());
        assert!(registry.is_empty());
    }
}
