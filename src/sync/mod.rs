//! Snapshot exchange between an authoritative simulation and its replicas.
//!
//! Exactly one side runs the simulation. It steps the match, applies
//! placement intents, and broadcasts whole snapshots. Replicas never mutate
//! a snapshot: they forward their placements as [`PlacementIntent`]s and
//! adopt whatever snapshot arrives next. Transport is out of scope; this
//! module only defines the payloads and the role discipline.
//!
//! ```
//! use lane_battle::core::Team;
//! use lane_battle::engine::BattleEngine;
//! use lane_battle::sync::{decode_snapshot, encode_snapshot, Role, Session};
//!
//! let engine = BattleEngine::default();
//! let mut host = Session::new(Role::Authoritative, engine.clone(), engine.new_match(3));
//! let mut guest = Session::new(Role::Replica, engine, host.state().clone());
//!
//! host.advance(0.1).unwrap();
//! let bytes = encode_snapshot(host.state()).unwrap();
//! guest.adopt(decode_snapshot(&bytes).unwrap()).unwrap();
//! assert_eq!(guest.state(), host.state());
//! assert!(guest.advance(0.1).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EntityId, GameState, Team};
use crate::engine::BattleEngine;
use crate::error::SyncError;

/// Serialize a snapshot for broadcast.
pub fn encode_snapshot(state: &GameState) -> Result<Vec<u8>, SyncError> {
    Ok(bincode::serialize(state)?)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<GameState, SyncError> {
    Ok(bincode::deserialize(bytes)?)
}

/// A replica's request to deploy a card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementIntent {
    pub card_id: CardId,
    pub x: f32,
    pub y: f32,
    pub team: Team,
}

impl PlacementIntent {
    #[must_use]
    pub fn new(card_id: CardId, x: f32, y: f32, team: Team) -> Self {
        Self { card_id, x, y, team }
    }

    pub fn encode(&self) -> Result<Vec<u8>, SyncError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SyncError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Which side of the exchange a session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Authoritative,
    Replica,
}

/// One participant's view of a match.
#[derive(Clone, Debug)]
pub struct Session {
    role: Role,
    engine: BattleEngine,
    state: GameState,
}

impl Session {
    #[must_use]
    pub fn new(role: Role, engine: BattleEngine, state: GameState) -> Self {
        Self { role, engine, state }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Step the simulation. Authoritative only.
    pub fn advance(&mut self, dt: f32) -> Result<&GameState, SyncError> {
        self.require(Role::Authoritative)?;
        self.state = self.engine.step(&self.state, dt);
        Ok(&self.state)
    }

    /// Apply a forwarded placement. Authoritative only.
    ///
    /// A rejected intent leaves the snapshot as it was and reports why.
    pub fn apply_intent(&mut self, intent: &PlacementIntent) -> Result<EntityId, SyncError> {
        self.require(Role::Authoritative)?;
        let (next, id) =
            self.engine
                .try_place_card(&self.state, intent.card_id, intent.x, intent.y, intent.team)?;
        self.state = next;
        Ok(id)
    }

    /// Replace the local snapshot with one received from the authority.
    pub fn adopt(&mut self, state: GameState) -> Result<(), SyncError> {
        self.require(Role::Replica)?;
        self.state = state;
        Ok(())
    }

    fn require(&self, role: Role) -> Result<(), SyncError> {
        match (self.role, role) {
            (a, b) if a == b => Ok(()),
            (Role::Replica, _) => Err(SyncError::NotAuthoritative),
            (Role::Authoritative, _) => Err(SyncError::NotReplica),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Session, Session) {
        let engine = BattleEngine::default();
        let state = engine.new_match(8);
        (
            Session::new(Role::Authoritative, engine.clone(), state.clone()),
            Session::new(Role::Replica, engine, state),
        )
    }

    #[test]
    fn test_intent_wire_format() {
        let intent = PlacementIntent::new(CardId::new(3), 120.0, 610.0, Team::Blue);
        let bytes = intent.encode().unwrap();
        assert_eq!(PlacementIntent::decode(&bytes).unwrap(), intent);
        assert!(PlacementIntent::decode(&bytes[..3]).is_err());
    }

    #[test]
    fn test_roles_are_enforced() {
        let (mut host, mut guest) = pair();
        let snapshot = host.state().clone();

        assert!(matches!(guest.advance(0.1), Err(SyncError::NotAuthoritative)));
        let intent = PlacementIntent::new(CardId::new(1), 100.0, 600.0, Team::Blue);
        assert!(matches!(guest.apply_intent(&intent), Err(SyncError::NotAuthoritative)));
        assert!(matches!(host.adopt(snapshot), Err(SyncError::NotReplica)));
    }

    #[test]
    fn test_replica_follows_host() {
        let (mut host, mut guest) = pair();
        let card = host.state().deck[Team::Blue].hand[0];
        let wire = PlacementIntent::new(card, 100.0, 600.0, Team::Blue).encode().unwrap();
        let intent = PlacementIntent::decode(&wire).unwrap();

        host.apply_intent(&intent).unwrap();
        for _ in 0..20 {
            host.advance(0.1).unwrap();
        }
        guest.adopt(decode_snapshot(&encode_snapshot(host.state()).unwrap()).unwrap()).unwrap();
        assert_eq!(guest.state(), host.state());
    }

    #[test]
    fn test_rejected_intent_keeps_snapshot() {
        let (mut host, _) = pair();
        let before = host.state().clone();
        let card = before.deck[Team::Blue].hand[0];
        let intent = PlacementIntent::new(card, 100.0, 380.0, Team::Blue);
        assert!(matches!(host.apply_intent(&intent), Err(SyncError::Rejected(_))));
        assert_eq!(host.state(), &before);
    }
}
