#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn resolution system: one player step, then encounters, then the
//! victory check.
//!
//! The resolver never mutates the world. It reads immutable views and emits
//! the move, defeat and promotion commands for the host to apply before the
//! next turn.

use dungeon_doors_core::{
    CellCoord, Command, EntityId, EntitySnapshot, EntityView, Level, RoomView, TurnOutcome,
};
use dungeon_doors_system_pathfinding::Pathfinder;
use tracing::{debug, info, trace};

/// Phases of the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the next turn.
    Idle,
    /// A path toward the priority target was found this turn.
    PathFound,
    /// The last turn found no reachable target; the next turn retries.
    NoPath,
    /// Encounters in the player's room are being resolved.
    Combat,
    /// The game ended; further turns change nothing.
    GameOver {
        /// Whether the player survived and every hostile fell.
        won: bool,
    },
}

/// Advances the game one turn at a time.
#[derive(Debug)]
pub struct TurnResolver {
    pathfinder: Pathfinder,
    phase: TurnPhase,
    trail: Vec<TurnPhase>,
}

impl Default for TurnResolver {
    fn default() -> Self {
        Self {
            pathfinder: Pathfinder::new(),
            phase: TurnPhase::Idle,
            trail: Vec::new(),
        }
    }
}

impl TurnResolver {
    /// Creates a resolver in the idle phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase reached at the end of the most recent turn.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Phases the most recent turn passed through, in order. Empty when the
    /// turn was refused because the game had already ended.
    #[must_use]
    pub fn trail(&self) -> &[TurnPhase] {
        &self.trail
    }

    /// Plays one turn against the provided views, appending the resulting
    /// commands to `out`.
    ///
    /// The views must reflect every command emitted by earlier turns. Once
    /// the game is over the terminal outcome is repeated and no commands are
    /// emitted.
    pub fn advance_turn(
        &mut self,
        rooms: RoomView<'_>,
        entities: &EntityView,
        out: &mut Vec<Command>,
    ) -> TurnOutcome {
        self.trail.clear();
        if let TurnPhase::GameOver { won } = self.phase {
            return terminal_outcome(won);
        }

        let Some(player) = entities.player().copied() else {
            return self.finish(false);
        };
        if !player.alive {
            return self.finish(false);
        }

        let Some(path) = self
            .pathfinder
            .shortest_path_to_priority_target(rooms, entities)
        else {
            if let Some(outcome) = self.check_terminal(true, entities, &[]) {
                return outcome;
            }
            self.transition(TurnPhase::NoPath);
            return TurnOutcome::NoPath;
        };
        self.transition(TurnPhase::PathFound);

        let mut position = player.cell;
        if let Some(next) = path.first_step() {
            out.push(Command::MoveEntity {
                entity: player.id,
                to: next,
            });
            position = next;
        }

        self.transition(TurnPhase::Combat);
        let encounter = resolve_encounters(&player, position, entities, out);

        if let Some(outcome) =
            self.check_terminal(encounter.player_alive, entities, &encounter.defeated)
        {
            return outcome;
        }
        self.transition(TurnPhase::Idle);
        TurnOutcome::Continue
    }

    fn check_terminal(
        &mut self,
        player_alive: bool,
        entities: &EntityView,
        defeated: &[EntityId],
    ) -> Option<TurnOutcome> {
        let hostiles_remain = entities
            .targets()
            .any(|target| target.kind.requires_defeat() && !defeated.contains(&target.id));

        if player_alive && hostiles_remain {
            None
        } else {
            Some(self.finish(player_alive))
        }
    }

    fn finish(&mut self, won: bool) -> TurnOutcome {
        self.transition(TurnPhase::GameOver { won });
        info!(won, "game over");
        terminal_outcome(won)
    }

    fn transition(&mut self, next: TurnPhase) {
        trace!(from = ?self.phase, to = ?next, "turn phase");
        self.phase = next;
        self.trail.push(next);
    }
}

struct Encounter {
    player_alive: bool,
    defeated: Vec<EntityId>,
}

/// Resolves every alive target sharing `position` with the player, in
/// registry order. A stronger target defeats the player and ends resolution;
/// otherwise the target falls and the player gains a level.
fn resolve_encounters(
    player: &EntitySnapshot,
    position: CellCoord,
    entities: &EntityView,
    out: &mut Vec<Command>,
) -> Encounter {
    let mut level: Level = player.level;
    let mut defeated = Vec::new();

    for target in entities.targets().filter(|target| target.cell == position) {
        if target.level > level {
            debug!(
                target = target.id.get(),
                target_level = target.level.get(),
                player_level = level.get(),
                "player defeated"
            );
            out.push(Command::DefeatEntity { entity: player.id });
            return Encounter {
                player_alive: false,
                defeated,
            };
        }

        debug!(
            target = target.id.get(),
            kind = ?target.kind,
            player_level = level.get(),
            "target defeated"
        );
        out.push(Command::DefeatEntity { entity: target.id });
        out.push(Command::PromoteEntity { entity: player.id });
        level = level.promoted();
        defeated.push(target.id);
    }

    Encounter {
        player_alive: true,
        defeated,
    }
}

fn terminal_outcome(won: bool) -> TurnOutcome {
    if won {
        TurnOutcome::Won
    } else {
        TurnOutcome::Lost
    }
}
