//! Host-side session: owns the world, feeds the turn system and tracks which
//! screen the front end is on.

use anyhow::{bail, Result};
use dungeon_doors_core::{CellCoord, Command, Event, Rotation, TurnOutcome};
use dungeon_doors_system_pathfinding::{Pathfinder, TargetPath};
use dungeon_doors_system_turn::TurnResolver;
use dungeon_doors_world::{self as world, query, LayoutError, World};

/// Screen the front end should present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Rotations and turns are accepted.
    Playing,
    /// The game ended; only the result banner remains.
    Over { won: bool },
}

/// A single loaded dungeon and the state machine driving it.
///
/// Rotations and turns take `&mut self`, so a rotation can never interleave
/// with a turn in progress.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    resolver: TurnResolver,
    pathfinder: Pathfinder,
    screen: Screen,
    turns: u32,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn load(source: &str) -> Result<Self, LayoutError> {
        Ok(Self {
            world: World::from_layout(source)?,
            resolver: TurnResolver::new(),
            pathfinder: Pathfinder::new(),
            screen: Screen::Playing,
            turns: 0,
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn screen(&self) -> Screen {
        self.screen
    }

    pub(crate) fn turns(&self) -> u32 {
        self.turns
    }

    /// Turns one room, rejecting the request once the game is over.
    pub(crate) fn rotate(&mut self, cell: CellCoord, rotation: Rotation) -> Result<()> {
        if let Screen::Over { .. } = self.screen {
            bail!("the game is over; rotations are no longer accepted");
        }

        self.events.clear();
        world::apply(
            &mut self.world,
            Command::RotateRoom { cell, rotation },
            &mut self.events,
        );
        if self
            .events
            .iter()
            .any(|event| matches!(event, Event::RotationRejected { .. }))
        {
            bail!(
                "there is no room at ({}, {})",
                cell.column(),
                cell.row()
            );
        }
        Ok(())
    }

    /// Plays one turn and applies its commands before returning.
    pub(crate) fn advance_turn(&mut self) -> TurnOutcome {
        self.commands.clear();
        let outcome = self.resolver.advance_turn(
            query::room_view(&self.world),
            &query::entity_view(&self.world),
            &mut self.commands,
        );

        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        if let Screen::Playing = self.screen {
            self.turns = self.turns.saturating_add(1);
        }
        self.screen = match outcome {
            TurnOutcome::Won => Screen::Over { won: true },
            TurnOutcome::Lost => Screen::Over { won: false },
            TurnOutcome::Continue | TurnOutcome::NoPath => self.screen,
        };
        outcome
    }

    /// Every target the player could currently walk to, in discovery order.
    pub(crate) fn reachable_targets(&mut self) -> Vec<TargetPath> {
        self.pathfinder.reachable_targets(
            query::room_view(&self.world),
            &query::entity_view(&self.world),
        )
    }
}
