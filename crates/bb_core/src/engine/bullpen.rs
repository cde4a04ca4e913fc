//! Bullpen Manager
//!
//! One per team. The starter pitches until their game pitch count passes their stamina; then
//! the next arm in the queue comes in. The queue is the relievers in random order with
//! closers appended last, fixed once at game start.

use crate::error::RosterError;
use crate::models::{PitcherRole, PitchingProfile, Player, PlayerId, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// A pitcher together with their (validated) pitching profile.
#[derive(Debug, Clone, Copy)]
pub struct Arm<'a> {
    pub player: &'a Player,
    pub profile: &'a PitchingProfile,
}

impl<'a> Arm<'a> {
    fn from_player(player: &'a Player) -> Result<Self, RosterError> {
        let profile = player
            .pitching
            .as_ref()
            .ok_or_else(|| RosterError::MissingPitchingProfile { player: player.name.clone() })?;
        Ok(Self { player, profile })
    }

    pub fn id(&self) -> &'a PlayerId {
        &self.player.id
    }
}

#[derive(Debug, Clone)]
pub struct Bullpen<'a> {
    arms: Vec<Arm<'a>>,
    active: usize,
    queue: VecDeque<usize>,
    used: Vec<usize>,
}

impl<'a> Bullpen<'a> {
    /// Starter first, relievers shuffled with `rng`, closers last.
    pub fn new<R: Rng + ?Sized>(team: &'a Team, rng: &mut R) -> Result<Self, RosterError> {
        let arms = team
            .pitchers
            .iter()
            .map(Arm::from_player)
            .collect::<Result<Vec<_>, _>>()?;

        let starter = arms
            .iter()
            .position(|a| a.profile.role == PitcherRole::Starter)
            .ok_or_else(|| RosterError::NoStarter { team: team.name.clone() })?;

        let mut relievers: Vec<usize> = (0..arms.len())
            .filter(|&i| i != starter && arms[i].profile.role != PitcherRole::Closer)
            .collect();
        relievers.shuffle(rng);
        let closers = (0..arms.len()).filter(|&i| arms[i].profile.role == PitcherRole::Closer);

        let queue: VecDeque<usize> = relievers.into_iter().chain(closers).collect();
        Ok(Self { arms, active: starter, queue, used: vec![starter] })
    }

    pub fn active(&self) -> Arm<'a> {
        self.arms[self.active]
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Bullpen order still available, next arm first.
    pub fn queue(&self) -> impl Iterator<Item = &PlayerId> + '_ {
        self.queue.iter().map(|&i| &self.arms[i].player.id)
    }

    /// Bring in the next arm if the active one is past their stamina. Called once per
    /// at-bat for the fielding team only. Returns the new pitcher on a change.
    pub fn check_fatigue(&mut self, pitch_count: u32) -> Option<Arm<'a>> {
        if pitch_count <= self.active().profile.stamina {
            return None;
        }
        let next = self.queue.pop_front()?;
        self.active = next;
        self.used.push(next);
        Some(self.arms[next])
    }

    /// Pitchers in order of appearance.
    pub fn used(&self) -> Vec<PlayerId> {
        self.used.iter().map(|&i| self.arms[i].player.id.clone()).collect()
    }
}
