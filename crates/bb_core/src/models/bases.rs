use super::events::Base;
use super::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Runners on first, second and third.
///
/// At most one runner per base and no runner on two bases; every mutation asserts this.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Bases([Option<PlayerId>; 3]);

impl Bases {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_runners(first: Option<PlayerId>, second: Option<PlayerId>, third: Option<PlayerId>) -> Self {
        let bases = Self([first, second, third]);
        bases.assert_consistent();
        bases
    }

    pub fn runner(&self, base: Base) -> Option<&PlayerId> {
        match base {
            Base::Home => None,
            b => self.0[b.index()].as_ref(),
        }
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.runner(base).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|r| r.is_some()).count()
    }

    /// Occupied bases from third down to first, the order runners must be moved in
    /// so nobody is overtaken.
    pub fn occupied_lead_first(&self) -> Vec<(Base, PlayerId)> {
        (0..3)
            .rev()
            .filter_map(|i| self.0[i].clone().map(|id| (Base::from_index(i), id)))
            .collect()
    }

    pub fn place(&mut self, base: Base, runner: PlayerId) {
        assert!(base != Base::Home, "cannot place a runner at home");
        assert!(
            self.0[base.index()].is_none(),
            "{} is already occupied by {:?}",
            base.label(),
            self.0[base.index()]
        );
        assert!(
            !self.0.iter().flatten().any(|r| r == &runner),
            "runner {runner} is already on base"
        );
        self.0[base.index()] = Some(runner);
    }

    pub fn remove(&mut self, base: Base) -> Option<PlayerId> {
        match base {
            Base::Home => None,
            b => self.0[b.index()].take(),
        }
    }

    pub fn clear(&mut self) {
        self.0 = Default::default();
    }

    pub fn assert_consistent(&self) {
        let runners: Vec<&PlayerId> = self.0.iter().flatten().collect();
        for (i, a) in runners.iter().enumerate() {
            for b in runners.iter().skip(i + 1) {
                assert!(a != b, "runner {a} occupies two bases");
            }
        }
    }

    /// Number of bases occupied consecutively starting at first; these runners are forced
    /// when the batter is awarded first or reaches it.
    pub fn forced_chain_len(&self) -> usize {
        self.0.iter().take_while(|r| r.is_some()).count()
    }

    pub fn as_array(&self) -> &[Option<PlayerId>; 3] {
        &self.0
    }
}
