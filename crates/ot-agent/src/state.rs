//! Behavior-state and orientation tags.

use std::fmt;

/// The per-agent finite-state-machine tag.
///
/// `Working`, `Talking`, `Resting`, `AtCoffee`, and `AtWindow` are all
/// "engaged in place" states that expire after a fixed duration; they differ
/// only in duration, flavor lines, and how the agent got there.  The
/// higher-priority *servicing* condition is not a state: it is a separate
/// flag on the store that overrides whatever state the agent is in (see
/// `AgentStore::servicing`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    /// Standing still, counting down to the next destination decision.
    #[default]
    Idle,
    /// Following a planned path, one cell per tick.
    Walking,
    /// Seated at the desk, reviewing data.
    Working,
    /// Face-to-face conversation with the agent's current partner.
    Talking,
    /// Taking a breather at the break table.
    Resting,
    /// Standing at the coffee machine.
    AtCoffee,
    /// Looking out of a window.
    AtWindow,
}

impl BehaviorState {
    /// `true` for the states an agent occupies in place for a fixed
    /// duration before dropping back to `Idle`.
    pub fn is_engaged_in_place(self) -> bool {
        matches!(
            self,
            BehaviorState::Working
                | BehaviorState::Talking
                | BehaviorState::Resting
                | BehaviorState::AtCoffee
                | BehaviorState::AtWindow
        )
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BehaviorState::Idle => "idle",
            BehaviorState::Walking => "walking",
            BehaviorState::Working => "working",
            BehaviorState::Talking => "talking",
            BehaviorState::Resting => "resting",
            BehaviorState::AtCoffee => "at-coffee",
            BehaviorState::AtWindow => "at-window",
        };
        f.write_str(s)
    }
}

/// Which way an agent's sprite faces.  The renderer reads this; the core
/// only cares that a serviced agent holds `Up` (facing its screen) once
/// seated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// The direction from `from` toward the axis-adjacent cell `to`.
    /// Falls back to `Down` for non-adjacent pairs.
    pub fn toward(from: ot_core::Cell, to: ot_core::Cell) -> Facing {
        if to.x > from.x {
            Facing::Right
        } else if to.x < from.x {
            Facing::Left
        } else if to.y > from.y {
            Facing::Down
        } else if to.y < from.y {
            Facing::Up
        } else {
            Facing::Down
        }
    }

    pub fn opposite(self) -> Facing {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}
