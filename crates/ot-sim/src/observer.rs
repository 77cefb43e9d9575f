//! Simulation observer trait for progress reporting and rendering.

use ot_core::Tick;

use crate::World;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — frame logger
///
/// ```rust,ignore
/// struct FrameLogger;
///
/// impl SimObserver for FrameLogger {
///     fn on_frame(&mut self, tick: Tick, world: &World) {
///         for agent in world.agents.agent_ids() {
///             println!("{tick}: {} at {}", agent, world.agents.pos[agent.index()]);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's phases complete, with read-only access to
    /// the world.  This is the renderer's hook: positions, states, facing
    /// directions, and speech bubbles are all readable here, and nothing is
    /// writable.
    fn on_frame(&mut self, _tick: Tick, _world: &World) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
