//! Flint Runtime - Game loop infrastructure
//!
//! Provides the loop-side building blocks the buff engine plugs into:
//! - `GameClock` — deterministic game clock that publishes game time to a shared `ClockHandle`
//! - `TimeSource` — monotonic time read by cadence strategies
//! - `GameEvent` / `EventBus` — typed event queue for inter-system communication
//! - `RuntimeSystem` — trait for systems ticked by the game loop

mod clock;
mod event;
mod event_bus;
mod system;

pub use clock::{ClockHandle, GameClock, TimeSource};
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use system::RuntimeSystem;
