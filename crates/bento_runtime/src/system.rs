//! Systems and schedules.
//!
//! A system is a bundle of lifecycle hooks. A [`Schedule`] calls one hook on
//! each of its systems in insertion order and stops at the first failure.
//! Systems that need to change the storage while iterating it record the
//! changes in a [`CommandBuffer`](bento_storage::CommandBuffer) and flush it
//! before returning.

use std::fmt;

use bento_foundation::{ErrorContext, Result};
use bento_storage::Storage;
use tracing::{debug, warn};

use crate::context::TickContext;

/// Lifecycle callbacks run against a storage.
///
/// Every hook defaults to a no-op, so a system implements only what it needs.
pub trait System<C = TickContext> {
    /// Name used in logs and error context.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once before the first update.
    ///
    /// # Errors
    ///
    /// Any error stops the schedule.
    fn start(&mut self, _storage: &mut Storage, _ctx: &C) -> Result<()> {
        Ok(())
    }

    /// Called once per tick.
    ///
    /// # Errors
    ///
    /// Any error stops the schedule.
    fn update(&mut self, _storage: &mut Storage, _ctx: &C) -> Result<()> {
        Ok(())
    }

    /// Called once after the last update.
    ///
    /// # Errors
    ///
    /// Any error stops the schedule.
    fn stop(&mut self, _storage: &mut Storage, _ctx: &C) -> Result<()> {
        Ok(())
    }
}

/// Which lifecycle hook to dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// [`System::start`]
    Start,
    /// [`System::update`]
    Update,
    /// [`System::stop`]
    Stop,
}

impl Hook {
    /// Returns the hook's method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Update => "update",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of systems.
pub struct Schedule<C = TickContext> {
    systems: Vec<Box<dyn System<C>>>,
}

impl<C> Default for Schedule<C> {
    fn default() -> Self {
        Self {
            systems: Vec::new(),
        }
    }
}

impl<C> Schedule<C> {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schedule::add`].
    #[must_use]
    pub fn with_system(mut self, system: impl System<C> + 'static) -> Self {
        self.add(system);
        self
    }

    /// Appends a system; it runs after every system already added.
    pub fn add(&mut self, system: impl System<C> + 'static) {
        self.systems.push(Box::new(system));
    }

    /// Returns the number of systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns true if the schedule has no systems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Returns the system names in dispatch order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Dispatches [`System::start`].
    ///
    /// # Errors
    ///
    /// Returns the first system error; later systems are not called.
    pub fn start(&mut self, storage: &mut Storage, ctx: &C) -> Result<()> {
        self.dispatch(Hook::Start, storage, ctx)
    }

    /// Dispatches [`System::update`].
    ///
    /// # Errors
    ///
    /// Returns the first system error; later systems are not called.
    pub fn update(&mut self, storage: &mut Storage, ctx: &C) -> Result<()> {
        self.dispatch(Hook::Update, storage, ctx)
    }

    /// Dispatches [`System::stop`].
    ///
    /// # Errors
    ///
    /// Returns the first system error; later systems are not called.
    pub fn stop(&mut self, storage: &mut Storage, ctx: &C) -> Result<()> {
        self.dispatch(Hook::Stop, storage, ctx)
    }

    /// Calls `hook` on every system in order.
    ///
    /// # Errors
    ///
    /// Returns the first system error. Errors without context are tagged
    /// with `<system>.<hook>`.
    pub fn dispatch(&mut self, hook: Hook, storage: &mut Storage, ctx: &C) -> Result<()> {
        for system in &mut self.systems {
            let result = match hook {
                Hook::Start => system.start(storage, ctx),
                Hook::Update => system.update(storage, ctx),
                Hook::Stop => system.stop(storage, ctx),
            };
            if let Err(mut err) = result {
                warn!(system = system.name(), %hook, error = %err, "system failed");
                if err.context.is_none() {
                    err = err.with_context(
                        ErrorContext::new().with_operation(format!("{}.{hook}", system.name())),
                    );
                }
                return Err(err);
            }
        }
        debug!(%hook, systems = self.systems.len(), "dispatched hook");
        Ok(())
    }
}

impl<C> fmt::Debug for Schedule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("systems", &self.names())
            .finish()
    }
}
