//! The dispatching engine.
//!
//! `Engine` owns the current phase and context, feeds events through
//! [`transition`](super::transition), and hands out immutable
//! [`Snapshot`]s.
//!
//! ## Ignored Events
//!
//! [`Engine::dispatch`] silently ignores events whose guard fails and
//! returns the unchanged snapshot; callers inspect the snapshot rather
//! than expect an error. [`Engine::try_dispatch`] exposes the
//! [`Rejection`] for callers and tests that want to know why.
//!
//! ## Listeners
//!
//! Listeners registered with [`Engine::subscribe`] see every snapshot
//! produced by an accepted event, in order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::event::Event;
use super::phase::Phase;
use super::rejection::Rejection;
use super::transition::transition;
use crate::core::{EngineConfig, EntryKind, GameContext};

/// Immutable view of the engine after an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current phase; serializes as its path.
    pub value: Phase,
    /// Full game context.
    pub context: GameContext,
}

impl Snapshot {
    /// Phase path, e.g. `"day.vote"`.
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.value.path()
    }

    /// Phase matches a path or prefix.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        self.value.matches(pattern)
    }
}

type Listener = Box<dyn FnMut(&Snapshot)>;

/// The storyteller's rules engine.
pub struct Engine {
    phase: Phase,
    context: GameContext,
    config: EngineConfig,
    listeners: Vec<Listener>,
}

impl Engine {
    /// Engine in setup with an empty circle.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            phase: Phase::Setup,
            context: GameContext::new(&config),
            config,
            listeners: Vec::new(),
        }
    }

    /// Resume from a snapshot, e.g. a restored save.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot, config: EngineConfig) -> Self {
        Self {
            phase: snapshot.value,
            context: snapshot.context,
            config,
            listeners: Vec::new(),
        }
    }

    /// Apply an event, ignoring it if it is not allowed right now.
    pub fn dispatch(&mut self, event: Event) -> Snapshot {
        match self.try_dispatch(event) {
            Ok(snapshot) => snapshot,
            Err(rejection) => {
                debug!(phase = %self.phase, %rejection, "event ignored");
                self.snapshot()
            }
        }
    }

    /// Apply an event, reporting why it was refused.
    ///
    /// On `Err` the engine is unchanged and listeners are not called.
    pub fn try_dispatch(&mut self, event: Event) -> Result<Snapshot, Rejection> {
        let (phase, context) = transition(self.phase, &self.context, &event, &self.config)?;

        if phase != self.phase {
            info!(from = %self.phase, to = %phase, event = event.name(), "phase change");
        }
        self.trace_new_entries(&event, &context);

        self.phase = phase;
        self.context = context;

        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
        Ok(snapshot)
    }

    /// Apply events in order, ignoring refused ones.
    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = Event>) -> Snapshot {
        for event in events {
            self.dispatch(event);
        }
        self.snapshot()
    }

    fn trace_new_entries(&self, event: &Event, next: &GameContext) {
        for entry in next.history.iter().skip(self.context.history.len()) {
            match entry.kind {
                EntryKind::Death | EntryKind::Execution | EntryKind::Transform | EntryKind::GameEnd => {
                    info!(day = entry.day, night = entry.night, "{}", entry.message);
                }
                _ => debug!(day = entry.day, night = entry.night, "{}", entry.message),
            }
        }

        if let (Event::UseAbility { player_id, .. }, Some(result)) = (event, &next.last_ability) {
            if !result.success {
                warn!(player = %player_id, error = ?result.error, "ability failed");
            }
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            value: self.phase,
            context: self.context.clone(),
        }
    }

    /// Register a listener for new snapshots.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current context.
    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
