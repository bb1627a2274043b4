//! Single-owner runtime for the view state.
//!
//! One thread owns the [`AtlasEngine`]; the UI sends events through an
//! [`AtlasController`] and reads [`ViewState`] snapshots back. The thread
//! sleeps until either a command arrives or the next playback tick is due,
//! so only one timer ever drives the progress bar.

pub mod clock;
pub mod engine;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::RuntimeError;
use crate::view::{MapMode, PlaybackSettings, ViewEvent, ViewState};

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::AtlasEngine;

/// Called on the runtime thread after each published snapshot.
pub type SnapshotWaker = Box<dyn Fn() + Send>;

enum AtlasCommand {
    Dispatch(ViewEvent),
    SetWaker(SnapshotWaker),
    Shutdown,
}

#[derive(Clone)]
pub struct AtlasController {
    tx: Sender<AtlasCommand>,
}

impl AtlasController {
    pub fn send(&self, event: ViewEvent) -> Result<(), RuntimeError> {
        self.tx
            .send(AtlasCommand::Dispatch(event))
            .map_err(|_| RuntimeError::Disconnected)
    }

    /// Install a hook the runtime calls after every snapshot it sends, so a
    /// UI blocked on input can redraw.
    pub fn set_waker(&self, waker: impl Fn() + Send + 'static) -> Result<(), RuntimeError> {
        self.tx
            .send(AtlasCommand::SetWaker(Box::new(waker)))
            .map_err(|_| RuntimeError::Disconnected)
    }

    pub fn shutdown(&self) -> Result<(), RuntimeError> {
        self.tx
            .send(AtlasCommand::Shutdown)
            .map_err(|_| RuntimeError::Disconnected)
    }
}

pub struct AtlasRuntime {
    catalog: Arc<Catalog>,
    settings: PlaybackSettings,
    controller: AtlasController,
    updates: Receiver<ViewState>,
    initial: ViewState,
    join: Option<JoinHandle<()>>,
    pending: RefCell<VecDeque<ViewState>>,
}

impl AtlasRuntime {
    pub fn spawn(
        catalog: Arc<Catalog>,
        settings: PlaybackSettings,
        map_mode: MapMode,
    ) -> Result<Self, RuntimeError> {
        let engine = AtlasEngine::new(catalog.clone(), settings, SystemClock::new())
            .with_map_mode(map_mode);
        let initial = engine.snapshot();
        let (command_tx, command_rx) = channel();
        let (update_tx, update_rx) = channel();
        let join = thread::Builder::new()
            .name("atlas-runtime".to_string())
            .spawn(move || {
                EngineRunner {
                    engine,
                    waker: None,
                }
                .run(command_rx, update_tx)
            })?;
        info!(?map_mode, "atlas runtime thread spawned");
        Ok(Self {
            catalog,
            settings,
            controller: AtlasController { tx: command_tx },
            updates: update_rx,
            initial,
            join: Some(join),
            pending: RefCell::new(VecDeque::new()),
        })
    }

    pub fn controller(&self) -> AtlasController {
        self.controller.clone()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    pub fn initial_snapshot(&self) -> ViewState {
        self.initial.clone()
    }

    pub fn try_recv(&self) -> Option<ViewState> {
        self.extend_pending();
        self.pending.borrow_mut().pop_front()
    }

    pub fn drain_snapshots(&self) -> Vec<ViewState> {
        self.extend_pending();
        self.pending.borrow_mut().drain(..).collect()
    }

    fn extend_pending(&self) {
        let mut pending = self.pending.borrow_mut();
        while let Ok(snapshot) = self.updates.try_recv() {
            pending.push_back(snapshot);
        }
    }
}

impl Drop for AtlasRuntime {
    fn drop(&mut self) {
        let _ = self.controller.shutdown();
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("atlas runtime thread panicked");
            }
        }
    }
}

struct EngineRunner {
    engine: AtlasEngine<SystemClock>,
    waker: Option<SnapshotWaker>,
}

impl EngineRunner {
    fn run(mut self, commands: Receiver<AtlasCommand>, updates: Sender<ViewState>) {
        info!("atlas runtime running; emitting initial snapshot");
        let _ = updates.send(self.engine.snapshot());
        loop {
            let changed = match self.next_command(&commands) {
                Some(AtlasCommand::Dispatch(event)) => self.engine.dispatch(event),
                Some(AtlasCommand::SetWaker(waker)) => {
                    debug!("snapshot waker installed");
                    self.waker = Some(waker);
                    false
                }
                Some(AtlasCommand::Shutdown) => {
                    info!("received shutdown command");
                    break;
                }
                None => self.engine.pump() > 0,
            };
            if !changed {
                continue;
            }
            if updates.send(self.engine.snapshot()).is_err() {
                debug!("snapshot receiver dropped");
                break;
            }
            if let Some(wake) = &self.waker {
                wake();
            }
        }
        info!(
            ticks = self.engine.ticks_delivered(),
            "atlas runtime thread exiting"
        );
    }

    /// Block until a command arrives; while playing, wake up for the next tick.
    fn next_command(&self, commands: &Receiver<AtlasCommand>) -> Option<AtlasCommand> {
        match self.engine.time_until_next_tick() {
            Some(wait) => match commands.recv_timeout(wait) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => Some(AtlasCommand::Shutdown),
            },
            None => Some(commands.recv().unwrap_or(AtlasCommand::Shutdown)),
        }
    }
}
