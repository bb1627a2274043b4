use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::clock::Clock;
use crate::catalog::Catalog;
use crate::view::{MapMode, PlaybackSettings, ViewEvent, ViewState, ViewStateMachine};

/// View-state machine paired with the clock that drives its tick timer.
pub struct AtlasEngine<C: Clock> {
    machine: ViewStateMachine,
    clock: C,
    ticks_delivered: u64,
}

impl<C: Clock> AtlasEngine<C> {
    pub fn new(catalog: Arc<Catalog>, settings: PlaybackSettings, clock: C) -> Self {
        info!(
            dialects = catalog.len(),
            tick_ms = settings.tick_interval.as_millis() as u64,
            step = settings.step,
            "atlas engine created"
        );
        Self {
            machine: ViewStateMachine::new(catalog, settings),
            clock,
            ticks_delivered: 0,
        }
    }

    pub fn with_map_mode(mut self, mode: MapMode) -> Self {
        self.machine = self.machine.with_map_mode(mode);
        self
    }

    /// Deliver due ticks first so the event lands on up-to-date progress.
    pub fn dispatch(&mut self, event: ViewEvent) -> bool {
        let ticked = self.pump() > 0;
        let now = self.clock.now();
        debug!(?event, now_ms = now.as_millis() as u64, "dispatching view event");
        self.machine.apply(event, now) || ticked
    }

    pub fn pump(&mut self) -> usize {
        let fired = self.machine.advance(self.clock.now());
        self.ticks_delivered += fired as u64;
        fired
    }

    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.machine.next_tick_in(self.clock.now())
    }

    pub fn snapshot(&self) -> ViewState {
        self.machine.snapshot()
    }

    pub fn machine(&self) -> &ViewStateMachine {
        &self.machine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ticks_delivered(&self) -> u64 {
        self.ticks_delivered
    }
}
