//! View-state machine: everything the map screen can change, and how.

pub mod palette;
pub mod playback;

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, Category, DialectRecord, Sample};
use crate::error::ParseNameError;

pub use playback::{Playback, PlaybackSettings, TickTimer};

/// Whether region fills encode language (administrative) or terrain (physical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    #[default]
    Administrative,
    Physical,
}

impl MapMode {
    pub const ALL: [MapMode; 2] = [MapMode::Administrative, MapMode::Physical];

    pub fn label(self) -> &'static str {
        match self {
            MapMode::Administrative => "Administrative",
            MapMode::Physical => "Physical",
        }
    }
}

impl Display for MapMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MapMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapMode::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::new("map mode", s))
    }
}

/// Snapshot of all interaction state, read by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub active_dialect_id: Option<String>,
    pub map_mode: MapMode,
    pub active_category: Category,
    pub playback: Playback,
    pub hovered_region_label: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_dialect_id: None,
            map_mode: MapMode::Administrative,
            active_category: Category::Greeting,
            playback: Playback::default(),
            hovered_region_label: None,
        }
    }
}

/// Discrete inputs from the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SelectDialect(String),
    /// Close the detail panel. Also force-stops playback and resets progress
    /// to 0, cancelling the tick timer.
    DeselectDialect,
    SetMapMode(MapMode),
    SetCategory(Category),
    SetHover(Option<String>),
    TogglePlayback,
    PlaybackTick,
}

impl FromStr for ViewEvent {
    type Err = ParseNameError;

    /// Parses `select:<id>`, `deselect`, `mode:<mode>`, `category:<name>`,
    /// `hover[:<label>]`, `toggle` and `tick`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb.trim(), Some(arg)),
            None => (s.trim(), None),
        };
        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("select", Some(id)) if !id.trim().is_empty() => {
                Ok(ViewEvent::SelectDialect(id.trim().to_string()))
            }
            ("deselect", None) => Ok(ViewEvent::DeselectDialect),
            ("mode", Some(mode)) => Ok(ViewEvent::SetMapMode(mode.parse()?)),
            ("category", Some(category)) => Ok(ViewEvent::SetCategory(category.parse()?)),
            ("hover", None) => Ok(ViewEvent::SetHover(None)),
            ("hover", Some(label)) if label.is_empty() => Ok(ViewEvent::SetHover(None)),
            ("hover", Some(label)) => Ok(ViewEvent::SetHover(Some(label.to_string()))),
            ("toggle", None) => Ok(ViewEvent::TogglePlayback),
            ("tick", None) => Ok(ViewEvent::PlaybackTick),
            _ => Err(ParseNameError::new("event", s)),
        }
    }
}

/// Owns the [`ViewState`] and the playback tick timer.
///
/// Every event has a defined outcome. Events that make no sense in the
/// current state (unknown dialect, category change with nothing selected,
/// ticks while stopped) leave the state untouched.
#[derive(Debug)]
pub struct ViewStateMachine {
    catalog: Arc<Catalog>,
    settings: PlaybackSettings,
    state: ViewState,
    timer: Option<TickTimer>,
    timers_started: u64,
}

impl ViewStateMachine {
    pub fn new(catalog: Arc<Catalog>, settings: PlaybackSettings) -> Self {
        Self {
            catalog,
            settings,
            state: ViewState::default(),
            timer: None,
            timers_started: 0,
        }
    }

    pub fn with_map_mode(mut self, mode: MapMode) -> Self {
        self.state.map_mode = mode;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    pub fn active_dialect(&self) -> Option<&DialectRecord> {
        self.state
            .active_dialect_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn active_sample(&self) -> Option<&Sample> {
        self.active_dialect()
            .map(|dialect| dialect.sample(self.state.active_category))
    }

    pub fn timer(&self) -> Option<&TickTimer> {
        self.timer.as_ref()
    }

    /// Number of tick timers started so far in this session.
    pub fn timers_started(&self) -> u64 {
        self.timers_started
    }

    /// Apply one event at time `now`. Returns whether the state changed.
    ///
    /// Beyond clearing the selection, [`ViewEvent::DeselectDialect`]
    /// force-stops playback, so no timer outlives the detail panel.
    pub fn apply(&mut self, event: ViewEvent, now: Duration) -> bool {
        let before = self.state.clone();
        let was_playing = before.playback.is_playing;
        match event {
            ViewEvent::SelectDialect(id) => {
                if self.catalog.contains(&id) {
                    self.state.active_dialect_id = Some(id);
                    self.state.playback.reset();
                }
            }
            ViewEvent::DeselectDialect => {
                self.state.active_dialect_id = None;
                self.state.playback.reset();
            }
            ViewEvent::SetMapMode(mode) => self.state.map_mode = mode,
            ViewEvent::SetCategory(category) => {
                if self.state.active_dialect_id.is_some() {
                    self.state.active_category = category;
                    self.state.playback.reset();
                }
            }
            ViewEvent::SetHover(label) => self.state.hovered_region_label = label,
            ViewEvent::TogglePlayback => {
                if self.state.active_dialect_id.is_some() {
                    self.state.playback.toggle();
                }
            }
            ViewEvent::PlaybackTick => {
                self.state.playback.tick(self.settings.step);
            }
        }
        self.sync_timer(was_playing, now);
        let changed = self.state != before;
        if changed {
            debug!(
                dialect = ?self.state.active_dialect_id,
                category = %self.state.active_category,
                mode = %self.state.map_mode,
                playing = self.state.playback.is_playing,
                progress = self.state.playback.progress,
                "view state updated"
            );
        }
        changed
    }

    /// Deliver every tick the timer owes at `now`. Returns the tick count.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while self.timer.as_mut().is_some_and(|timer| timer.fire(now)) {
            self.apply(ViewEvent::PlaybackTick, now);
            fired += 1;
        }
        fired
    }

    pub fn next_tick_in(&self, now: Duration) -> Option<Duration> {
        self.timer.as_ref().map(|timer| timer.remaining(now))
    }

    fn sync_timer(&mut self, was_playing: bool, now: Duration) {
        let is_playing = self.state.playback.is_playing;
        if is_playing && !was_playing {
            self.timers_started += 1;
            self.timer = Some(TickTimer::start(
                self.timers_started,
                self.settings.tick_interval,
                now,
            ));
            debug!(generation = self.timers_started, "playback timer started");
        } else if !is_playing && self.timer.take().is_some() {
            debug!(generation = self.timers_started, "playback timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ViewStateMachine {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        ViewStateMachine::new(catalog, PlaybackSettings::default())
    }

    #[test]
    fn starts_with_defaults() {
        let machine = machine();
        assert_eq!(machine.state(), &ViewState::default());
        assert!(machine.timer().is_none());
    }

    #[test]
    fn unknown_dialect_is_ignored() {
        let mut machine = machine();
        assert!(!machine.apply(ViewEvent::SelectDialect("xx".into()), Duration::ZERO));
        assert!(machine.state().active_dialect_id.is_none());
    }

    #[test]
    fn category_without_dialect_is_ignored() {
        let mut machine = machine();
        machine.apply(ViewEvent::SetCategory(Category::Food), Duration::ZERO);
        assert_eq!(machine.state().active_category, Category::Greeting);
    }

    #[test]
    fn toggle_without_dialect_is_ignored() {
        let mut machine = machine();
        machine.apply(ViewEvent::TogglePlayback, Duration::ZERO);
        assert!(!machine.state().playback.is_playing);
        assert_eq!(machine.timers_started(), 0);
    }

    #[test]
    fn active_sample_follows_category() {
        let mut machine = machine();
        machine.apply(ViewEvent::SelectDialect("gr".into()), Duration::ZERO);
        machine.apply(ViewEvent::SetCategory(Category::Greeting), Duration::ZERO);
        assert_eq!(machine.active_sample().unwrap().text, "Allegra!");
    }

    #[test]
    fn advance_delivers_owed_ticks_and_stops_timer() {
        let mut machine = machine();
        machine.apply(ViewEvent::SelectDialect("zh".into()), Duration::ZERO);
        machine.apply(ViewEvent::TogglePlayback, Duration::ZERO);
        assert_eq!(machine.advance(Duration::from_millis(120)), 2);
        assert_eq!(machine.state().playback.progress, 3.0);
        assert_eq!(machine.advance(Duration::from_secs(60)), 65);
        assert_eq!(machine.state().playback.progress, 100.0);
        assert!(!machine.state().playback.is_playing);
        assert!(machine.timer().is_none());
    }

    #[test]
    fn parses_textual_events() {
        assert_eq!(
            "select:zh".parse::<ViewEvent>().unwrap(),
            ViewEvent::SelectDialect("zh".into())
        );
        assert_eq!(
            "category:weather".parse::<ViewEvent>().unwrap(),
            ViewEvent::SetCategory(Category::Weather)
        );
        assert_eq!(
            "mode:Physical".parse::<ViewEvent>().unwrap(),
            ViewEvent::SetMapMode(MapMode::Physical)
        );
        assert_eq!(
            "hover:Ticino".parse::<ViewEvent>().unwrap(),
            ViewEvent::SetHover(Some("Ticino".into()))
        );
        assert_eq!("hover".parse::<ViewEvent>().unwrap(), ViewEvent::SetHover(None));
        assert!("category:sports".parse::<ViewEvent>().is_err());
        assert!("select:".parse::<ViewEvent>().is_err());
        assert!("jump".parse::<ViewEvent>().is_err());
    }
}
