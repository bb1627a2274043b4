use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use swiss_dialects::catalog::{Catalog, Category};
use swiss_dialects::view::palette::region_color;
use swiss_dialects::view::{MapMode, PlaybackSettings, ViewEvent, ViewState, ViewStateMachine};

const T0: Duration = Duration::ZERO;

fn machine() -> ViewStateMachine {
    let catalog = Arc::new(Catalog::builtin().expect("built-in catalog"));
    ViewStateMachine::new(catalog, PlaybackSettings::default())
}

fn apply_all(machine: &mut ViewStateMachine, events: &[ViewEvent]) {
    for event in events {
        machine.apply(event.clone(), T0);
    }
}

#[test]
fn selecting_any_dialect_resets_playback() {
    let mut machine = machine();
    let ids: Vec<String> = machine
        .catalog()
        .dialects()
        .iter()
        .map(|d| d.id.clone())
        .collect();
    for id in ids {
        machine.apply(ViewEvent::TogglePlayback, T0);
        machine.apply(ViewEvent::PlaybackTick, T0);
        machine.apply(ViewEvent::SelectDialect(id.clone()), T0);
        let state = machine.state();
        assert_eq!(state.active_dialect_id.as_deref(), Some(id.as_str()));
        assert!(!state.playback.is_playing);
        assert_eq!(state.playback.progress, 0.0);
    }
}

#[test]
fn toggle_alternates_starting_from_stopped() {
    let mut machine = machine();
    machine.apply(ViewEvent::SelectDialect("ti".into()), T0);
    let mut expected = false;
    assert_eq!(machine.state().playback.is_playing, expected);
    for _ in 0..9 {
        machine.apply(ViewEvent::TogglePlayback, T0);
        expected = !expected;
        assert_eq!(machine.state().playback.is_playing, expected);
    }
}

#[test]
fn stopping_keeps_progress_until_next_start() {
    let mut machine = machine();
    apply_all(
        &mut machine,
        &[
            ViewEvent::SelectDialect("be".into()),
            ViewEvent::TogglePlayback,
            ViewEvent::PlaybackTick,
            ViewEvent::PlaybackTick,
            ViewEvent::TogglePlayback,
        ],
    );
    assert_relative_eq!(machine.state().playback.progress, 3.0);
    machine.apply(ViewEvent::TogglePlayback, T0);
    assert_eq!(machine.state().playback.progress, 0.0);
}

#[test]
fn ticks_increase_strictly_then_stop_at_100() {
    let mut machine = machine();
    apply_all(
        &mut machine,
        &[
            ViewEvent::SelectDialect("gr".into()),
            ViewEvent::TogglePlayback,
        ],
    );
    let mut last = machine.state().playback.progress;
    let mut ticks = 0;
    while machine.state().playback.is_playing {
        machine.apply(ViewEvent::PlaybackTick, T0);
        let progress = machine.state().playback.progress;
        assert!(progress > last, "progress must strictly increase");
        assert!(progress <= 100.0);
        last = progress;
        ticks += 1;
    }
    assert_eq!(ticks, 67);
    assert_eq!(machine.state().playback.progress, 100.0);

    let finished = machine.snapshot();
    assert!(!machine.apply(ViewEvent::PlaybackTick, T0));
    assert_eq!(machine.snapshot(), finished);
}

#[test]
fn category_or_dialect_change_stops_playback_immediately() {
    let mut machine = machine();
    apply_all(
        &mut machine,
        &[
            ViewEvent::SelectDialect("zh".into()),
            ViewEvent::TogglePlayback,
            ViewEvent::PlaybackTick,
            ViewEvent::SetCategory(Category::Proverb),
        ],
    );
    assert!(!machine.state().playback.is_playing);
    assert_eq!(machine.state().playback.progress, 0.0);
    assert_eq!(machine.state().active_category, Category::Proverb);

    apply_all(
        &mut machine,
        &[
            ViewEvent::TogglePlayback,
            ViewEvent::PlaybackTick,
            ViewEvent::SelectDialect("ge".into()),
        ],
    );
    assert!(!machine.state().playback.is_playing);
    assert_eq!(machine.state().playback.progress, 0.0);
    assert!(machine.timer().is_none());
}

#[test]
fn end_to_end_weather_sample_plays_to_completion() {
    let mut machine = machine();
    assert_eq!(machine.state(), &ViewState::default());

    machine.apply(ViewEvent::SelectDialect("zh".into()), T0);
    assert_eq!(machine.state().active_dialect_id.as_deref(), Some("zh"));

    machine.apply(ViewEvent::SetCategory(Category::Weather), T0);
    assert_eq!(machine.state().active_category, Category::Weather);
    assert_eq!(machine.state().playback.progress, 0.0);

    machine.apply(ViewEvent::TogglePlayback, T0);
    assert!(machine.state().playback.is_playing);

    for _ in 0..67 {
        machine.apply(ViewEvent::PlaybackTick, T0);
    }
    assert_eq!(machine.state().playback.progress, 100.0);
    assert!(!machine.state().playback.is_playing);
    assert_eq!(
        machine.active_sample().map(|s| s.translation.as_str()),
        Some("It is terribly hot today.")
    );
}

#[test]
fn map_mode_round_trip_restores_colors() {
    let mut machine = machine();
    let colors = |machine: &ViewStateMachine| -> Vec<_> {
        machine
            .catalog()
            .regions()
            .iter()
            .map(|r| region_color(&r.id, r.language, machine.state().map_mode))
            .collect()
    };
    let administrative = colors(&machine);
    machine.apply(ViewEvent::SetMapMode(MapMode::Physical), T0);
    let physical = colors(&machine);
    assert_ne!(administrative, physical);
    machine.apply(ViewEvent::SetMapMode(MapMode::Administrative), T0);
    assert_eq!(colors(&machine), administrative);
}

#[test]
fn deselect_clears_selection_and_keeps_map_mode() {
    let mut machine = machine();
    apply_all(
        &mut machine,
        &[
            ViewEvent::SetMapMode(MapMode::Physical),
            ViewEvent::SelectDialect("vs".into()),
            ViewEvent::SetHover(Some("Deutschschweiz".into())),
            ViewEvent::TogglePlayback,
            ViewEvent::DeselectDialect,
        ],
    );
    let state = machine.state();
    assert!(state.active_dialect_id.is_none());
    assert_eq!(state.map_mode, MapMode::Physical);
    assert_eq!(state.hovered_region_label.as_deref(), Some("Deutschschweiz"));
    assert!(!state.playback.is_playing);
    assert!(machine.timer().is_none());

    machine.apply(ViewEvent::DeselectDialect, T0);
    assert!(machine.state().active_dialect_id.is_none());
}

#[test]
fn hover_sets_and_clears_label() {
    let mut machine = machine();
    machine.apply(ViewEvent::SetHover(Some("Ticino".into())), T0);
    assert_eq!(machine.state().hovered_region_label.as_deref(), Some("Ticino"));
    machine.apply(ViewEvent::SetHover(None), T0);
    assert!(machine.state().hovered_region_label.is_none());
}
