//! Reducer - pure function: (state, action) -> Outcome

use crate::{
    action::Action,
    effect::{Effect, FetchKind},
    state::{AppState, Fetched},
};

/// What a reduction did: whether state changed, and what to do next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self { changed: true, effects: Vec::new() }
    }

    pub fn changed_with(effects: Vec<Effect>) -> Self {
        Self { changed: true, effects }
    }
}

pub fn reduce(state: &mut AppState, action: Action) -> Outcome {
    match action {
        // ===== Selection =====
        Action::SelectCity(city) => {
            if state.is_current_key(&city.key) {
                // Same city again: keep its data, don't refetch.
                state.selection = Some(city);
                return Outcome::unchanged();
            }

            state.clear_weather();
            let generation = state.next_generation();

            let effects: Vec<Effect> = if city.has_valid_key() {
                FetchKind::all()
                    .iter()
                    .map(|kind| Effect::fetch(*kind, city.key.clone(), generation))
                    .collect()
            } else {
                Vec::new()
            };

            state.selection = Some(city);
            Outcome::changed_with(effects)
        }

        Action::ClearSelection => {
            if state.selection.is_none() {
                return Outcome::unchanged();
            }
            state.selection = None;
            state.clear_weather();
            state.next_generation();
            Outcome::changed()
        }

        // ===== Fetch results =====
        Action::CurrentLoaded { key, generation, data } => {
            if !state.accepts(&key, generation) {
                return stale(FetchKind::Current, &key, generation);
            }
            state.current = Some(Fetched::new(key, data));
            Outcome::changed()
        }

        Action::ForecastLoaded { key, generation, data } => {
            if !state.accepts(&key, generation) {
                return stale(FetchKind::Forecast, &key, generation);
            }
            state.forecast = Some(Fetched::new(key, data));
            Outcome::changed()
        }

        Action::HourlyLoaded { key, generation, data } => {
            if !state.accepts(&key, generation) {
                return stale(FetchKind::Hourly, &key, generation);
            }
            state.hourly = Some(Fetched::new(key, data));
            Outcome::changed()
        }

        // ===== UI =====
        Action::ToggleUnit => {
            state.unit = state.unit.toggle();
            Outcome::changed()
        }
    }
}

fn stale(kind: FetchKind, key: &str, generation: u64) -> Outcome {
    tracing::warn!(%kind, key, generation, "discarding result from an outdated selection");
    Outcome::unchanged()
}
