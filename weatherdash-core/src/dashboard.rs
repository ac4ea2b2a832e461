//! Dashboard runtime: owns `AppState`, feeds actions through the reducer and
//! runs the fetch effects it declares.
//!
//! Fetches are fire-and-forget tasks. Each one reports back through
//! `dispatch`, tagged with the key and selection generation it was issued
//! under, so a response that arrives after the user moved on (even back to
//! the same city) is dropped by the reducer instead of overwriting newer data.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    action::Action,
    effect::{Effect, FetchKind},
    model::City,
    provider::WeatherProvider,
    reducer::reduce,
    state::AppState,
    units::TemperatureUnit,
};

#[derive(Debug, Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    provider: Arc<dyn WeatherProvider>,
    state: RwLock<AppState>,
    revision: watch::Sender<u64>,
}

/// Fetch tasks started by one dispatch.
#[derive(Debug, Default)]
#[must_use = "dropping Pending detaches the fetches; call settle() to wait for them"]
pub struct Pending {
    handles: Vec<JoinHandle<()>>,
}

impl Pending {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait until every fetch has finished and applied (or dropped) its result.
    pub async fn settle(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "fetch task did not complete");
            }
        }
    }
}

impl Dashboard {
    pub fn new(provider: Arc<dyn WeatherProvider>, unit: TemperatureUnit) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            inner: Arc::new(Inner { provider, state: RwLock::new(AppState::new(unit)), revision }),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// Read state in place without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.read())
    }

    /// Revision counter that ticks whenever state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Apply an action and start whatever fetches it calls for.
    pub fn dispatch(&self, action: Action) -> Pending {
        let outcome = {
            let mut state = self.inner.state.write();
            reduce(&mut state, action)
        };

        if outcome.changed {
            self.inner.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
        }

        Pending { handles: outcome.effects.into_iter().map(|effect| self.spawn(effect)).collect() }
    }

    pub fn select_city(&self, city: City) -> Pending {
        tracing::info!(key = %city.key, city = %city.display_name(), "city selected");
        self.dispatch(Action::SelectCity(city))
    }

    pub fn clear_selection(&self) {
        let _ = self.dispatch(Action::ClearSelection);
    }

    pub fn toggle_unit(&self) -> TemperatureUnit {
        let _ = self.dispatch(Action::ToggleUnit);
        self.with_state(|s| s.unit)
    }

    /// Refetch current conditions for `key`. The result is kept only if `key`
    /// is still the selected city, under the same selection, when it arrives.
    pub fn fetch_weather_data(&self, key: &str) -> JoinHandle<()> {
        self.refetch(FetchKind::Current, key)
    }

    pub fn fetch_forecast(&self, key: &str) -> JoinHandle<()> {
        self.refetch(FetchKind::Forecast, key)
    }

    pub fn fetch_hourly_data(&self, key: &str) -> JoinHandle<()> {
        self.refetch(FetchKind::Hourly, key)
    }

    fn refetch(&self, kind: FetchKind, key: &str) -> JoinHandle<()> {
        let generation = self.with_state(|s| s.generation);
        self.spawn(Effect::fetch(kind, key, generation))
    }

    fn spawn(&self, effect: Effect) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.perform(effect).await })
    }

    async fn perform(&self, effect: Effect) {
        let Effect::Fetch { kind, key, generation } = effect;
        tracing::debug!(%kind, key = %key, generation, "fetching");

        let provider = &self.inner.provider;
        let result = match kind {
            FetchKind::Current => provider
                .current_conditions(&key)
                .await
                .map(|data| Action::CurrentLoaded { key: key.clone(), generation, data }),
            FetchKind::Forecast => provider
                .daily_forecast(&key)
                .await
                .map(|data| Action::ForecastLoaded { key: key.clone(), generation, data }),
            FetchKind::Hourly => provider
                .hourly_forecast(&key)
                .await
                .map(|data| Action::HourlyLoaded { key: key.clone(), generation, data }),
        };

        match result {
            Ok(action) => {
                let _ = self.dispatch(action);
            }
            Err(err) => {
                tracing::warn!(%kind, key = %key, error = %err, "fetch failed; keeping previous value");
            }
        }
    }
}
