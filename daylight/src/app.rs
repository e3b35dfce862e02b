//! Event/action/render loop
//!
//! 1. Terminal events are polled on a background task and mapped to actions
//! 2. Actions are serialised through the effect store
//! 3. Effects spawn keyed tasks that send their result action back
//! 4. The frame is redrawn only when the reducer reports a change

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tui_dispatch::{
    process_raw_event, spawn_event_poller, Component, DispatchResult, EffectStore, EventKind,
    RawEvent, Subscriptions, TaskManager,
};

use daylight_core::{DaylightCache, SunClient};

use crate::action::Action;
use crate::components::{Dashboard, DashboardProps};
use crate::effect::{handle_effect, Effect};
use crate::reducer::reducer;
use crate::state::{AppState, LOADING_ANIM_TICK_MS};

const POLL_TIMEOUT: Duration = Duration::from_millis(10);
const LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Owns the store, the action queue and the background work
pub struct DaylightApp<C> {
    store: EffectStore<AppState, Action, Effect>,
    cache: Arc<DaylightCache<C>>,
    tasks: TaskManager<Action>,
    subscriptions: Subscriptions<Action>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    dashboard: Dashboard,
}

impl<C: SunClient> DaylightApp<C> {
    pub fn new(state: AppState, cache: Arc<DaylightCache<C>>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStore::new(state, reducer),
            cache,
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            dashboard: Dashboard,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn cache(&self) -> &Arc<DaylightCache<C>> {
        &self.cache
    }

    /// Send an action into the queue
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    /// Run one action through the reducer and start its effects.
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, "dispatch");
        let DispatchResult { changed, effects } = self.store.dispatch(action);
        for effect in effects {
            handle_effect(&self.cache, effect, &mut self.tasks);
        }
        changed
    }

    /// Next queued action, waiting for background tasks if none is queued
    pub async fn next_action(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Map a terminal event to actions, plus whether to redraw regardless
    pub fn map_event(&mut self, event: &EventKind) -> (Vec<Action>, bool) {
        if let EventKind::Resize(..) = event {
            return (vec![], true);
        }

        let props = DashboardProps {
            state: self.store.state(),
            is_focused: true,
        };
        (self.dashboard.handle_event(event, props), false)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let props = DashboardProps {
            state: self.store.state(),
            is_focused: true,
        };
        self.dashboard.render(frame, area, props);
    }

    /// Run until a `Quit` action arrives
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        // Tick timer for loading animation
        self.subscriptions.interval(
            "tick",
            Duration::from_millis(LOADING_ANIM_TICK_MS),
            || Action::Tick,
        );

        // Fetch the initial selection
        self.enqueue(Action::DaylightFetch);

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, POLL_TIMEOUT, LOOP_SLEEP, cancel_token.clone());

        let mut should_render = true;
        let result = loop {
            if should_render {
                if let Err(e) = terminal.draw(|frame| {
                    let area = frame.area();
                    self.render(frame, area);
                }) {
                    break Err(e);
                }
                should_render = false;
            }

            tokio::select! {
                Some(raw) = event_rx.recv() => {
                    let (actions, needs_render) = self.map_event(&process_raw_event(raw));
                    should_render |= needs_render;
                    for action in actions {
                        self.enqueue(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        info!("quit requested");
                        break Ok(());
                    }
                    should_render |= self.dispatch(action);
                }

                else => {
                    break Ok(());
                }
            }
        };

        cancel_token.cancel();
        self.tasks.cancel_all();
        self.subscriptions.cancel_all();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daylight_core::testing::{london_solstice, CountingClient};
    use daylight_core::{CityRegistry, DaylightError, Selection};
    use tui_dispatch::testing::*;

    fn app(client: CountingClient) -> DaylightApp<CountingClient> {
        let cache = Arc::new(DaylightCache::new(CityRegistry::builtin(), client));
        DaylightApp::new(AppState::default(), cache)
    }

    fn solstice(city: &str) -> Selection {
        Selection::new(city, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
    }

    /// Wait for the result action, feed it back and return it
    async fn settle(app: &mut DaylightApp<CountingClient>) -> Action {
        let action = app.next_action().await.expect("action channel open");
        assert!(app.dispatch(action.clone()));
        action
    }

    #[tokio::test]
    async fn test_city_change_fetches_once_and_refresh_fetches_again() {
        let mut app = app(CountingClient::ok(london_solstice()));

        assert!(app.dispatch(Action::CityNext));
        let loaded = settle(&mut app).await;
        assert!(matches!(
            &loaded,
            Action::DaylightDidLoad(selection, Ok(_)) if *selection == solstice("Edinburgh")
        ));
        assert_eq!(app.cache().client().calls(), 1);
        assert!(!app.state().is_loading);
        assert!(app.action_rx.try_recv().is_err());

        assert!(app.dispatch(Action::DaylightRefresh));
        let reloaded = settle(&mut app).await;
        assert!(matches!(reloaded, Action::DaylightDidLoad(_, Ok(_))));
        assert_eq!(app.cache().client().calls(), 2);
    }

    #[tokio::test]
    async fn test_same_selection_does_not_fetch() {
        let mut app = app(CountingClient::ok(london_solstice()));

        assert!(!app.dispatch(Action::CitySelect("London".into())));
        assert!(!app.dispatch(Action::DateStep(0)));

        assert!(app.action_rx.try_recv().is_err());
        assert_eq!(app.cache().client().calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_reaches_state() {
        let err = DaylightError::Transport("connection refused".into());
        let mut app = app(CountingClient::failing(err.clone()));

        app.dispatch(Action::DaylightFetch);
        settle(&mut app).await;

        assert_eq!(app.state().current_outcome(), Some(&Err(err)));
    }

    #[test]
    fn test_map_event_resize_requests_render() {
        let mut app = app(CountingClient::ok(london_solstice()));

        let (actions, needs_render) = app.map_event(&EventKind::Resize(80, 24));
        actions.assert_empty();
        assert!(needs_render);

        let (actions, needs_render) = app.map_event(&EventKind::Key(key("j")));
        actions.assert_first(Action::CityNext);
        assert!(!needs_render);
    }

    #[test]
    fn test_render_dashboard() {
        let mut app = app(CountingClient::ok(london_solstice()));
        let mut render = RenderHarness::new(110, 30);

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            app.render(frame, area);
        });

        assert!(output.contains("London"));
    }
}
