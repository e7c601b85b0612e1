//! Store - the single action queue and state owner
//!
//! The store owns the [`AppState`] and the receiving half of the action
//! channel. Everything that happens in the app is an [`Action`] sent into
//! that channel; the store applies each one through the reducer, publishes
//! the new state snapshot, broadcasts the action to subscribers, and hands
//! it to the effect dispatcher. Screens never touch state directly: they
//! dispatch through a [`StoreHandle`] and observe through watch/broadcast
//! receivers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::timeout;

use stockpile_api::inventory::InventoryApi;
use stockpile_core::device::Notify;
use stockpile_core::prelude::*;

use crate::action::Action;
use crate::effects::{self, EffectContext};
use crate::reducer;
use crate::select::Selection;
use crate::state::AppState;

/// How long shutdown waits for in-flight effect tasks before aborting them.
const EFFECT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// The action-processing half of the store. Consumed by [`Store::run`].
pub struct Store<A> {
    /// Application state (the Model). Mutated only by the reducer.
    state: AppState,

    /// Receiving half of the action channel. The run loop drains this.
    action_rx: mpsc::Receiver<Action>,

    /// Context handed to effect tasks: API, notifier, state view, queue.
    ctx: EffectContext<A>,

    /// Publisher for state snapshots. One send per applied action.
    state_tx: watch::Sender<AppState>,

    /// Broadcaster for applied actions. Subscribers that lag lose the
    /// oldest entries, never the ordering.
    event_tx: broadcast::Sender<Action>,

    /// Shutdown signal. Flipped to `true` by [`StoreHandle::close`].
    shutdown_rx: watch::Receiver<bool>,

    /// In-flight effect tasks, joined during shutdown.
    effects: JoinSet<()>,
}

/// Cloneable front door to a running store.
#[derive(Clone)]
pub struct StoreHandle {
    action_tx: mpsc::Sender<Action>,
    state_rx: watch::Receiver<AppState>,
    event_tx: broadcast::Sender<Action>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl<A> Store<A>
where
    A: InventoryApi + Send + Sync + 'static,
{
    /// Create a store over an API client and a notification surface.
    ///
    /// Returns the store itself, to be driven by [`Store::run`] (usually
    /// inside `tokio::spawn`), and the handle the rest of the app keeps.
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notify>) -> (Self, StoreHandle) {
        let state = AppState::default();

        // Action channel (capacity 256). Senders back-pressure rather
        // than drop when the store falls behind.
        let (action_tx, action_rx) = mpsc::channel::<Action>(256);

        let (state_tx, state_rx) = watch::channel(state.clone());
        let (event_tx, _) = broadcast::channel(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let ctx = EffectContext::new(api, notifier, state_rx.clone(), action_tx.clone());

        let store = Self {
            state,
            action_rx,
            ctx,
            state_tx,
            event_tx: event_tx.clone(),
            shutdown_rx,
            effects: JoinSet::new(),
        };
        let handle = StoreHandle {
            action_tx,
            state_rx,
            event_tx,
            shutdown_tx: Arc::new(shutdown_tx),
        };
        (store, handle)
    }

    /// Drive the store until every handle is dropped or shutdown is
    /// signalled, then drain and clean up.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                action = self.action_rx.recv() => {
                    match action {
                        Some(action) => self.apply(action),
                        None => break,
                    }
                }
                // A dropped sender means every handle is gone; no close()
                // can arrive after that, so wind down.
                result = self.shutdown_rx.changed() => {
                    if result.is_err() || *self.shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        self.shutdown().await;
    }

    /// Apply one action: reduce, publish the snapshot, broadcast, then
    /// let the effect layer react. Effects see the post-reduce state.
    fn apply(&mut self, action: Action) {
        debug!(action = action.label(), "applying");
        reducer::reduce(&mut self.state, &action);
        self.state_tx.send_replace(self.state.clone());
        // Err here only means nobody is subscribed.
        let _ = self.event_tx.send(action.clone());
        effects::handle(action, &self.ctx, &mut self.effects);
    }

    /// Apply whatever was queued before the close, then wind down the
    /// effect tasks. Tasks still running after the timeout are aborted.
    async fn shutdown(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action);
        }

        let drain = async {
            while let Some(result) = self.effects.join_next().await {
                if let Err(err) = result {
                    if err.is_panic() {
                        warn!("effect task panicked during shutdown: {}", err);
                    }
                }
            }
        };
        if timeout(EFFECT_DRAIN_TIMEOUT, drain).await.is_err() {
            warn!(
                "effect tasks still running after {:?}, aborting",
                EFFECT_DRAIN_TIMEOUT
            );
        }
        self.effects.shutdown().await;
    }
}

impl StoreHandle {
    /// Queue an action for the store. Fails only once the store has
    /// stopped running.
    pub async fn dispatch(&self, action: impl Into<Action>) -> Result<()> {
        self.action_tx
            .send(action.into())
            .await
            .map_err(|_| Error::channel_send("store is closed"))
    }

    /// The most recently published state snapshot.
    pub fn state(&self) -> AppState {
        self.state_rx.borrow().clone()
    }

    /// A watch receiver over state snapshots, for screens that redraw
    /// on change.
    pub fn watch_state(&self) -> watch::Receiver<AppState> {
        self.state_rx.clone()
    }

    /// Subscribe to the applied-action stream.
    ///
    /// Subscribers that fall behind see `RecvError::Lagged` and lose the
    /// oldest actions; the store itself never blocks on a slow subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.event_tx.subscribe()
    }

    /// Observe one derived value, waking only when the projection changes.
    pub fn select<T, F>(&self, projector: F) -> Selection<T, F>
    where
        F: FnMut(&AppState) -> T,
        T: Clone + PartialEq,
    {
        Selection::new(self.state_rx.clone(), projector)
    }

    /// Signal the store to stop after draining what is already queued.
    pub fn close(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
