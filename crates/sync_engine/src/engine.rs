use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use sync_core::{
    update_store, Command, EntityState, Event, Operation, Resource, Store, StoreEvent, SyncError,
    TransportFailureKind,
};
use sync_logging::{sync_debug, sync_info, sync_warn};
use tokio::sync::{mpsc, oneshot, watch};

use crate::config::{ConfigError, SyncConfig};
use crate::pipeline::{build_request, execute, CacheBuster};
use crate::transport::{ReqwestTransport, Transport};

type Reply = oneshot::Sender<Result<(), SyncError>>;

/// Who asked for an operation.
enum Origin {
    Caller(Reply),
    /// Follow-up of a mutation; its pending phase is already applied.
    Refresh,
}

enum EngineMessage {
    Dispatch { command: Command, reply: Reply },
    WaitIdle(oneshot::Sender<()>),
}

struct Settlement {
    event: StoreEvent,
    reply: Option<Reply>,
}

/// Read-only view of every entity state, published after each transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreSnapshot {
    pub store: Store,
    /// Requests sent and not yet settled, follow-up refreshes included.
    pub in_flight: usize,
}

/// Resolves once the dispatched operation settles.
///
/// `Ok` when fulfilled, the rejection otherwise. Follow-up refreshes are not
/// awaited; use [`SyncClient::wait_idle`] for that.
#[derive(Debug)]
pub struct PendingHandle {
    rx: oneshot::Receiver<Result<(), SyncError>>,
}

impl Future for PendingHandle {
    type Output = Result<(), SyncError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|settled| settled.unwrap_or_else(|_| Err(engine_stopped())))
    }
}

fn engine_stopped() -> SyncError {
    SyncError::transport(TransportFailureKind::Network, "sync engine stopped")
}

/// Command and read interface of a running engine. Cheap to clone.
///
/// The engine task is the only writer of the store; transitions run one at a
/// time, in the order their triggers reach it.
#[derive(Debug, Clone)]
pub struct SyncClient {
    cmd_tx: mpsc::UnboundedSender<EngineMessage>,
    state_rx: watch::Receiver<StoreSnapshot>,
}

impl SyncClient {
    /// Starts an engine over HTTP. Must be called inside a tokio runtime.
    pub fn spawn(config: SyncConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(
        config: SyncConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(StoreSnapshot::default());

        sync_info!(
            "Sync engine started base_url={} crawlers={} filters={}",
            config.base_url,
            config.crawlers_path,
            config.filters_path
        );
        let engine = Engine {
            config,
            transport,
            store: Store::new(),
            in_flight: 0,
            cache_buster: CacheBuster::default(),
            settle_tx,
            idle_waiters: Vec::new(),
            outbox: Vec::new(),
            state_tx,
        };
        tokio::spawn(engine.run(cmd_rx, settle_rx));

        Ok(Self { cmd_tx, state_rx })
    }

    pub fn dispatch(&self, command: impl Into<Command>) -> PendingHandle {
        let (reply, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(EngineMessage::Dispatch {
            command: command.into(),
            reply,
        });
        PendingHandle { rx }
    }

    pub fn fetch_list<T: Resource>(&self, query: sync_core::QueryParams) -> PendingHandle {
        self.dispatch(T::command(Operation::FetchList(query)))
    }

    pub fn reset<T: Resource>(&self) -> PendingHandle {
        self.dispatch(T::command(Operation::Reset))
    }

    pub fn current_state<T: Resource>(&self) -> EntityState<T> {
        T::state(&self.state_rx.borrow().store).clone()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state_rx.clone()
    }

    /// Waits until everything dispatched so far, and every refresh it
    /// triggered, has settled.
    pub async fn wait_idle(&self) {
        let (waiter, idle) = oneshot::channel();
        if self.cmd_tx.send(EngineMessage::WaitIdle(waiter)).is_ok() {
            let _ = idle.await;
        }
    }
}

struct Engine {
    config: SyncConfig,
    transport: Arc<dyn Transport>,
    store: Store,
    in_flight: usize,
    cache_buster: CacheBuster,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    idle_waiters: Vec<oneshot::Sender<()>>,
    /// Replies held back until the snapshot they describe is published.
    outbox: Vec<(Reply, Result<(), SyncError>)>,
    state_tx: watch::Sender<StoreSnapshot>,
}

impl Engine {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<EngineMessage>,
        mut settle_rx: mpsc::UnboundedReceiver<Settlement>,
    ) {
        let mut accepting = true;
        loop {
            tokio::select! {
                message = cmd_rx.recv(), if accepting => match message {
                    Some(EngineMessage::Dispatch { command, reply }) => {
                        self.dispatch(command, Origin::Caller(reply));
                    }
                    Some(EngineMessage::WaitIdle(waiter)) => self.idle_waiters.push(waiter),
                    None => accepting = false,
                },
                Some(settlement) = settle_rx.recv() => self.settle(settlement),
            }
            self.publish();
            if !accepting && self.in_flight == 0 {
                break;
            }
        }
        sync_debug!("Sync engine stopped");
    }

    fn dispatch(&mut self, command: Command, origin: Origin) {
        match command {
            Command::Crawler(operation) => self.start(operation, origin),
            Command::Filters(operation) => self.start(operation, origin),
        }
    }

    fn start<T: Resource>(&mut self, operation: Operation<T>, origin: Origin) {
        let kind = operation.kind();
        sync_debug!("Dispatch {}/{}", T::KIND, kind);
        let (reply, pending_applied) = match origin {
            Origin::Caller(reply) => (Some(reply), false),
            Origin::Refresh => (None, true),
        };

        let plan = match operation.plan() {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                self.apply(T::event(Event::Reset));
                self.respond(reply, Ok(()));
                return;
            }
            Err(err) => {
                sync_warn!("{}/{} refused before sending: {}", T::KIND, kind, err);
                self.respond(reply, Err(err));
                return;
            }
        };
        let request = match build_request(&self.config, &plan, &mut self.cache_buster) {
            Ok(request) => request,
            Err(err) => {
                sync_warn!("{}/{} refused before sending: {}", T::KIND, kind, err);
                if pending_applied {
                    self.apply(T::event(Event::rejected(kind, err.clone())));
                }
                self.respond(reply, Err(err));
                return;
            }
        };

        if !pending_applied {
            self.apply(T::event(Event::pending(kind)));
        }
        self.in_flight += 1;

        let transport = Arc::clone(&self.transport);
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let event = execute::<T>(transport.as_ref(), kind, request).await;
            let _ = settle_tx.send(Settlement {
                event: T::event(event),
                reply,
            });
        });
    }

    fn settle(&mut self, settlement: Settlement) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let resource = settlement.event.resource();
        let outcome = settlement.event.outcome().unwrap_or(Ok(()));
        match &outcome {
            Ok(()) => sync_debug!("{} operation fulfilled", resource),
            Err(err) => sync_warn!("{} operation rejected: {}", resource, err),
        }
        self.apply(settlement.event);
        self.respond(settlement.reply, outcome);
    }

    fn apply(&mut self, event: StoreEvent) {
        let store = std::mem::take(&mut self.store);
        let (store, follow_ups) = update_store(store, event);
        self.store = store;
        for command in follow_ups {
            sync_debug!("Refreshing {} collection after mutation", command.resource());
            self.dispatch(command, Origin::Refresh);
        }
    }

    fn respond(&mut self, reply: Option<Reply>, outcome: Result<(), SyncError>) {
        if let Some(reply) = reply {
            self.outbox.push((reply, outcome));
        }
    }

    fn publish(&mut self) {
        self.state_tx.send_replace(StoreSnapshot {
            store: self.store.clone(),
            in_flight: self.in_flight,
        });
        for (reply, outcome) in self.outbox.drain(..) {
            let _ = reply.send(outcome);
        }
        if self.in_flight == 0 {
            for waiter in self.idle_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }
}
