//! Chat runtime executor

use super::{ClientEvent, Command, Snapshot};
use crate::backend::{Backend, BackendErrorKind, QueryRequest};
use crate::conversation::ConversationStore;
use crate::input::InputBuffer;
use crate::state_machine::{transition, ChatState, Effect, Event};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Owns the session state and executes the effects of each transition.
///
/// Runs as a single task: every mutation happens between two awaits of the
/// main loop, so appends never interleave.
pub struct ChatRuntime<B: Backend + 'static> {
    state: ChatState,
    store: ConversationStore,
    input: InputBuffer,
    backend: Arc<B>,
    command_rx: mpsc::Receiver<Command>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<ClientEvent>,
}

impl<B: Backend + 'static> ChatRuntime<B> {
    pub(crate) fn new(
        backend: Arc<B>,
        command_rx: mpsc::Receiver<Command>,
        broadcast_tx: broadcast::Sender<ClientEvent>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(8);
        Self {
            state: ChatState::Idle,
            store: ConversationStore::new(broadcast_tx.clone()),
            input: InputBuffer::new(),
            backend,
            command_rx,
            event_rx,
            event_tx,
            broadcast_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Starting chat runtime");

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = self.event_rx.recv() => self.process_event(event),
            }
        }

        if self.state.is_pending() {
            tracing::debug!("Stopping with a query still pending");
        }
        tracing::info!(messages = self.store.len(), "Chat runtime stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetText(text) => {
                self.input.set_text(text);
                self.notify(ClientEvent::InputChanged {
                    text: self.input.text().to_string(),
                });
            }
            Command::Submit { text: Some(text) } => self.process_event(Event::submit(text)),
            Command::Submit { text: None } => {
                if !self.input.can_submit(self.state.is_pending()) {
                    tracing::debug!(
                        pending = self.state.is_pending(),
                        "Ignoring submit of buffer"
                    );
                    return;
                }
                let text = self.input.consume();
                self.process_event(Event::submit(text));
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(Snapshot {
                    messages: self.store.all().to_vec(),
                    pending: self.state.is_pending(),
                    input: self.input.text().to_string(),
                });
            }
        }
    }

    fn process_event(&mut self, event: Event) {
        // Rejections are silent: the send affordance is disabled, not erroring
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(state = self.state.name(), error = %e, "Ignoring event");
                return;
            }
        };

        tracing::debug!(
            from = self.state.name(),
            to = result.new_state.name(),
            "State transition"
        );
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message } => self.store.append(message),
            Effect::ClearInput => {
                self.input.clear();
                self.notify(ClientEvent::InputChanged {
                    text: String::new(),
                });
            }
            Effect::NotifyPending { pending } => {
                self.notify(ClientEvent::PendingChanged { pending });
            }
            Effect::DispatchQuery { query } => self.dispatch_query(query),
        }
    }

    /// Send the query in the background. Exactly one settlement event comes
    /// back, whatever happens to the call.
    fn dispatch_query(&self, query: String) {
        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            tracing::info!(query_len = query.len(), "Dispatching query");
            let request = QueryRequest::new(query);

            // Inner task so a panicking backend still settles the query
            let call = tokio::spawn(async move { backend.query(&request).await });

            let event = match call.await {
                Ok(Ok(response)) => Event::completed(response.into_reply()),
                Ok(Err(e)) => Event::failed(e.message, e.kind),
                Err(e) => {
                    tracing::error!(error = %e, "Query task aborted");
                    Event::failed(e.to_string(), BackendErrorKind::Unknown)
                }
            };

            if event_tx.send(event).await.is_err() {
                tracing::debug!("Runtime stopped before query settled");
            }
        });
    }

    fn notify(&self, event: ClientEvent) {
        let _ = self.broadcast_tx.send(event);
    }
}
