// App state and main event loop.
// Wires the store subscription, keyboard input, and the in-app console together.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;

use crate::api::{NewPost, Post};
use crate::context::AppContext;
use crate::error::Result;
use crate::store::{CacheSlice, PostStore, Subscription};
use crate::ui;

/// Messages kept in the in-app console ring.
const MAX_CONSOLE_MESSAGES: usize = 200;

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// One entry in the in-app console.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub timestamp: DateTime<Utc>,
    pub level: ConsoleLevel,
    pub text: String,
}

impl ConsoleMessage {
    fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Info, text)
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Warn, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ConsoleLevel::Error, text)
    }
}

/// Events delivered to the render loop from spawned operations.
enum AppEvent {
    StoreChanged(CacheSlice),
    Log(ConsoleMessage),
}

/// Hardcoded create payload for the add action.
fn sample_post() -> NewPost {
    NewPost::new(Some(2), "poster", "me")
}

/// Hardcoded update payload for the update action.
fn sample_update() -> Post {
    Post {
        id: 2,
        title: "Updated".to_string(),
        author: "me Updated".to_string(),
    }
}

/// Id targeted by the sample delete action.
const SAMPLE_DELETE_ID: u64 = 2;

/// Main application state.
pub struct App {
    /// Last snapshot of the posts cache slice.
    pub slice: CacheSlice,
    /// Selection state for the posts list.
    pub list_state: ListState,
    /// In-app console ring, newest last.
    pub console: VecDeque<ConsoleMessage>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    store: Arc<PostStore>,
    handle: tokio::runtime::Handle,
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    _subscription: Subscription,
}

impl App {
    /// Build the view against an already-constructed context. Registers the
    /// store listener; it is unregistered when the `App` is dropped.
    pub fn new(ctx: &AppContext) -> Self {
        let (tx, rx) = mpsc::channel();
        let store = ctx.store().clone();

        let sub_tx = tx.clone();
        let subscription = store.subscribe(move |slice| {
            let _ = sub_tx.send(AppEvent::StoreChanged(slice.clone()));
        });

        Self {
            slice: store.snapshot(),
            list_state: ListState::default(),
            console: VecDeque::new(),
            show_help: false,
            should_quit: false,
            store,
            handle: ctx.handle(),
            tx,
            rx,
            _subscription: subscription,
        }
    }

    /// Main event loop. Kicks off the initial list fetch, then alternates
    /// between drawing, polling input, and draining operation results.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.spawn_reload();
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            self.drain_events();
        }
        Ok(())
    }

    /// Posts from the last known list, empty until the first fetch settles.
    pub fn posts(&self) -> &[Post] {
        self.slice
            .query
            .data()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Base URL of the backend, for the header line.
    pub fn base_url(&self) -> &str {
        self.store.base_url()
    }

    /// Handle keyboard events. Mutation keys use the sample payloads and
    /// return immediately; results arrive through the event channel.
    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                if self.show_help {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        _ => self.show_help = false,
                    }
                    return Ok(());
                }
                match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('?') => self.show_help = true,
                    KeyCode::Char('r') => self.spawn_reload(),
                    KeyCode::Char('a') => self.spawn_create(),
                    KeyCode::Char('u') => self.spawn_update(),
                    KeyCode::Char('d') => self.spawn_delete(),
                    KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Drain completed operation events without blocking the render loop.
    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                AppEvent::StoreChanged(slice) => {
                    self.slice = slice;
                    self.reconcile_selection();
                }
                AppEvent::Log(message) => self.push_console(message),
            }
        }
    }

    /// Append to the console ring, dropping the oldest entry when full.
    fn push_console(&mut self, message: ConsoleMessage) {
        if self.console.len() == MAX_CONSOLE_MESSAGES {
            self.console.pop_front();
        }
        self.console.push_back(message);
    }

    /// Keep the selection valid after the list changes underneath it.
    fn reconcile_selection(&mut self) {
        let len = self.posts().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0).min(len - 1);
        self.list_state.select(Some(selected));
    }

    fn select_next(&mut self) {
        let len = self.posts().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.posts().is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    /// Refetch the posts list. State transitions arrive via the subscription.
    fn spawn_reload(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            if let Err(err) = store.reload().await {
                let _ = tx.send(AppEvent::Log(ConsoleMessage::error(format!(
                    "reload failed: {err}"
                ))));
            }
        });
    }

    /// Create the sample post, then refetch the now-stale list.
    fn spawn_create(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            match store.create(sample_post()).await {
                Ok(post) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::info(format!(
                        "created post {}",
                        post.id
                    ))));
                    reload_after_mutation(&store, &tx).await;
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::error(format!(
                        "create failed: {err}"
                    ))));
                }
            }
        });
    }

    /// Update the sample post, then refetch the now-stale list.
    fn spawn_update(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            match store.update(sample_update()).await {
                Ok(post) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::info(format!(
                        "updated post {}",
                        post.id
                    ))));
                    reload_after_mutation(&store, &tx).await;
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::error(format!(
                        "update failed: {err}"
                    ))));
                }
            }
        });
    }

    /// Delete the sample post, then refetch the now-stale list.
    fn spawn_delete(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            match store.delete(SAMPLE_DELETE_ID).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::info(format!(
                        "deleted post {SAMPLE_DELETE_ID}"
                    ))));
                    reload_after_mutation(&store, &tx).await;
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::Log(ConsoleMessage::error(format!(
                        "delete failed: {err}"
                    ))));
                }
            }
        });
    }
}

/// Mutations do not refetch on their own; the view triggers the reload once
/// the mutation has settled successfully.
async fn reload_after_mutation(store: &PostStore, tx: &mpsc::Sender<AppEvent>) {
    if let Err(err) = store.reload().await {
        let _ = tx.send(AppEvent::Log(ConsoleMessage::warn(format!(
            "mutation applied, but reload failed: {err}"
        ))));
    }
}
