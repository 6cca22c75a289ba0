//! Load lifecycle: fetch a payload, mount a renderer, tear it down again.

use std::time::Instant;

use arbor::{Activation, Clock, IdAllocator, NodeId, RendererConfig, Surface, TreeNode, TreeRenderer};
use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::Result;

/// Id of the surface the renderer is mounted on.
pub const SURFACE_ID: &str = "vis_1";

/// Where the controller is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded; "Analyze" is offered.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// A tree is mounted; "Reset" is offered.
    Done,
}

/// Results delivered back to the UI thread.
#[derive(Debug)]
pub enum Message {
    Loaded(Result<TreeNode>),
    Back,
}

/// One line of feedback for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(text) | Status::Error(text) => text,
        }
    }
}

/// Read a payload from a file or an `http(s)://` URL.
pub async fn fetch(resource: &str) -> Result<TreeNode> {
    let body = if resource.starts_with("http://") || resource.starts_with("https://") {
        reqwest::get(resource)
            .await?
            .error_for_status()?
            .text()
            .await?
    } else {
        tokio::fs::read_to_string(resource).await?
    };
    Ok(TreeNode::from_json(&body)?)
}

/// Owns the load state and the mounted renderer.
pub struct Controller<C: Clock + Clone + 'static> {
    state: LoadState,
    resource: String,
    config: RendererConfig,
    surface: Surface,
    clock: C,
    runtime: Handle,
    renderer: Option<TreeRenderer>,
    status: Option<Status>,
    loading_since: Option<Instant>,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
}

impl<C: Clock + Clone + 'static> Controller<C> {
    pub fn new(
        resource: impl Into<String>,
        config: RendererConfig,
        surface: Surface,
        clock: C,
        runtime: Handle,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: LoadState::Idle,
            resource: resource.into(),
            config,
            surface,
            clock,
            runtime,
            renderer: None,
            status: None,
            loading_since: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn renderer(&self) -> Option<&TreeRenderer> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut TreeRenderer> {
        self.renderer.as_mut()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// When the current fetch started, while one is in flight.
    pub fn loading_since(&self) -> Option<Instant> {
        self.loading_since
    }

    /// Start fetching the resource. Returns false if the request was
    /// rejected because a fetch is already running or a tree is mounted.
    pub fn analyze(&mut self) -> bool {
        match self.state {
            LoadState::Loading => {
                warn!("Busy collecting data, ignoring analyze request");
                false
            }
            LoadState::Done => {
                debug!("Tree already mounted, reset before analyzing again");
                false
            }
            LoadState::Idle => {
                info!("Collecting data from {}", self.resource);
                self.state = LoadState::Loading;
                self.loading_since = Some(self.clock.now());
                self.status = Some(Status::Info("Collecting Data...".to_string()));

                let resource = self.resource.clone();
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let result = fetch(&resource).await;
                    let _ = tx.send(Message::Loaded(result));
                });
                true
            }
        }
    }

    /// Drop the mounted tree and go back to `Idle`.
    pub fn reset(&mut self) {
        if self.state == LoadState::Loading {
            warn!("Busy collecting data, ignoring reset request");
            return;
        }
        if self.renderer.take().is_some() {
            info!("Cleared surface '{}'", self.surface.id);
        }
        self.state = LoadState::Idle;
        self.status = None;
    }

    /// The primary button: analyze when idle, reset when done.
    pub fn press_primary(&mut self) {
        match self.state {
            LoadState::Idle | LoadState::Loading => {
                self.analyze();
            }
            LoadState::Done => self.reset(),
        }
    }

    /// Resize the surface, re-rendering the mounted tree.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.surface.width == width && self.surface.height == height {
            return;
        }
        self.surface.width = width;
        self.surface.height = height;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
    }

    /// Forward a node activation to the mounted renderer.
    pub fn activate(&mut self, id: NodeId) -> Activation {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.on_node_activate(id),
            None => Activation::Ignored,
        }
    }

    /// Apply every message that has arrived. Returns true if anything
    /// changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            self.handle(message);
            changed = true;
        }
        changed
    }

    /// Wait for the next message and apply it.
    pub async fn next_message(&mut self) {
        if let Some(message) = self.rx.recv().await {
            self.handle(message);
        }
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Loaded(result) => self.finish_loading(result),
            Message::Back => {
                info!("Returning to start");
                self.renderer = None;
                self.state = LoadState::Idle;
                self.status = Some(Status::Info("Returned to start".to_string()));
            }
        }
    }

    fn finish_loading(&mut self, result: Result<TreeNode>) {
        self.loading_since = None;
        match result {
            Ok(data) => {
                let mut renderer = TreeRenderer::new(
                    &data,
                    self.surface.clone(),
                    self.config.clone(),
                    IdAllocator::new(),
                    self.clock.clone(),
                );
                let tx = self.tx.clone();
                renderer.set_back_handler(move || {
                    let _ = tx.send(Message::Back);
                });
                self.renderer = Some(renderer);
                self.state = LoadState::Done;
                self.status = None;
            }
            Err(e) => {
                error!("Failed to load {}: {}", self.resource, e);
                self.state = LoadState::Idle;
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}
