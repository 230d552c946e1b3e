//! Presentation sinks
//!
//! The core never reads positions back from the presentation layer; it only
//! tells it what exists and where.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle the render sink hands out for a created element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

/// Kinds of element the core asks the render sink to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Vehicle,
    CaveWall,
    GapObstacle,
}

/// Creates, positions and removes on-screen elements
pub trait RenderSink {
    fn create(&mut self, kind: EntityKind, size: Vec2) -> EntityHandle;
    fn move_to(&mut self, handle: EntityHandle, x: f32, y: f32);
    fn destroy(&mut self, handle: EntityHandle);
}

/// Shows the current score
pub trait ScoreSink {
    fn display_score(&mut self, value: u32);
}

/// Shows or hides the "paused" indicator
pub trait PauseIndicator {
    fn toggle_pause_indicator(&mut self);
}

/// Everything the game drives
pub trait Presenter: RenderSink + ScoreSink + PauseIndicator {}

impl<T: RenderSink + ScoreSink + PauseIndicator> Presenter for T {}

/// A live element as the headless presenter sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub kind: EntityKind,
    pub size: Vec2,
    pub pos: Vec2,
}

/// Presenter that keeps the scene in memory
///
/// Used by the command-line runner and by tests.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    elements: HashMap<EntityHandle, Element>,
    next_handle: u32,
    /// Every value passed to `display_score`, oldest first
    pub scores: Vec<u32>,
    pub pause_visible: bool,
    pub created: usize,
    pub destroyed: usize,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, handle: EntityHandle) -> Option<&Element> {
        self.elements.get(&handle)
    }

    pub fn live(&self) -> usize {
        self.elements.len()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.elements.values().filter(|e| e.kind == kind).count()
    }

    pub fn displayed_score(&self) -> Option<u32> {
        self.scores.last().copied()
    }
}

impl RenderSink for HeadlessPresenter {
    fn create(&mut self, kind: EntityKind, size: Vec2) -> EntityHandle {
        self.next_handle += 1;
        let handle = EntityHandle(self.next_handle);
        self.elements.insert(
            handle,
            Element {
                kind,
                size,
                pos: Vec2::ZERO,
            },
        );
        self.created += 1;
        handle
    }

    fn move_to(&mut self, handle: EntityHandle, x: f32, y: f32) {
        match self.elements.get_mut(&handle) {
            Some(element) => element.pos = Vec2::new(x, y),
            None => log::warn!("move_to on unknown element {handle:?}"),
        }
    }

    fn destroy(&mut self, handle: EntityHandle) {
        if self.elements.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

impl ScoreSink for HeadlessPresenter {
    fn display_score(&mut self, value: u32) {
        self.scores.push(value);
    }
}

impl PauseIndicator for HeadlessPresenter {
    fn toggle_pause_indicator(&mut self) {
        self.pause_visible = !self.pause_visible;
    }
}
