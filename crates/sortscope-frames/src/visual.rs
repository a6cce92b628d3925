//! Visual state machine for the circle renderer.
//!
//! Each input element becomes an [`Entity`] that owns its decorations. A slot
//! table maps screen position to entity, so a swap relocates entities rather
//! than relabelling slots and every decoration travels with its entity.

use crate::{Frame, FrameError};
use serde::{Deserialize, Serialize};
use sortscope_core::{Effect, Focus, Span};
use std::fmt::Debug;

/// Stable identity of an entity: the element's index in the original input.
pub type EntityId = usize;

/// One drawable element and its decorations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Original index of the element.
    pub id: EntityId,
    /// Display text (the element's `Debug` form).
    pub label: String,
    /// Highlighted by the latest `focus`.
    pub focused: bool,
    /// Drawn with the "about to exchange" treatment.
    pub exchanging: bool,
    /// Inside the active working range.
    pub active: bool,
}

/// Everything the renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    frame_index: usize,
    slots: Vec<EntityId>,
    entities: Vec<Entity>,
    markers: Option<(usize, usize)>,
    caption: String,
}

impl VisualState {
    /// Initial layout: entity `k` at slot `k`, all active, nothing highlighted.
    #[must_use]
    pub fn from_values<T: Debug>(values: &[T]) -> Self {
        let entities: Vec<Entity> = values
            .iter()
            .enumerate()
            .map(|(id, v)| Entity {
                id,
                label: format!("{v:?}"),
                focused: false,
                exchanging: false,
                active: true,
            })
            .collect();
        Self {
            frame_index: 0,
            slots: (0..entities.len()).collect(),
            entities,
            markers: None,
            caption: String::new(),
        }
    }

    /// Index of the last frame applied (0 before any frame).
    #[must_use]
    pub const fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Entity id at each slot, in slot order.
    #[must_use]
    pub fn slots(&self) -> &[EntityId] {
        &self.slots
    }

    /// All entities, indexed by id.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entity with the given id.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Entity currently drawn at `slot`.
    #[must_use]
    pub fn entity_at(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot).and_then(|&id| self.entities.get(id))
    }

    /// Slot currently holding entity `id`.
    #[must_use]
    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.slots.iter().position(|&e| e == id)
    }

    /// Directional comparison markers, as slot pairs.
    #[must_use]
    pub const fn markers(&self) -> Option<(usize, usize)> {
        self.markers
    }

    /// Status caption.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Advance by one frame. `index` is that frame's position in the sequence.
    ///
    /// On error the state may be partially updated; callers discard it.
    pub fn apply<T>(&mut self, index: usize, frame: &Frame<T>) -> Result<(), FrameError> {
        match frame {
            Frame::Init => {}
            Frame::PreSwap { i, j } => {
                self.check_slots(index, &[*i, *j])?;
                self.clear_focus();
                self.markers = None;
                self.entity_mut(*i).exchanging = true;
                self.entity_mut(*j).exchanging = true;
            }
            Frame::PostSwap { i, j } => {
                self.check_slots(index, &[*i, *j])?;
                self.entity_mut(*i).exchanging = false;
                self.entity_mut(*j).exchanging = false;
            }
            Frame::Step(effect) => self.apply_effect(index, effect)?,
        }
        self.frame_index = index;
        Ok(())
    }

    fn apply_effect<T>(&mut self, index: usize, effect: &Effect<T>) -> Result<(), FrameError> {
        match effect {
            Effect::Cmp { i, j } => {
                self.check_slots(index, &[*i, *j])?;
                self.markers = Some((*i, *j));
            }
            Effect::Swap { i, j } => {
                self.check_slots(index, &[*i, *j])?;
                self.slots.swap(*i, *j);
            }
            Effect::Focus { indices } => self.focus(index, *indices)?,
            Effect::Compare { pair } => {
                if let Some((i, j)) = *pair {
                    self.check_slots(index, &[i, j])?;
                }
                self.markers = *pair;
            }
            Effect::Subdivide { span } => self.subdivide(index, *span)?,
            Effect::Label { text } => {
                self.caption.clone_from(text);
                self.markers = None;
            }
            Effect::Set { .. } | Effect::Merge { .. } => {
                return Err(FrameError::Unsupported {
                    index,
                    kind: effect.kind(),
                });
            }
        }
        Ok(())
    }

    fn focus(&mut self, index: usize, focus: Focus) -> Result<(), FrameError> {
        let targets = focus.indices();
        self.check_slots(index, &targets)?;
        self.clear_focus();
        for slot in targets {
            self.entity_mut(slot).focused = true;
        }
        Ok(())
    }

    fn subdivide(&mut self, index: usize, span: Span) -> Result<(), FrameError> {
        if span.end > self.slots.len() {
            return Err(FrameError::SlotOutOfRange {
                index,
                slot: span.end,
                len: self.slots.len(),
            });
        }
        for (slot, &id) in self.slots.iter().enumerate() {
            self.entities[id].active = span.contains(slot);
        }
        Ok(())
    }

    fn clear_focus(&mut self) {
        for e in &mut self.entities {
            e.focused = false;
        }
    }

    fn check_slots(&self, index: usize, slots: &[usize]) -> Result<(), FrameError> {
        let len = self.slots.len();
        match slots.iter().find(|&&s| s >= len) {
            Some(&slot) => Err(FrameError::SlotOutOfRange { index, slot, len }),
            None => Ok(()),
        }
    }

    /// Entity at a slot already validated by `check_slots`.
    fn entity_mut(&mut self, slot: usize) -> &mut Entity {
        let id = self.slots[slot];
        &mut self.entities[id]
    }
}
