//! Fullscreen transition state machine
//!
//! ```text
//!   Idle ──toggle──▶ Expanding ──transitionend(transform)──▶ Expanded
//!    ▲                                                          │
//!    └──transitionend(transform)── Collapsing ◀──toggle─────────┘
//! ```
//!
//! Toggling while a transition runs is rejected. Completion is only accepted
//! for the `transform` property so unrelated transitions on the tile cannot
//! commit the state early. A cancelled transition commits like a finished one,
//! and a move that leaves the transform unchanged commits at once since the
//! browser never starts a transition for it.
//!
//! Expanding raises the tile, then animates the expand transform. Once done the
//! fullscreen class takes over and the transform is dropped. Collapsing
//! removes the class, re-applies the expand transform measured against the
//! tile's layout slot without animation, and animates back to the identity.

use crate::{
    geometry::{compute_collapse_transform, compute_expand_transform, Transform},
    Error, FullscreenConfig, Rect, Result, Viewport,
};
use serde::{Deserialize, Serialize};

/// CSS property whose transition drives the state machine
pub const TRANSITION_PROPERTY: &str = "transform";

/// Fullscreen animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FullscreenState {
    #[default]
    Idle,
    Expanding,
    Expanded,
    Collapsing,
}

impl FullscreenState {
    pub fn is_animating(&self) -> bool {
        matches!(self, FullscreenState::Expanding | FullscreenState::Collapsing)
    }
}

impl std::fmt::Display for FullscreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FullscreenState::Idle => write!(f, "idle"),
            FullscreenState::Expanding => write!(f, "expanding"),
            FullscreenState::Expanded => write!(f, "expanded"),
            FullscreenState::Collapsing => write!(f, "collapsing"),
        }
    }
}

/// Style mutation requested from the element hosting the tile
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    /// `None` restores the stylesheet z-index
    SetZIndex(Option<i32>),
    /// `None` disables transitions
    SetTransition(Option<String>),
    SetTransform(Transform),
    ClearTransform,
    AddClass(String),
    RemoveClass(String),
    /// Force a style flush so the next op animates from the current value
    Reflow,
}

/// Element the fullscreen effect is applied to
pub trait StyleTarget {
    /// Live layout box of the element
    fn bounding_rect(&self) -> Rect;

    fn viewport(&self) -> Viewport;

    fn apply(&mut self, op: &StyleOp);
}

/// Drives one tile through the fullscreen states
#[derive(Debug, Clone)]
pub struct FullscreenController {
    state: FullscreenState,
    config: FullscreenConfig,
}

impl FullscreenController {
    pub fn new(config: FullscreenConfig) -> Self {
        Self {
            state: FullscreenState::Idle,
            config,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    /// True once the tile is committed to fullscreen
    pub fn is_fullscreen(&self) -> bool {
        self.state == FullscreenState::Expanded
    }

    /// Start expanding or collapsing; returns the new state
    pub fn toggle<T: StyleTarget + ?Sized>(&mut self, target: &mut T) -> Result<FullscreenState> {
        match self.state {
            FullscreenState::Idle => self.expand(target)?,
            FullscreenState::Expanded => self.collapse(target)?,
            state => {
                tracing::debug!(%state, "Fullscreen toggle rejected");
                return Err(Error::TransitionInProgress {
                    state: state.to_string(),
                });
            }
        }

        tracing::debug!(state = %self.state, "Fullscreen transition started");
        Ok(self.state)
    }

    fn expand<T: StyleTarget + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        let transform = compute_expand_transform(&target.bounding_rect(), &target.viewport())?;

        target.apply(&StyleOp::SetZIndex(Some(self.config.z_index)));
        target.apply(&StyleOp::SetTransition(Some(self.config.transition_css())));
        target.apply(&StyleOp::SetTransform(transform));

        self.state = FullscreenState::Expanding;
        if transform.is_identity() {
            self.commit(target);
        }
        Ok(())
    }

    fn collapse<T: StyleTarget + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        target.apply(&StyleOp::RemoveClass(self.config.class_name.clone()));

        // Layout slot is only measurable once the class is gone
        let transform = match compute_expand_transform(&target.bounding_rect(), &target.viewport()) {
            Ok(transform) => transform,
            Err(e) => {
                target.apply(&StyleOp::AddClass(self.config.class_name.clone()));
                return Err(e);
            }
        };

        target.apply(&StyleOp::SetTransition(None));
        target.apply(&StyleOp::SetZIndex(Some(self.config.z_index)));
        target.apply(&StyleOp::SetTransform(transform));
        target.apply(&StyleOp::Reflow);
        target.apply(&StyleOp::SetTransition(Some(self.config.transition_css())));
        target.apply(&StyleOp::SetTransform(compute_collapse_transform()));

        self.state = FullscreenState::Collapsing;
        if transform.is_identity() {
            self.commit(target);
        }
        Ok(())
    }

    /// Handle a `transitionend` for `property`; returns true when a state was committed
    pub fn on_transition_end<T: StyleTarget + ?Sized>(&mut self, target: &mut T, property: &str) -> bool {
        if property != TRANSITION_PROPERTY {
            tracing::trace!(property, "Ignoring unrelated transition");
            return false;
        }
        self.commit(target)
    }

    /// Handle a `transitioncancel`; the tile jumps to its target state
    pub fn on_transition_cancel<T: StyleTarget + ?Sized>(&mut self, target: &mut T, property: &str) -> bool {
        if property != TRANSITION_PROPERTY {
            return false;
        }
        if self.state.is_animating() {
            tracing::debug!(state = %self.state, "Fullscreen transition cancelled");
        }
        self.commit(target)
    }

    fn commit<T: StyleTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        match self.state {
            FullscreenState::Expanding => {
                target.apply(&StyleOp::SetTransition(None));
                target.apply(&StyleOp::AddClass(self.config.class_name.clone()));
                target.apply(&StyleOp::ClearTransform);
                target.apply(&StyleOp::SetZIndex(None));
                self.state = FullscreenState::Expanded;
            }
            FullscreenState::Collapsing => {
                target.apply(&StyleOp::SetTransition(None));
                target.apply(&StyleOp::ClearTransform);
                target.apply(&StyleOp::SetZIndex(None));
                self.state = FullscreenState::Idle;
            }
            _ => return false,
        }

        tracing::debug!(state = %self.state, "Fullscreen state committed");
        true
    }

    /// Drop any fullscreen styling and return to idle
    pub fn reset<T: StyleTarget + ?Sized>(&mut self, target: &mut T) {
        if self.state == FullscreenState::Idle {
            return;
        }
        target.apply(&StyleOp::SetTransition(None));
        target.apply(&StyleOp::RemoveClass(self.config.class_name.clone()));
        target.apply(&StyleOp::ClearTransform);
        target.apply(&StyleOp::SetZIndex(None));
        self.state = FullscreenState::Idle;
    }
}

impl Default for FullscreenController {
    fn default() -> Self {
        Self::new(FullscreenConfig::default())
    }
}
