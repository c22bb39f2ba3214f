// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-slice state.
//!
//! The controller is a pure state holder with two states, idle and active(id). It
//! never recomputes geometry itself; callers re-run the geometry builder after a
//! transition reports a change. Only one slice may be active at a time, and an
//! explicit external set or clear overrides pointer-derived state until the next
//! pointer event (last write wins).

use crate::datum::DatumId;

/// Tracks which slice, if any, is currently emphasized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSliceController {
    active: Option<DatumId>,
}

impl ActiveSliceController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller with an initial selection, for hosts that open a chart
    /// with a slice pre-emphasized.
    pub fn with_default_active(active: Option<DatumId>) -> Self {
        Self { active }
    }

    /// The currently active slice id, if any.
    pub fn active_id(&self) -> Option<&DatumId> {
        self.active.as_ref()
    }

    /// Pointer entered or moved over the slice with the given id.
    ///
    /// Returns `true` if the state changed; re-activating the already active slice is
    /// an idempotent no-op.
    pub fn pointer_over(&mut self, id: DatumId) -> bool {
        if self.active.as_ref() == Some(&id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Pointer left the drawing surface, or moved somewhere no slice resolves.
    ///
    /// Returns `true` if the state changed.
    pub fn pointer_out(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.active = None;
        true
    }

    /// Explicit external selection (e.g. programmatic highlight), overriding any
    /// pointer-derived state.
    ///
    /// Returns `true` if the state changed.
    pub fn set_active(&mut self, id: Option<DatumId>) -> bool {
        if self.active == id {
            return false;
        }
        self.active = id;
        true
    }
}
