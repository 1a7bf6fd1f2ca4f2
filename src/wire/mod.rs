// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wire module - segments, paths and editing

mod collection;
mod editor;
mod path;
mod segment;

pub use collection::{PathCollection, PALETTE};
pub use editor::{DragTarget, EditMode, Editor, EditorSettings};
pub use path::{BendStep, WirePath, DEFAULT_STROKE, DEFAULT_WIRE_DIAMETER};
pub use segment::{Handle, Segment, SegmentKind, DEFAULT_CURVE_STEPS, DEFAULT_HIT_TOLERANCE};
