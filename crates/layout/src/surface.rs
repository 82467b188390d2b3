//! Scoped measurement surfaces.
//!
//! A surface is an invisible copy of a text control: same box model, same
//! wrapping-relevant style, content split by a zero-width marker. Surfaces
//! are acquired through [`SurfaceGuard`], which releases them when dropped,
//! so a surface never outlives the measurement that created it, error paths
//! included.

use std::ops::{Deref, DerefMut};

use core_types::CaretCoordinate;
use input_core::{ControlId, ControlKind};

/// Why a caret position could not be measured.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("control {0:?} is not attached to the document")]
    ControlDetached(ControlId),
    #[error("offset {offset} is past the end of the value (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("measurement failed: {0}")]
    Measurement(String),
}

/// An off-screen mirror of one control.
pub trait MeasurementSurface {
    /// Replace the surface content with `before`, the marker, then `after`.
    fn set_content(&mut self, before: &str, after: &str) -> Result<(), GeometryError>;

    /// Position of the marker relative to the surface's border box.
    fn marker_position(&mut self) -> Result<CaretCoordinate, GeometryError>;

    /// Tear the surface down. Must be idempotent.
    fn release(&mut self);
}

/// Creates surfaces mirroring a given control.
pub trait SurfaceFactory {
    type Surface: MeasurementSurface;

    fn create_surface(
        &mut self,
        control: ControlId,
        kind: ControlKind,
    ) -> Result<Self::Surface, GeometryError>;

    /// Acquire a surface that is released when the guard drops.
    fn acquire(
        &mut self,
        control: ControlId,
        kind: ControlKind,
    ) -> Result<SurfaceGuard<Self::Surface>, GeometryError> {
        self.create_surface(control, kind).map(SurfaceGuard::new)
    }
}

/// Owns a surface for the duration of one measurement.
pub struct SurfaceGuard<S: MeasurementSurface> {
    surface: S,
}

impl<S: MeasurementSurface> SurfaceGuard<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }
}

impl<S: MeasurementSurface> Deref for SurfaceGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.surface
    }
}

impl<S: MeasurementSurface> DerefMut for SurfaceGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: MeasurementSurface> Drop for SurfaceGuard<S> {
    fn drop(&mut self) {
        self.surface.release();
    }
}
