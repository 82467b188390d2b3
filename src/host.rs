use core_types::ControlGeometry;
use input_core::{ControlId, HostControl};
use layout::SurfaceFactory;
use overlay::{Notice, OverlayId, Placement, Ticket};

/// Everything a [`ContentSession`](crate::ContentSession) needs from the page.
///
/// The session decides; the host only executes. Surfaces for caret
/// measurement come from the [`SurfaceFactory`] supertrait.
pub trait PageHost: SurfaceFactory {
    type Control: HostControl + ?Sized;

    // =========================================================================
    // Controls
    // =========================================================================

    /// Mutable access to a registered text control.
    fn control(&mut self, id: ControlId) -> Option<&mut Self::Control>;

    /// Border box and scroll offsets of a control, in viewport pixels.
    /// `None` once the control has left the document.
    fn control_geometry(&self, id: ControlId) -> Option<ControlGeometry>;

    // =========================================================================
    // Overlay element
    // =========================================================================

    /// Insert the overlay hidden and report its size back through
    /// [`ContentSession::overlay_measured`](crate::ContentSession::overlay_measured)
    /// once the page has laid it out.
    fn show_overlay(&mut self, overlay: OverlayId);

    fn place_overlay(&mut self, overlay: OverlayId, placement: Placement);

    fn set_overlay_busy(&mut self, overlay: OverlayId, busy: bool);

    /// Remove the overlay element. Unknown ids are ignored.
    fn remove_overlay(&mut self, overlay: OverlayId);

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Start translating `text`. The outcome is reported through
    /// [`ContentSession::translation_completed`](crate::ContentSession::translation_completed)
    /// with the same ticket.
    fn dispatch_translation(&mut self, ticket: Ticket, text: String);

    fn notify(&mut self, notice: &Notice);
}
