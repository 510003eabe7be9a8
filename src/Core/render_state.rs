// Scoped save/restore of the render target state around the copy step.

/// The graphics state a drain borrows while copying frames into destinations.
pub trait RenderContext {
    /// Whatever must be put back once copying is over (viewport, scissor, ...).
    type Saved;

    fn save_state(&mut self) -> Self::Saved;

    /// Put the context into the state copies expect.
    fn prepare_copy(&mut self) {}

    fn restore_state(&mut self, saved: Self::Saved);
}

/// A context with nothing to save, for consumers that copy on the CPU.
impl RenderContext for () {
    type Saved = ();

    fn save_state(&mut self) {}

    fn restore_state(&mut self, _saved: ()) {}
}

/// Holds the caller's render state and restores it on drop, whichever way the
/// drain returns.
pub struct RenderStateGuard<'a, C: RenderContext> {
    context: &'a mut C,
    saved: Option<C::Saved>,
}

impl<'a, C: RenderContext> RenderStateGuard<'a, C> {
    pub fn enter(context: &'a mut C) -> Self {
        let saved = context.save_state();
        context.prepare_copy();
        Self {
            context,
            saved: Some(saved),
        }
    }
}

impl<C: RenderContext> Drop for RenderStateGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.context.restore_state(saved);
        }
    }
}
