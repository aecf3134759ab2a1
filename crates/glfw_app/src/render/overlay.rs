//! 2D text overlay on top of the 3D scene
//!
//! Text is drawn in a normalized coordinate space: x runs from -1 (left) to
//! 1 (right), y from -1 (bottom) to 1 (top) scaled by the inverse aspect
//! ratio, so glyphs keep their shape on any window size. The projection and
//! modelview stacks are restored after every call, whatever the renderer
//! does.

use crate::foundation::math::{orthographic, Mat4, Vec2};

/// Stack of 4x4 matrices; the bottom entry can never be popped
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    /// Create a stack holding a single identity matrix
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::identity()],
        }
    }

    /// Current matrix
    pub fn top(&self) -> &Mat4 {
        // never empty, see `pop`
        &self.stack[self.stack.len() - 1]
    }

    /// Current matrix, mutable
    pub fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Duplicate the current matrix and return the new top
    pub fn push(&mut self) -> &mut Mat4 {
        let top = *self.top();
        self.stack.push(top);
        self.top_mut()
    }

    /// Discard the current matrix. Returns `false` if only the base is left.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() == 1 {
            log::warn!("Matrix stack underflow ignored");
            return false;
        }
        self.stack.pop();
        true
    }

    /// Number of matrices on the stack, at least one
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Projection and modelview stacks used by overlay drawing
#[derive(Debug, Clone, Default)]
pub struct MatrixStacks {
    /// Projection matrices
    pub projection: MatrixStack,
    /// Modelview matrices
    pub modelview: MatrixStack,
}

/// Draws strings; supplied by the application
pub trait TextRenderer {
    /// Draw `text` with its baseline origin at `cursor`, glyphs `size` units
    /// high, using the given matrices
    fn render(&mut self, text: &str, cursor: Vec2, size: f32, projection: &Mat4, modelview: &Mat4);
}

/// Overlay text state owned by the application
#[derive(Default)]
pub struct Overlay {
    stacks: MatrixStacks,
    renderer: Option<Box<dyn TextRenderer>>,
}

impl Overlay {
    /// Glyph height passed to the text renderer
    pub const TEXT_SIZE: f32 = 18.0;

    /// Create an overlay without a text renderer; text calls are no-ops
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the renderer used for overlay text
    pub fn set_renderer(&mut self, renderer: Box<dyn TextRenderer>) {
        self.renderer = Some(renderer);
    }

    /// Whether text will actually be drawn
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Matrix stacks, for applications that draw their own overlay geometry
    pub fn stacks(&self) -> &MatrixStacks {
        &self.stacks
    }

    /// Draw `text` at a normalized `position` on a window whose height over
    /// width is `aspect_inverse`
    pub fn render_text(&mut self, text: &str, position: Vec2, aspect_inverse: f32) {
        let Some(renderer) = self.renderer.as_mut() else {
            log::trace!("No text renderer installed, skipping overlay text {text:?}");
            return;
        };

        let mut stacks = scopeguard::guard(&mut self.stacks, |stacks| {
            stacks.projection.pop();
            stacks.modelview.pop();
        });

        *stacks.modelview.push() = Mat4::identity();
        *stacks.projection.push() = orthographic(
            -1.0,
            1.0,
            -aspect_inverse,
            aspect_inverse,
            -100.0,
            100.0,
        );

        let cursor = Vec2::new(position.x, aspect_inverse * position.y);
        renderer.render(
            text,
            cursor,
            Self::TEXT_SIZE,
            stacks.projection.top(),
            stacks.modelview.top(),
        );
    }
}
