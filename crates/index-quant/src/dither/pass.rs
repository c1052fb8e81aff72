use super::error_buffer::ErrorBuffer;
use super::Dither;
use crate::color::{Residual, Rgba};
use crate::error::QuantizeError;

/// Lifecycle of a [`DitherPass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPhase {
    /// No pixel has been touched yet.
    Fresh,
    /// At least one pixel was adjusted or recorded.
    InUse,
    /// Every pixel of the frame has been recorded.
    Exhausted,
}

/// Dithering state for one frame.
///
/// Created by [`Dither::begin`]. For each pixel, call [`adjust`] to get the
/// color to resolve, then [`record`] with the residual of the chosen entry.
/// Error diffusion passes must be driven in row-major order; ordered and
/// no-op passes accept any order.
///
/// Once every pixel has been recorded the pass is exhausted and every
/// further call fails with [`QuantizeError::PassExhausted`] until
/// [`reset`]. Recording the same pixel twice on an order-free pass counts
/// it once.
///
/// [`adjust`]: DitherPass::adjust
/// [`record`]: DitherPass::record
/// [`reset`]: DitherPass::reset
#[derive(Debug)]
pub struct DitherPass<'d> {
    dither: &'d Dither,
    width: usize,
    height: usize,
    scale: f32,
    spread: f32,
    errors: Option<ErrorBuffer>,
    /// Pixels already recorded, for order-free passes only.
    visited: Vec<bool>,
    recorded: usize,
    phase: PassPhase,
}

impl<'d> DitherPass<'d> {
    pub(crate) fn new(
        dither: &'d Dither,
        width: usize,
        height: usize,
        scale: f32,
        spread: f32,
    ) -> Self {
        let (errors, visited) = match dither {
            Dither::ErrorDiffusion(diffusion) => (
                Some(ErrorBuffer::new(width, diffusion.kernel().max_dy + 1)),
                Vec::new(),
            ),
            _ => (None, vec![false; width * height]),
        };
        Self {
            dither,
            width,
            height,
            scale,
            spread,
            errors,
            visited,
            recorded: 0,
            phase: PassPhase::Fresh,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PassPhase {
        self.phase
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color to resolve for pixel `(x, y)`.
    ///
    /// Error diffusion adds the accumulated error times the scale and clamps
    /// to `0.0..=1.0`. Ordered dithering adds the matrix offset. `None`
    /// returns `color` unchanged.
    pub fn adjust(&mut self, color: Rgba, x: usize, y: usize) -> Result<Rgba, QuantizeError> {
        self.check(x, y)?;
        self.phase = PassPhase::InUse;

        let adjusted = match (self.dither, self.errors.as_ref()) {
            (Dither::ErrorDiffusion(_), Some(errors)) => {
                let scale = self.scale;
                color.offset_clamped(errors.get_accumulated(x).map(|e| e * scale))
            }
            (Dither::Ordered(ordered), _) => {
                ordered.adjust(color, x, y, self.scale, self.spread)
            }
            _ => color,
        };
        Ok(adjusted)
    }

    /// Record the residual of pixel `(x, y)` after it was resolved.
    ///
    /// Error diffusion spreads the residual over the kernel taps; taps that
    /// fall outside the frame are dropped.
    pub fn record(&mut self, x: usize, y: usize, residual: Residual) -> Result<(), QuantizeError> {
        self.check(x, y)?;
        self.phase = PassPhase::InUse;

        if let (Dither::ErrorDiffusion(diffusion), Some(errors)) =
            (self.dither, self.errors.as_mut())
        {
            let kernel = diffusion.kernel();
            let divisor = kernel.divisor as f32;
            for &(dx, dy, weight) in kernel.entries {
                let Some(tx) = x.checked_add_signed(dx as isize) else {
                    continue;
                };
                let factor = weight as f32 / divisor;
                errors.add_error(tx, dy as usize, residual.map(|e| e * factor));
            }
            if x + 1 == self.width {
                errors.advance_row();
            }
        }

        // Scan order already rules out repeats when diffusing.
        let first_visit = match self.visited.get_mut(y * self.width + x) {
            Some(seen) => !std::mem::replace(seen, true),
            None => true,
        };
        if first_visit {
            self.recorded += 1;
            if self.recorded == self.width * self.height {
                self.phase = PassPhase::Exhausted;
            }
        }
        Ok(())
    }

    /// Return to [`PassPhase::Fresh`] with a zeroed accumulator.
    pub fn reset(&mut self) {
        if let Some(errors) = self.errors.as_mut() {
            errors.clear();
        }
        self.visited.fill(false);
        self.recorded = 0;
        self.phase = PassPhase::Fresh;
    }

    fn check(&self, x: usize, y: usize) -> Result<(), QuantizeError> {
        if self.phase == PassPhase::Exhausted {
            return Err(QuantizeError::PassExhausted);
        }
        if x >= self.width || y >= self.height {
            return Err(QuantizeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if self.errors.is_some() {
            let expected_x = self.recorded % self.width;
            let expected_y = self.recorded / self.width;
            if (x, y) != (expected_x, expected_y) {
                return Err(QuantizeError::OutOfOrder {
                    x,
                    y,
                    expected_x,
                    expected_y,
                });
            }
        }
        Ok(())
    }
}
