use crate::color::Residual;

/// Rolling window of accumulated diffusion error.
///
/// Stores only the rows a kernel can reach (`max_dy + 1`), so memory stays
/// proportional to the image width rather than its area.
///
/// # Usage Pattern
///
/// 1. Create with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After resolving a pixel, spread its residual with `add_error(x, dy, error)`
///    c. After the row is complete, call `advance_row()`
#[derive(Debug, Clone)]
pub(crate) struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, and so on.
    rows: Vec<Vec<Residual>>,
    width: usize,
}

impl ErrorBuffer {
    pub(crate) fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth.max(1))
                .map(|_| vec![[0.0; 4]; width])
                .collect(),
            width,
        }
    }

    #[inline]
    pub(crate) fn get_accumulated(&self, x: usize) -> Residual {
        self.rows[0][x]
    }

    /// Add error to a pixel that has not been visited yet.
    ///
    /// Out-of-bounds targets are dropped.
    #[inline]
    pub(crate) fn add_error(&mut self, x: usize, row_offset: usize, error: Residual) {
        if x < self.width && row_offset < self.rows.len() {
            let cell = &mut self.rows[row_offset][x];
            for c in 0..4 {
                cell[c] += error[c];
            }
        }
    }

    /// Rotate the window one row down and zero the new last row.
    pub(crate) fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 4]);
        }
    }

    /// Zero every row.
    pub(crate) fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill([0.0; 4]);
        }
    }

    #[cfg(test)]
    pub(crate) fn row(&self, row_offset: usize) -> &[Residual] {
        &self.rows[row_offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_read() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add_error(1, 0, [0.1, 0.2, 0.3, 0.4]);
        buf.add_error(1, 0, [0.1, 0.0, 0.0, 0.0]);
        let acc = buf.get_accumulated(1);
        assert!((acc[0] - 0.2).abs() < 1e-6);
        assert!((acc[3] - 0.4).abs() < 1e-6);
        assert_eq!(buf.get_accumulated(0), [0.0; 4]);
    }

    #[test]
    fn test_out_of_bounds_dropped() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(2, 0, [1.0; 4]);
        buf.add_error(0, 2, [1.0; 4]);
        assert!(buf.row(0).iter().all(|e| *e == [0.0; 4]));
        assert!(buf.row(1).iter().all(|e| *e == [0.0; 4]));
    }

    #[test]
    fn test_advance_row_shifts_and_clears() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(0, 0, [1.0; 4]);
        buf.add_error(1, 1, [0.5; 4]);
        buf.advance_row();
        assert_eq!(buf.get_accumulated(0), [0.0; 4]);
        assert_eq!(buf.get_accumulated(1), [0.5; 4]);
        assert!(buf.row(1).iter().all(|e| *e == [0.0; 4]));
    }

    #[test]
    fn test_clear() {
        let mut buf = ErrorBuffer::new(2, 3);
        buf.add_error(1, 2, [1.0; 4]);
        buf.clear();
        for dy in 0..3 {
            assert!(buf.row(dy).iter().all(|e| *e == [0.0; 4]));
        }
    }
}
