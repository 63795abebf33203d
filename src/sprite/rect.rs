/// A half-open run `[start, end)` along one image axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// An axis-aligned frame region inside a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanned by a row run and a column run
    pub fn from_spans(rows: Span, cols: Span) -> Self {
        Self::new(cols.start, rows.start, cols.len(), rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(3, 9).len(), 6);
        assert!(!Span::new(3, 9).is_empty());
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn test_from_spans() {
        let rect = FrameRect::from_spans(Span::new(2, 10), Span::new(5, 11));

        assert_eq!(rect, FrameRect::new(5, 2, 6, 8));
    }
}
