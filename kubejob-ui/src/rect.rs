//! Screen rectangles in cell coordinates.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrinks by the given margins, saturating at zero size.
    pub fn shrink(self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            x: self.x.saturating_add(left),
            y: self.y.saturating_add(top),
            width: self.width.saturating_sub(left.saturating_add(right)),
            height: self.height.saturating_sub(top.saturating_add(bottom)),
        }
    }

    /// Same margin on every side.
    pub fn inset(self, margin: u16) -> Self {
        self.shrink(margin, margin, margin, margin)
    }

    /// Single row at offset `dy`, clipped to this rect.
    pub fn row(self, dy: u16) -> Self {
        if dy >= self.height {
            return Self::new(self.x, self.bottom(), self.width, 0);
        }
        Self::new(self.x, self.y + dy, self.width, 1)
    }

    /// Splits off the top `height` rows: `(top, rest)`.
    pub fn split_top(self, height: u16) -> (Self, Self) {
        let height = height.min(self.height);
        (
            Self::new(self.x, self.y, self.width, height),
            Self::new(self.x, self.y + height, self.width, self.height - height),
        )
    }

    /// Splits off the left `width` columns: `(left, rest)`.
    pub fn split_left(self, width: u16) -> (Self, Self) {
        let width = width.min(self.width);
        (
            Self::new(self.x, self.y, width, self.height),
            Self::new(self.x + width, self.y, self.width - width, self.height),
        )
    }

    /// Splits into `n` columns of (almost) equal width separated by `gap`.
    pub fn columns(self, n: u16, gap: u16) -> Vec<Self> {
        if n == 0 {
            return Vec::new();
        }
        let gaps = gap.saturating_mul(n - 1);
        let usable = self.width.saturating_sub(gaps);
        let base = usable / n;
        let mut extra = usable % n;
        let mut x = self.x;
        let mut out = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let mut w = base;
            if extra > 0 {
                w += 1;
                extra -= 1;
            }
            out.push(Self::new(x, self.y, w, self.height));
            x = x.saturating_add(w).saturating_add(gap);
        }
        out
    }

    /// A `width` x `height` rect centered inside this one, clamped to fit.
    pub fn centered(self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn test_split_top_clamps() {
        let (top, rest) = Rect::new(0, 0, 10, 3).split_top(5);
        assert_eq!(top.height, 3);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_columns_distribute_remainder() {
        let cols = Rect::new(0, 0, 11, 1).columns(3, 1);
        let widths: Vec<u16> = cols.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![3, 3, 3]);
        assert_eq!(cols[1].x, 4);
        assert_eq!(cols[2].x, 8);
    }

    #[test]
    fn test_centered() {
        let r = Rect::new(0, 0, 20, 10).centered(10, 4);
        assert_eq!(r, Rect::new(5, 3, 10, 4));
        assert_eq!(Rect::new(0, 0, 4, 4).centered(10, 10), Rect::new(0, 0, 4, 4));
    }
}
