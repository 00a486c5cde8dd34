/// Cursor over an ordered image gallery, scoped to one open lightbox
/// session. `next`/`previous` wrap around, so every image is reachable from
/// every other by repeated presses of a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryCursor {
    len: usize,
    index: usize,
}

impl GalleryCursor {
    /// Opens a cursor at `index` into a gallery of `len` images. Returns
    /// `None` for an empty gallery or an out-of-range start index.
    pub fn open(len: usize, index: usize) -> Option<Self> {
        (index < len).then_some(Self { len, index })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// 1-based counter label, e.g. `"3 / 5"`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_empty_and_out_of_range() {
        assert_eq!(GalleryCursor::open(0, 0), None);
        assert_eq!(GalleryCursor::open(3, 3), None);
        assert!(GalleryCursor::open(3, 2).is_some());
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut cursor = GalleryCursor::open(4, 3).unwrap();
        assert_eq!(cursor.next(), 0);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut cursor = GalleryCursor::open(4, 0).unwrap();
        assert_eq!(cursor.previous(), 3);
    }

    #[test]
    fn n_next_calls_cycle_back_to_start() {
        let mut cursor = GalleryCursor::open(5, 2).unwrap();
        let mut seen = vec![cursor.index()];
        for _ in 0..5 {
            seen.push(cursor.next());
        }
        assert_eq!(seen, [2, 3, 4, 0, 1, 2]);
    }

    #[test]
    fn single_image_gallery_stays_put() {
        let mut cursor = GalleryCursor::open(1, 0).unwrap();
        assert_eq!(cursor.next(), 0);
        assert_eq!(cursor.previous(), 0);
    }

    #[test]
    fn counter_is_one_based() {
        let cursor = GalleryCursor::open(5, 0).unwrap();
        assert_eq!(cursor.counter(), "1 / 5");
    }
}
