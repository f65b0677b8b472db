use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 3;

/// `list[(page-1)*page_size .. page*page_size]`, clipped to the list.
///
/// Pages are 1-based; page 0 or a page past the end yields an empty slice.
pub fn page_slice<T>(list: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(list.len());
    let end = page.saturating_mul(page_size).min(list.len());
    &list[start..end]
}

/// State of the previous/next controls for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControls {
    /// Controls are only shown once the list spans more than one page.
    pub visible: bool,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero page size is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    pub fn end_index(&self) -> usize {
        self.start_index() + self.page_size
    }

    /// Number of pages needed for `len` items; zero for an empty list.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Advance one page unless the current page already reaches the end.
    pub fn next(&mut self, len: usize) {
        if self.end_index() < len {
            self.current_page += 1;
        }
    }

    /// Pull the current page back inside `[1, page_count(len)]`.
    pub fn clamp(&mut self, len: usize) {
        self.current_page = self.current_page.min(self.page_count(len)).max(1);
    }

    pub fn set_page(&mut self, page: usize, len: usize) {
        self.current_page = page.max(1);
        self.clamp(len);
    }

    pub fn controls(&self, len: usize) -> PageControls {
        PageControls {
            visible: len > self.page_size,
            previous_disabled: self.current_page == 1,
            next_disabled: self.end_index() >= len,
        }
    }

    pub fn slice<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        page_slice(list, self.current_page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEVEN: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

    #[test]
    fn page_slice_windows() {
        assert_eq!(page_slice(&SEVEN, 1, 3), &[0, 1, 2]);
        assert_eq!(page_slice(&SEVEN, 2, 3), &[3, 4, 5]);
        assert_eq!(page_slice(&SEVEN, 3, 3), &[6]);
    }

    #[test]
    fn page_slice_out_of_range_is_empty() {
        assert!(page_slice(&SEVEN, 4, 3).is_empty());
        assert!(page_slice(&SEVEN, 0, 3).is_empty());
        assert!(page_slice(&SEVEN, usize::MAX, 3).is_empty());
        assert!(page_slice::<u8>(&[], 1, 3).is_empty());
    }

    #[test]
    fn previous_floors_at_one() {
        let mut p = Pagination::default();
        p.previous();
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut p = Pagination::default();
        p.next(7);
        p.next(7);
        p.next(7);
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.slice(&SEVEN), &[6]);
    }

    #[test]
    fn controls_follow_position() {
        let mut p = Pagination::default();
        assert!(!p.controls(3).visible);

        let c = p.controls(7);
        assert!(c.visible);
        assert!(c.previous_disabled);
        assert!(!c.next_disabled);

        p.next(7);
        p.next(7);
        let c = p.controls(7);
        assert!(!c.previous_disabled);
        assert!(c.next_disabled);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut p = Pagination::default();
        p.next(7);
        p.next(7);
        assert_eq!(p.current_page(), 3);

        p.clamp(4);
        assert_eq!(p.current_page(), 2);

        p.clamp(0);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_count(0), 0);
    }

    #[test]
    fn zero_page_size_is_bumped() {
        let p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page_count(5), 5);
    }
}
