// Index clamping shared by the category list and card scrolling

/// Clamp `index` into `0..len`, or 0 when there is nothing to select
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Clamp a scroll offset into `0..=max_scroll`
pub fn clamp_scroll(offset: usize, max_scroll: usize) -> usize {
    clamp_index(offset, max_scroll + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, 0), 0);
        assert_eq!(clamp_index(5, 0), 0);
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
    }

    #[test]
    fn test_clamp_scroll_stays_in_range() {
        for max in 0..6 {
            for offset in 0..12 {
                let clamped = clamp_scroll(offset, max);
                assert!(clamped <= max);
                if offset <= max {
                    assert_eq!(clamped, offset);
                }
            }
        }
    }
}
