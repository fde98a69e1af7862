//! Fixed colour palette used by event overlays.
//!
//! The monitoring service addresses overlay colours by their position in
//! its built-in palette, so configuration names are translated through this
//! table before they reach the wire.

/// Colour names and their palette indices, in palette order.
pub const PALETTE_COLORS: &[(&str, u32)] = &[
    ("gray", 0),
    ("blue", 1),
    ("azure", 2),
    ("navy", 3),
    ("brown", 4),
    ("orange", 5),
    ("yellow", 6),
    ("iris", 7),
    ("magenta", 8),
    ("pink", 9),
    ("purple", 10),
    ("violet", 11),
    ("lilac", 12),
    ("emerald", 13),
    ("green", 14),
    ("aquamarine", 15),
];

/// Look up the palette index for a colour name.
///
/// Matching is exact; unknown names yield `None`.
pub fn color_index(name: &str) -> Option<u32> {
    PALETTE_COLORS
        .iter()
        .find(|(color, _)| *color == name)
        .map(|&(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_colors_resolve() {
        assert_eq!(color_index("gray"), Some(0));
        assert_eq!(color_index("azure"), Some(2));
        assert_eq!(color_index("aquamarine"), Some(15));
    }

    #[test]
    fn unknown_color_is_none() {
        assert_eq!(color_index("chartreuse"), None);
        assert_eq!(color_index(""), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(color_index("Blue"), None);
    }

    #[test]
    fn indices_follow_table_order() {
        for (position, &(_, index)) in PALETTE_COLORS.iter().enumerate() {
            assert_eq!(index as usize, position);
        }
    }
}
