use crate::encoder::bch::BchEncoder;
use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{ECLevel, MaskPattern, ModuleGrid, Version};

/// Draw every function pattern for `version` into a fresh grid
///
/// Format information cells are reserved (light) here and overwritten by
/// [`draw_format_bits`] once the mask is known.
pub fn draw_function_patterns(version: Version) -> ModuleGrid {
    let size = version.size();
    let mut grid = ModuleGrid::new(size);

    // Finder patterns + separators
    draw_finder_pattern(&mut grid, 3, 3);
    draw_finder_pattern(&mut grid, 3, size - 4);
    draw_finder_pattern(&mut grid, size - 4, 3);

    // Timing patterns (row 6 and column 6) between the finders
    for i in 8..size - 8 {
        grid.set_function(6, i, i % 2 == 0);
        grid.set_function(i, 6, i % 2 == 0);
    }

    // Alignment patterns, skipping the three finder corners
    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &row) in align.iter().enumerate() {
        for (j, &col) in align.iter().enumerate() {
            let in_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !in_finder {
                draw_alignment_pattern(&mut grid, row, col);
            }
        }
    }

    // Reserve both format copies; the real bits come after masking
    draw_format_bits(&mut grid, 0);

    if version.number() >= 7 {
        draw_version_bits(&mut grid, version);
    }

    grid
}

/// Write the format information for `ec_level`/`mask` into both copies
pub fn draw_format_info(grid: &mut ModuleGrid, ec_level: ECLevel, mask: MaskPattern) {
    draw_format_bits(grid, BchEncoder::format_bits(ec_level, mask));
}

fn draw_format_bits(grid: &mut ModuleGrid, bits: u16) {
    let size = grid.size();
    let bit = |i: usize| (bits >> i) & 1 == 1;

    // First copy, around the top-left finder
    for i in 0..=5 {
        grid.set_function(i, 8, bit(i));
    }
    grid.set_function(7, 8, bit(6));
    grid.set_function(8, 8, bit(7));
    grid.set_function(8, 7, bit(8));
    for i in 9..15 {
        grid.set_function(8, 14 - i, bit(i));
    }

    // Second copy, split between the top-right and bottom-left finders
    for i in 0..8 {
        grid.set_function(8, size - 1 - i, bit(i));
    }
    for i in 8..15 {
        grid.set_function(size - 15 + i, 8, bit(i));
    }

    // Dark module
    grid.set_function(size - 8, 8, true);
}

fn draw_version_bits(grid: &mut ModuleGrid, version: Version) {
    let size = grid.size();
    let bits = BchEncoder::version_bits(version);
    for i in 0..18 {
        let dark = (bits >> i) & 1 == 1;
        let a = size - 11 + i % 3;
        let b = i / 3;
        // Top-right block (6 rows x 3 cols) and its transpose at bottom-left
        grid.set_function(b, a, dark);
        grid.set_function(a, b, dark);
    }
}

/// 7x7 finder centred on (row, col) plus its one-module light separator
fn draw_finder_pattern(grid: &mut ModuleGrid, row: usize, col: usize) {
    let size = grid.size() as isize;
    for dr in -4isize..=4 {
        for dc in -4isize..=4 {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if (0..size).contains(&r) && (0..size).contains(&c) {
                let dist = dr.abs().max(dc.abs());
                grid.set_function(r as usize, c as usize, dist != 2 && dist != 4);
            }
        }
    }
}

/// 5x5 alignment pattern centred on (row, col)
fn draw_alignment_pattern(grid: &mut ModuleGrid, row: usize, col: usize) {
    for dr in -2isize..=2 {
        for dc in -2isize..=2 {
            let r = (row as isize + dr) as usize;
            let c = (col as isize + dc) as usize;
            grid.set_function(r, c, dr.abs().max(dc.abs()) != 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;

    const FINDER: [[u8; 7]; 7] = [
        [1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0, 0, 1],
        [1, 0, 1, 1, 1, 0, 1],
        [1, 0, 1, 1, 1, 0, 1],
        [1, 0, 1, 1, 1, 0, 1],
        [1, 0, 0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1, 1, 1],
    ];

    #[test]
    fn test_finder_corners() {
        let version = Version::new(2).unwrap();
        let grid = draw_function_patterns(version);
        let n = version.size();
        for (r0, c0) in [(0, 0), (0, n - 7), (n - 7, 0)] {
            for r in 0..7 {
                for c in 0..7 {
                    assert_eq!(grid.is_dark(r0 + r, c0 + c), FINDER[r][c] == 1);
                }
            }
        }
        // Separators are light
        assert!(!grid.is_dark(7, 0));
        assert!(!grid.is_dark(0, 7));
        assert!(!grid.is_dark(7, n - 8));
        assert!(!grid.is_dark(n - 8, 7));
    }

    #[test]
    fn test_data_module_count_matches_table() {
        for version in Version::all() {
            let grid = draw_function_patterns(version);
            assert_eq!(
                grid.data_modules_count(),
                raw_data_modules(version),
                "version {}",
                version.number()
            );
        }
    }

    #[test]
    fn test_function_cells_resolved_data_cells_unset() {
        let version = Version::new(7).unwrap();
        let grid = draw_function_patterns(version);
        let n = version.size();
        for r in 0..n {
            for c in 0..n {
                assert_eq!(grid.is_function(r, c), !grid.is_unset(r, c));
            }
        }
    }

    #[test]
    fn test_alignment_pattern_version2() {
        let grid = draw_function_patterns(Version::new(2).unwrap());
        // Centre (18, 18): dark centre, light ring, dark border
        assert!(grid.is_dark(18, 18));
        assert!(!grid.is_dark(17, 18));
        assert!(!grid.is_dark(19, 19));
        assert!(grid.is_dark(16, 16));
        assert!(grid.is_dark(20, 18));
    }

    #[test]
    fn test_dark_module() {
        for version in Version::all() {
            let grid = draw_function_patterns(version);
            assert!(grid.is_dark(4 * version.number() as usize + 9, 8));
        }
    }

    #[test]
    fn test_format_info_both_copies() {
        let version = Version::new(1).unwrap();
        let mut grid = draw_function_patterns(version);
        draw_format_info(&mut grid, ECLevel::M, MaskPattern::Pattern3);
        let n = version.size();
        let bits = BchEncoder::format_bits(ECLevel::M, MaskPattern::Pattern3);

        let mut first = 0u16;
        let mut second = 0u16;
        for i in 0..15 {
            let (r1, c1) = match i {
                0..=5 => (i, 8),
                6 => (7, 8),
                7 => (8, 8),
                8 => (8, 7),
                _ => (8, 14 - i),
            };
            let (r2, c2) = if i < 8 { (8, n - 1 - i) } else { (n - 15 + i, 8) };
            first |= (grid.is_dark(r1, c1) as u16) << i;
            second |= (grid.is_dark(r2, c2) as u16) << i;
        }
        assert_eq!(first, bits);
        assert_eq!(second, bits);
    }

    #[test]
    fn test_version_info_blocks() {
        let version = Version::new(7).unwrap();
        let grid = draw_function_patterns(version);
        let n = version.size();
        let bits = BchEncoder::version_bits(version);
        for i in 0..18 {
            let expected = (bits >> i) & 1 == 1;
            assert_eq!(grid.is_dark(i / 3, n - 11 + i % 3), expected);
            assert_eq!(grid.is_dark(n - 11 + i % 3, i / 3), expected);
        }
    }
}
