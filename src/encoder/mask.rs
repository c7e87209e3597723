/// Data masking and mask selection
use crate::encoder::function_patterns::draw_format_info;
use crate::models::{ECLevel, MaskPattern, ModuleGrid};
use rayon::prelude::*;
use tracing::trace;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// XOR every data module with the mask predicate
pub fn apply_mask(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            if !grid.is_function(row, col) && mask.is_masked(row, col) {
                grid.flip(row, col);
            }
        }
    }
}

/// Masked copy of `unmasked` with its format information drawn
pub fn masked_candidate(unmasked: &ModuleGrid, ec_level: ECLevel, mask: MaskPattern) -> ModuleGrid {
    let mut grid = unmasked.clone();
    apply_mask(&mut grid, mask);
    draw_format_info(&mut grid, ec_level, mask);
    grid
}

/// Try all eight masks and keep the lowest penalty (ties: lowest index)
pub fn select_mask(
    unmasked: &ModuleGrid,
    ec_level: ECLevel,
    parallel: bool,
) -> (MaskPattern, ModuleGrid, u32) {
    let evaluate = |mask: MaskPattern| {
        let grid = masked_candidate(unmasked, ec_level, mask);
        let score = penalty_score(&grid);
        trace!(mask = mask.bits(), score, "mask candidate");
        (score, mask, grid)
    };

    // Strict comparison keeps the earlier (lower-index) mask on ties
    let lower = |best: (u32, MaskPattern, ModuleGrid), next: (u32, MaskPattern, ModuleGrid)| {
        if (next.0, next.1) < (best.0, best.1) { next } else { best }
    };

    let first = evaluate(MaskPattern::ALL[0]);
    let rest = &MaskPattern::ALL[1..];
    let (score, mask, grid) = if parallel {
        let candidates: Vec<_> = rest.par_iter().map(|&mask| evaluate(mask)).collect();
        candidates.into_iter().fold(first, lower)
    } else {
        rest.iter().map(|&mask| evaluate(mask)).fold(first, lower)
    };
    (mask, grid, score)
}

/// ISO 18004 penalty score of a finished symbol
pub fn penalty_score(grid: &ModuleGrid) -> u32 {
    let size = grid.size();
    let mut score = 0;

    for i in 0..size {
        let row: Vec<bool> = (0..size).map(|c| grid.is_dark(i, c)).collect();
        let col: Vec<bool> = (0..size).map(|r| grid.is_dark(r, i)).collect();
        score += run_penalty(&row) + run_penalty(&col);
        score += finder_like_penalty(&row) + finder_like_penalty(&col);
    }

    for r in 0..size.saturating_sub(1) {
        for c in 0..size - 1 {
            let color = grid.is_dark(r, c);
            if grid.is_dark(r, c + 1) == color
                && grid.is_dark(r + 1, c) == color
                && grid.is_dark(r + 1, c + 1) == color
            {
                score += PENALTY_N2;
            }
        }
    }

    score + balance_penalty(grid.dark_count(), size * size)
}

/// N1: runs of five or more same-coloured modules
fn run_penalty(line: &[bool]) -> u32 {
    let mut score = 0;
    let mut run = 0;
    let mut previous = None;
    for &dark in line {
        if previous == Some(dark) {
            run += 1;
        } else {
            if run >= 5 {
                score += PENALTY_N1 + (run - 5);
            }
            run = 1;
            previous = Some(dark);
        }
    }
    if run >= 5 {
        score += PENALTY_N1 + (run - 5);
    }
    score
}

/// N3: 1:1:3:1:1 finder-like runs with four light modules on one side
///
/// Modules outside the symbol count as light (quiet zone).
fn finder_like_penalty(line: &[bool]) -> u32 {
    const LEFT: [bool; 11] = [
        false, false, false, false, true, false, true, true, true, false, true,
    ];
    const RIGHT: [bool; 11] = [
        true, false, true, true, true, false, true, false, false, false, false,
    ];

    let mut padded = vec![false; 4];
    padded.extend_from_slice(line);
    padded.extend_from_slice(&[false; 4]);

    let mut score = 0;
    for window in padded.windows(11) {
        if window == LEFT {
            score += PENALTY_N3;
        }
        if window == RIGHT {
            score += PENALTY_N3;
        }
    }
    score
}

/// N4: deviation of the dark ratio from 50%, in 5% steps
fn balance_penalty(dark: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let steps = (dark * 20).abs_diff(total * 10) / total;
    PENALTY_N4 * steps as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::draw_function_patterns;
    use crate::encoder::placement::place_codewords;
    use crate::models::Version;

    fn unmasked_v1() -> ModuleGrid {
        let mut grid = draw_function_patterns(Version::new(1).unwrap());
        let codewords: Vec<u8> = (0..26u8).map(|i| i.wrapping_mul(37)).collect();
        place_codewords(&mut grid, &codewords);
        grid
    }

    #[test]
    fn test_apply_mask_only_touches_data() {
        let base = unmasked_v1();
        let mut masked = base.clone();
        apply_mask(&mut masked, MaskPattern::Pattern0);
        for r in 0..21 {
            for c in 0..21 {
                let expect_flip = !base.is_function(r, c) && (r + c) % 2 == 0;
                assert_eq!(masked.is_dark(r, c) != base.is_dark(r, c), expect_flip);
            }
        }
    }

    #[test]
    fn test_mask_is_an_involution() {
        let base = unmasked_v1();
        for mask in MaskPattern::ALL {
            let mut grid = base.clone();
            apply_mask(&mut grid, mask);
            apply_mask(&mut grid, mask);
            assert_eq!(grid, base);
        }
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty(&[true; 4]), 0);
        assert_eq!(run_penalty(&[true; 5]), 3);
        assert_eq!(run_penalty(&[false; 7]), 5);
        let mixed = [true, true, true, true, true, false, true, true, true, true, true, true];
        assert_eq!(run_penalty(&mixed), 3 + 4);
    }

    #[test]
    fn test_finder_like_penalty() {
        let line = [
            true, false, true, true, true, false, true, false, false, false, false, true,
        ];
        // Pattern at the start has light padding on its left and a light run on its right
        assert_eq!(finder_like_penalty(&line), 80);
        assert_eq!(finder_like_penalty(&[true, false, true, false]), 0);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(balance_penalty(50, 100), 0);
        assert_eq!(balance_penalty(54, 100), 0);
        assert_eq!(balance_penalty(55, 100), 10);
        assert_eq!(balance_penalty(100, 100), 100);
        assert_eq!(balance_penalty(0, 100), 100);
    }

    #[test]
    fn test_select_mask_is_minimal_and_parallel_agrees() {
        let base = unmasked_v1();
        let (mask, grid, score) = select_mask(&base, ECLevel::M, false);
        for candidate in MaskPattern::ALL {
            let other = penalty_score(&masked_candidate(&base, ECLevel::M, candidate));
            assert!(score <= other);
            if other == score {
                assert!(mask <= candidate);
            }
        }
        assert_eq!(penalty_score(&grid), score);

        let (par_mask, par_grid, par_score) = select_mask(&base, ECLevel::M, true);
        assert_eq!((par_mask, par_score), (mask, score));
        assert_eq!(par_grid, grid);
    }
}
