/// Codeword placement into the symbol following the zigzag scan
use crate::models::ModuleGrid;

/// Visit every module in placement order
///
/// Two-column bands from the right edge, alternating upward and downward,
/// skipping the vertical timing column. Within a band the right column
/// comes first.
pub fn zigzag_order(size: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut bands = Vec::with_capacity(size / 2);
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        bands.push(right as usize);
        right -= 2;
    }

    bands.into_iter().flat_map(move |right| {
        let upward = (right + 1) & 2 == 0;
        (0..size).flat_map(move |vert| {
            let row = if upward { size - 1 - vert } else { vert };
            [(row, right), (row, right - 1)]
        })
    })
}

/// Fill every unset module with the next bit of `codewords` (MSB first)
///
/// Modules left over once the stream is exhausted are remainder bits and
/// become light. Returns the number of codeword bits placed.
pub fn place_codewords(grid: &mut ModuleGrid, codewords: &[u8]) -> usize {
    let total_bits = codewords.len() * 8;
    let mut bit_index = 0;
    for (row, col) in zigzag_order(grid.size()) {
        if !grid.is_unset(row, col) {
            continue;
        }
        let dark = bit_index < total_bits
            && (codewords[bit_index / 8] >> (7 - bit_index % 8)) & 1 == 1;
        grid.set_data(row, col, dark);
        bit_index += 1;
    }
    bit_index.min(total_bits)
}
