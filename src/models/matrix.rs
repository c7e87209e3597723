/// Compact square-or-rectangular bit matrix, addressed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions, all bits clear
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (row, col); out-of-range reads are false
    pub fn get(&self, row: usize, col: usize) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        let index = row * self.width + col;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (row, col); out-of-range writes are ignored
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if col >= self.width || row >= self.height {
            return;
        }
        let index = row * self.width + col;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
