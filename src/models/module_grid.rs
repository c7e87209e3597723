use super::BitMatrix;
use crate::error::{Error, Result};

/// State of a single module while a symbol is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not assigned yet
    #[default]
    Unset,
    /// Light (background) module
    Light,
    /// Dark (foreground) module
    Dark,
}

impl Module {
    /// Module for a boolean colour (true = dark)
    pub fn from_dark(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// True for `Dark`
    pub fn is_dark(self) -> bool {
        self == Module::Dark
    }
}

/// Square grid of tri-state modules plus the function-pattern map
///
/// Cells written through [`ModuleGrid::set_function`] are fixed patterns and
/// are never touched by data placement or masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<Module>,
    function: BitMatrix,
}

impl ModuleGrid {
    /// Create an all-`Unset` grid with side `size`
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
            function: BitMatrix::new(size, size),
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Module {
        self.modules[row * self.size + col]
    }

    /// True when (row, col) is dark
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_dark()
    }

    /// True when (row, col) is still unassigned
    pub fn is_unset(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Module::Unset
    }

    /// True when (row, col) belongs to a function pattern
    pub fn is_function(&self, row: usize, col: usize) -> bool {
        self.function.get(row, col)
    }

    /// Write a function-pattern module
    pub fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row * self.size + col] = Module::from_dark(dark);
        self.function.set(row, col, true);
    }

    /// Write a data module
    pub fn set_data(&mut self, row: usize, col: usize, dark: bool) {
        debug_assert!(!self.is_function(row, col));
        self.modules[row * self.size + col] = Module::from_dark(dark);
    }

    /// Invert a data module in place
    pub(crate) fn flip(&mut self, row: usize, col: usize) {
        let cell = &mut self.modules[row * self.size + col];
        *cell = match *cell {
            Module::Dark => Module::Light,
            Module::Light => Module::Dark,
            Module::Unset => Module::Unset,
        };
    }

    /// Number of modules that do not belong to a function pattern
    pub fn data_modules_count(&self) -> usize {
        self.size * self.size - self.function.count_ones()
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// Check that every module is resolved to dark or light
    pub fn finish(self) -> Result<Self> {
        if let Some(index) = self.modules.iter().position(|m| *m == Module::Unset) {
            return Err(Error::UnresolvedModule {
                row: index / self.size,
                col: index % self.size,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unset() {
        let grid = ModuleGrid::new(21);
        assert_eq!(grid.size(), 21);
        assert!(grid.is_unset(0, 0));
        assert!(grid.is_unset(20, 20));
        assert_eq!(grid.data_modules_count(), 21 * 21);
    }

    #[test]
    fn test_function_and_data_modules() {
        let mut grid = ModuleGrid::new(21);
        grid.set_function(0, 0, true);
        grid.set_data(5, 5, false);
        assert!(grid.is_function(0, 0));
        assert!(!grid.is_function(5, 5));
        assert_eq!(grid.get(0, 0), Module::Dark);
        assert_eq!(grid.get(5, 5), Module::Light);

        grid.flip(5, 5);
        assert!(grid.is_dark(5, 5));
        assert_eq!(grid.dark_count(), 2);
        assert_eq!(grid.data_modules_count(), 21 * 21 - 1);
    }

    #[test]
    fn test_finish_reports_first_unset() {
        let mut grid = ModuleGrid::new(2);
        grid.set_data(0, 0, true);
        grid.set_data(0, 1, false);
        match grid.clone().finish() {
            Err(Error::UnresolvedModule { row, col }) => assert_eq!((row, col), (1, 0)),
            other => panic!("expected UnresolvedModule, got {:?}", other),
        }

        grid.set_data(1, 0, true);
        grid.set_data(1, 1, true);
        assert!(grid.finish().is_ok());
    }
}
