use pixl_engine::paint::Color;

/// Fixed set of drawing colors with one selected entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    current: usize,
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            current: 0,
            colors: vec![Color::BLACK, Color::RED, Color::GREEN, Color::BLUE],
        }
    }
}

impl Palette {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn color_by_index(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn current_color(&self) -> Color {
        self.colors[self.current]
    }

    /// Selects the entry at `index`; unknown indices leave the selection as is.
    pub fn select_color_by_index(&mut self, index: usize) -> bool {
        if index >= self.colors.len() {
            return false;
        }
        self.current = index;
        true
    }
}
