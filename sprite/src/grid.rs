use {
    pixmap::{Pixmap, Rgb},
    std::fmt,
};

/// Brightness cut between foreground and background.
///
/// Any integer is accepted: at or below zero nothing is foreground, above 255
/// everything is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(pub i32);

impl Default for Threshold {
    fn default() -> Self { Threshold(128) }
}

impl Threshold {
    /// `1` if the pixel is darker than the threshold, else `0`.
    pub fn classify(self, px: Rgb) -> u8 {
        // mean < t  <=>  sum < 3t, without leaving the integers
        let sum = px.channel_sum() as i64;
        (sum < 3 * self.0 as i64) as u8
    }
}

/// Rectangular grid of 0/1 cells, one row per image row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    wide: usize,
    rows: Vec<Vec<u8>>,
}

impl PixelGrid {
    pub fn from_pixmap<Pixels>(image: &Pixmap<Pixels>, threshold: Threshold) -> Self
    where
        Pixels: AsRef<[Rgb]>,
    {
        let wide = image.wide() as usize;
        let rows = image.rows()
            .take(image.high() as usize)
            .map(|row| row.iter().map(|&px| threshold.classify(px)).collect())
            .collect();
        PixelGrid{wide, rows}
    }

    /// Builds a grid from literal rows. Fails on ragged rows or cells other
    /// than 0 and 1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Option<Self> {
        let wide = rows.first().map_or(0, Vec::len);
        let rectangular = rows.iter().all(|row| row.len() == wide);
        let binary = rows.iter().flatten().all(|&v| v <= 1);
        (rectangular && binary).then_some(PixelGrid{wide, rows})
    }

    pub fn wide(&self) -> usize { self.wide }
    pub fn high(&self) -> usize { self.rows.len() }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.wide * self.high()
    }

    pub fn filled(&self) -> usize {
        self.rows.iter().flatten().filter(|&&v| v == 1).count()
    }
}

/// Post-conversion statistics, printed as comment lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub wide: usize,
    pub high: usize,
    pub total: usize,
    pub filled: usize,
}

impl Summary {
    pub fn of(grid: &PixelGrid) -> Self {
        Summary {
            wide: grid.wide(),
            high: grid.high(),
            total: grid.total(),
            filled: grid.filled(),
        }
    }

    pub fn filled_percent(&self) -> f64 {
        if self.total == 0 {return 0.}
        self.filled as f64 / self.total as f64 * 100.
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "// Dimensions: {}x{}", self.wide, self.high)?;
        writeln!(f, "// Total pixels: {}", self.total)?;
        write!(f, "// Filled pixels: {} ({:.1}%)", self.filled, self.filled_percent())
    }
}
