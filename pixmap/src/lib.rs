use {
    bytemuck as bm,
    util::row_major,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bm::Pod, bm::Zeroable)]
#[repr(C)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0x00, 0x00, 0x00]);
    pub const WHITE: Rgb = Rgb([0xff, 0xff, 0xff]);

    pub fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb([r, g, b])
    }

    /// Sum of the three channels, in `0..=765`.
    pub fn channel_sum(self) -> u32 {
        let Rgb([r, g, b]) = self;
        r as u32 + g as u32 + b as u32
    }
}

mod meta {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Meta {
        wide: usize,
        high: usize,
    }

    impl Meta {
        pub fn try_new(wide: u32, high: u32) -> Option<Meta> {
            let wide = usize::try_from(wide).ok()?;
            let high = usize::try_from(high).ok()?;
            wide.checked_mul(high)?;
            Some(Meta{wide, high})
        }

        pub fn index(&self, [x, y]: [u32; 2]) -> Option<usize> {
            let x: usize = x.try_into().ok()?;
            let y: usize = y.try_into().ok()?;
            if x >= self.wide || y >= self.high {return None}
            Some(self.wide * y + x)
        }

        pub fn len(&self) -> usize {
            self.wide * self.high
        }

        pub fn wide(&self) -> usize { self.wide }
        pub fn high(&self) -> usize { self.high }
    }
}

use meta::Meta;

/// Tightly packed RGB raster, rows top to bottom.
pub struct Pixmap<Pixels> {
    pixels: Pixels,
    meta: Meta,
}

impl<Pixels> Pixmap<Pixels> {
    pub fn wide(&self) -> u32 { self.meta.wide() as u32 }
    pub fn high(&self) -> u32 { self.meta.high() as u32 }
    pub fn dims(&self) -> [u32; 2] { [self.wide(), self.high()] }
}

impl Pixmap<Vec<Rgb>> {
    pub fn new(wide: u32, high: u32, fill: Rgb) -> Self {
        let meta = Meta::try_new(wide, high).expect("pixmap dimensions overflow");
        let pixels = vec![fill; meta.len()];
        Self{pixels, meta}
    }

    pub fn new_from_fn(wide: u32, high: u32, mut f: impl FnMut([u32; 2]) -> Rgb) -> Self {
        let mut pm = Self::new(wide, high, Rgb::BLACK);
        for (x, y) in row_major(0..wide, 0..high) {
            let xy = [x, y];
            pm.put(xy, f(xy));
        }
        pm
    }

    /// Builds a pixmap from packed 8-bit RGB triples, as produced by
    /// `image::RgbImage::into_raw`.
    pub fn from_rgb8(wide: u32, high: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() % 3 != 0 {return None}
        let pixels: &[Rgb] = bm::cast_slice(bytes);
        Self::new_from_pixels(pixels.to_vec(), wide, high)
    }
}

impl<Pixels> Pixmap<Pixels> where Pixels: AsRef<[Rgb]> {
    pub fn new_from_pixels(pixels: Pixels, wide: u32, high: u32) -> Option<Self> {
        let meta = Meta::try_new(wide, high)?;
        Pixmap{pixels, meta}.validate()
    }

    fn pixels(&self) -> &[Rgb] {
        self.pixels.as_ref()
    }

    fn validate(self) -> Option<Self> {
        (self.pixels().len() == self.meta.len()).then_some(self)
    }

    pub fn get(&self, at: impl Into<[u32; 2]>) -> Option<Rgb> {
        let index = self.meta.index(at.into())?;
        Some(self.pixels()[index])
    }

    #[cfg(test)]
    fn as_slice(&self) -> &[Rgb] {
        self.pixels()
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        // chunks() rejects a zero chunk size
        let wide = self.meta.wide().max(1);
        self.pixels().chunks(wide)
    }

    /// Resamples to `wide`×`high` by picking the source pixel whose centre is
    /// nearest each destination pixel centre. No blending.
    pub fn resized_nearest(&self, wide: u32, high: u32) -> Pixmap<Vec<Rgb>> {
        let [src_wide, src_high] = self.dims();
        if src_wide == 0 || src_high == 0 {
            return Pixmap::new(wide, high, Rgb::BLACK);
        }

        let sx = nearest_lut(src_wide, wide);
        let sy = nearest_lut(src_high, high);
        Pixmap::new_from_fn(wide, high, |[x, y]| {
            self.get([sx[x as usize], sy[y as usize]]).unwrap_or(Rgb::BLACK)
        })
    }
}

impl<Pixels> Pixmap<Pixels> where Pixels: AsMut<[Rgb]> + AsRef<[Rgb]> {
    fn pixels_mut(&mut self) -> &mut [Rgb] {
        self.pixels.as_mut()
    }

    pub fn put(&mut self, at: impl Into<[u32; 2]>, p: Rgb) {
        let index = self.meta.index(at.into()).expect("pixel out of bounds");
        self.pixels_mut()[index] = p;
    }
}

/// Source coordinate for each destination coordinate along one axis.
fn nearest_lut(src: u32, dst: u32) -> Vec<u32> {
    let (src, dst) = (src as u64, dst as u64);
    (0..dst)
        .map(|d| ((2 * d + 1) * src / (2 * dst)).min(src - 1) as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(wide: u32, high: u32) -> Pixmap<Vec<Rgb>> {
        Pixmap::new_from_fn(wide, high, |[x, y]| Rgb::new(x as u8, y as u8, 0))
    }

    #[test]
    fn get_and_put() {
        let mut pm = Pixmap::new(3, 2, Rgb::WHITE);
        assert_eq!(pm.dims(), [3, 2]);
        assert_eq!(pm.get([2, 1]), Some(Rgb::WHITE));
        assert_eq!(pm.get([3, 0]), None);
        assert_eq!(pm.get([0, 2]), None);

        pm.put([1, 1], Rgb::new(1, 2, 3));
        assert_eq!(pm.get([1, 1]), Some(Rgb::new(1, 2, 3)));
        assert_eq!(pm.as_slice()[4], Rgb::new(1, 2, 3));
    }

    #[test]
    fn from_rgb8_checks_length() {
        let bytes = [0, 0, 0, 255, 255, 255, 10, 20, 30, 40, 50, 60];
        let pm = Pixmap::from_rgb8(2, 2, &bytes).unwrap();
        assert_eq!(pm.get([1, 0]), Some(Rgb::WHITE));
        assert_eq!(pm.get([0, 1]), Some(Rgb::new(10, 20, 30)));

        assert!(Pixmap::from_rgb8(2, 2, &bytes[..9]).is_none());
        assert!(Pixmap::from_rgb8(2, 2, &bytes[..10]).is_none());
        assert!(Pixmap::from_rgb8(3, 2, &bytes).is_none());
    }

    #[test]
    fn rows_are_row_major() {
        let pm = ramp(3, 2);
        let rows = pm.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], [Rgb::new(0, 1, 0), Rgb::new(1, 1, 0), Rgb::new(2, 1, 0)]);
    }

    #[test]
    fn resize_same_size_is_identity() {
        let pm = ramp(5, 4);
        let same = pm.resized_nearest(5, 4);
        assert_eq!(same.as_slice(), pm.as_slice());
    }

    #[test]
    fn resize_halves_by_sampling() {
        let pm = ramp(4, 4);
        let half = pm.resized_nearest(2, 2);
        assert_eq!(half.dims(), [2, 2]);
        // destination centres 0.5 and 1.5 land on source pixels 1 and 3
        assert_eq!(half.get([0, 0]), Some(Rgb::new(1, 1, 0)));
        assert_eq!(half.get([1, 0]), Some(Rgb::new(3, 1, 0)));
        assert_eq!(half.get([1, 1]), Some(Rgb::new(3, 3, 0)));
    }

    #[test]
    fn resize_doubles_by_repeating() {
        let pm = ramp(2, 1);
        let double = pm.resized_nearest(4, 2);
        let xs = double.rows()
            .map(|row| row.iter().map(|p| p.0[0]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(xs, [[0u8, 0, 1, 1], [0, 0, 1, 1]]);
    }

    #[test]
    fn resize_never_blends() {
        let pm = Pixmap::new_from_fn(3, 3, |[x, y]| {
            if (x + y) % 2 == 0 {Rgb::BLACK} else {Rgb::WHITE}
        });
        let out = pm.resized_nearest(7, 5);
        assert!(out.as_slice().iter().all(|&p| p == Rgb::BLACK || p == Rgb::WHITE));
    }

    #[test]
    fn nearest_lut_stays_in_bounds() {
        for src in 1..9 {
            for dst in 1..9 {
                assert!(nearest_lut(src, dst).iter().all(|&s| s < src));
            }
        }
    }
}
