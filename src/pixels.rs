//! RGBA pixel buffers and the sampling helpers the analyzers share.

use crate::error::{Error, Result};

/// Red weight of the perceptual luminance approximation.
pub const LUMA_R: f64 = 0.21;
/// Green weight of the perceptual luminance approximation.
pub const LUMA_G: f64 = 0.72;
/// Blue weight of the perceptual luminance approximation.
pub const LUMA_B: f64 = 0.07;

/// Luminance of an RGBA sample. Alpha is ignored.
#[inline]
pub fn luminance(px: [u8; 4]) -> f64 {
    LUMA_R * px[0] as f64 + LUMA_G * px[1] as f64 + LUMA_B * px[2] as f64
}

/// Read access to an RGBA image.
pub trait ImageAccess {
    /// RGBA sample at (x, y). Returns transparent black for out-of-bounds pixels.
    fn get_pixel(&self, x: i64, y: i64) -> [u8; 4];

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn luminance_at(&self, x: i64, y: i64) -> f64 {
        luminance(self.get_pixel(x, y))
    }
}

/// Row-major RGBA buffer with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap `width * height * 4` RGBA bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// A buffer filled with a single colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_fn(width, height, |_, _| rgba)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Copy out a sub-region, clipped to the buffer.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let w = width.min(self.width - x0);
        let h = height.min(self.height - y0);

        let mut data = Vec::with_capacity(w as usize * h as usize * 4);
        for row in y0..y0 + h {
            let start = (row as usize * self.width as usize + x0 as usize) * 4;
            data.extend_from_slice(&self.data[start..start + w as usize * 4]);
        }
        Self {
            data,
            width: w,
            height: h,
        }
    }

    /// Resample the source rectangle into a `dst_width` x `dst_height` buffer
    /// with bilinear interpolation. Source reads clamp to the buffer edge.
    pub fn resample(
        &self,
        src_x: f64,
        src_y: f64,
        src_width: f64,
        src_height: f64,
        dst_width: u32,
        dst_height: u32,
    ) -> Self {
        if self.is_empty() {
            return Self::filled(dst_width, dst_height, [0, 0, 0, 0]);
        }
        let scale_x = src_width / dst_width.max(1) as f64;
        let scale_y = src_height / dst_height.max(1) as f64;

        Self::from_fn(dst_width, dst_height, |dx, dy| {
            // Sample at destination pixel centres.
            let sx = src_x + (dx as f64 + 0.5) * scale_x - 0.5;
            let sy = src_y + (dy as f64 + 0.5) * scale_y - 0.5;
            self.sample_bilinear(sx, sy)
        })
    }

    /// Scale down (never up) to fit inside `max_width` x `max_height`,
    /// preserving aspect ratio. Returns the new buffer and the scale factor applied.
    pub fn fit_within(&self, max_width: u32, max_height: u32) -> (Self, f64) {
        if self.is_empty() {
            return (self.clone(), 1.0);
        }
        let ratio = (max_width as f64 / self.width as f64)
            .min(max_height as f64 / self.height as f64)
            .min(1.0);
        if ratio >= 1.0 {
            return (self.clone(), 1.0);
        }
        let w = ((self.width as f64 * ratio).round() as u32).max(1);
        let h = ((self.height as f64 * ratio).round() as u32).max(1);
        let resized = self.resample(0.0, 0.0, self.width as f64, self.height as f64, w, h);
        (resized, ratio)
    }

    #[inline]
    fn clamped_pixel(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, self.width as i64 - 1);
        let y = y.clamp(0, self.height as i64 - 1);
        self.get_pixel(x, y)
    }

    /// Bilinear interpolation of all four channels for sub-pixel accuracy.
    fn sample_bilinear(&self, x: f64, y: f64) -> [u8; 4] {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let p00 = self.clamped_pixel(x0, y0);
        let p10 = self.clamped_pixel(x0 + 1, y0);
        let p01 = self.clamped_pixel(x0, y0 + 1);
        let p11 = self.clamped_pixel(x0 + 1, y0 + 1);

        let mut out = [0u8; 4];
        for c in 0..4 {
            let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
            let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
            out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

impl ImageAccess for PixelBuffer {
    fn get_pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return [0, 0, 0, 0];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffers() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBuffer {
                expected: 16,
                actual: 15,
                ..
            }
        ));
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn luminance_weights() {
        assert!((luminance([255, 255, 255, 0]) - 255.0).abs() < 1e-9);
        assert!((luminance([100, 0, 0, 255]) - 21.0).abs() < 1e-9);
        assert!((luminance([0, 100, 0, 255]) - 72.0).abs() < 1e-9);
        assert!((luminance([0, 0, 100, 255]) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn pixel_access() {
        let img = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]);
        assert_eq!(img.get_pixel(2, 1), [2, 1, 7, 255]);
        assert_eq!(img.get_pixel(-1, 0), [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(3, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn crop_clips_to_buffer() {
        let img = PixelBuffer::from_fn(10, 10, |x, y| [x as u8, y as u8, 0, 255]);
        let c = img.crop(8, 7, 5, 5);
        assert_eq!((c.width(), c.height()), (2, 3));
        assert_eq!(c.get_pixel(0, 0), [8, 7, 0, 255]);
        assert_eq!(c.get_pixel(1, 2), [9, 9, 0, 255]);

        let outside = img.crop(20, 20, 5, 5);
        assert!(outside.is_empty());
    }

    #[test]
    fn resample_uniform_stays_uniform() {
        let img = PixelBuffer::filled(50, 40, [120, 90, 60, 255]);
        let small = img.resample(0.0, 0.0, 50.0, 40.0, 7, 5);
        assert_eq!((small.width(), small.height()), (7, 5));
        assert!(small.as_raw().chunks_exact(4).all(|p| p == [120, 90, 60, 255]));
    }

    #[test]
    fn resample_halves_gradient() {
        // Columns alternate 0/200; halving should average neighbouring pairs.
        let img = PixelBuffer::from_fn(4, 1, |x, _| {
            let v = if x % 2 == 0 { 0 } else { 200 };
            [v, v, v, 255]
        });
        let half = img.resample(0.0, 0.0, 4.0, 1.0, 2, 1);
        assert_eq!(half.get_pixel(0, 0)[0], 100);
        assert_eq!(half.get_pixel(1, 0)[0], 100);
    }

    #[test]
    fn fit_within_never_upscales() {
        let img = PixelBuffer::filled(100, 100, [1, 2, 3, 255]);
        let (same, ratio) = img.fit_within(480, 640);
        assert_eq!(ratio, 1.0);
        assert_eq!(same, img);

        let big = PixelBuffer::filled(960, 960, [1, 2, 3, 255]);
        let (fitted, ratio) = big.fit_within(480, 640);
        assert_eq!(ratio, 0.5);
        assert_eq!((fitted.width(), fitted.height()), (480, 480));
    }
}
