/// CSS-pixel size of the render surface plus the effective pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio, max_pixel_ratio),
        }
    }

    /// Width over height, or `None` for a degenerate zero-height surface.
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }

    /// Backing-store size in device pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        (
            (f64::from(self.width) * self.pixel_ratio).round() as u32,
            (f64::from(self.height) * self.pixel_ratio).round() as u32,
        )
    }
}

/// `min(device_pixel_ratio, max)`, treating non-positive or NaN ratios as 1.
pub fn clamp_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if device_pixel_ratio.is_nan() || device_pixel_ratio <= 0.0 {
        return 1.0_f64.min(max);
    }
    device_pixel_ratio.min(max)
}
