//! Frame and image types delivered by the hand-tracking sensor.

/// A single grayscale image from one of the sensor's cameras.
///
/// Pixel data is row-major, one byte per pixel, top row first.
#[derive(Clone)]
pub struct SensorImage {
    /// Raw pixel data.
    pixels: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
}

impl SensorImage {
    /// Creates a new image with the given dimensions.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel at `(x, y)` without bounds checking beyond the slice.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == (self.width as usize) * (self.height as usize)
    }
}

impl std::fmt::Debug for SensorImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

/// One tick of sensor input: a monotonic timestamp and the camera images
/// captured at that instant.
///
/// Frames are borrowed by the recognizer for the duration of a single
/// `process` call; no reference to the frame or its images survives the call.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Monotonic capture timestamp in microseconds.
    timestamp_us: i64,
    /// Camera images for this tick (stereo sensors produce two).
    images: Vec<SensorImage>,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(timestamp_us: i64, images: Vec<SensorImage>) -> Self {
        Self {
            timestamp_us,
            images,
        }
    }

    /// Returns the capture timestamp in microseconds.
    #[inline]
    pub fn timestamp_us(&self) -> i64 {
        self.timestamp_us
    }

    /// Returns the capture timestamp in seconds.
    #[inline]
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_us as f64 * 1e-6
    }

    /// Returns the images captured for this frame.
    #[inline]
    pub fn images(&self) -> &[SensorImage] {
        &self.images
    }

    /// Returns true if the frame carries at least two valid images of
    /// matching dimensions, the minimum the brightness extractor needs.
    pub fn has_stereo_pair(&self) -> bool {
        if self.images.len() < 2 {
            return false;
        }
        let (a, b) = (&self.images[0], &self.images[1]);
        a.is_valid() && b.is_valid() && a.width() == b.width() && a.height() == b.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_valid_when_buffer_matches() {
        let image = SensorImage::new(vec![0u8; 64 * 48], 64, 48);
        assert!(image.is_valid());
    }

    #[test]
    fn test_image_invalid_when_buffer_short() {
        let image = SensorImage::new(vec![0u8; 100], 64, 48);
        assert!(!image.is_valid());
    }

    #[test]
    fn test_frame_needs_two_images() {
        let image = SensorImage::new(vec![0u8; 64 * 48], 64, 48);
        let frame = Frame::new(1_000, vec![image]);
        assert!(!frame.has_stereo_pair());
    }

    #[test]
    fn test_frame_rejects_mismatched_dimensions() {
        let a = SensorImage::new(vec![0u8; 64 * 48], 64, 48);
        let b = SensorImage::new(vec![0u8; 32 * 48], 32, 48);
        let frame = Frame::new(1_000, vec![a, b]);
        assert!(!frame.has_stereo_pair());
    }

    #[test]
    fn test_timestamp_conversion() {
        let frame = Frame::new(2_500_000, Vec::new());
        assert!((frame.timestamp_secs() - 2.5).abs() < 1e-9);
    }
}
