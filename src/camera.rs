// Opens a camera and hands back decoded RGB frames for the fingertip detector.
// The stream lives on the capture worker thread; nothing here touches the window.

use crate::error::Error;

use image::RgbImage;
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that yields RGB frames at a fixed resolution.
pub trait FrameSource {
    /// Resolution the source actually delivers.
    fn resolution(&self) -> (u32, u32);
    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<RgbImage, Error>;
}

// A small wrapper around nokhwa::Camera so the capture loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution/frame rate and start streaming.
    pub fn new(index: u32, width: u32, height: u32, fps: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            fps,
        );

        // Ask for RGB frames in the format closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // Fails if no device exists (or permission is denied).
        let mut cam =
            Camera::new(idx, req).map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream might choose a slightly different resolution.
        let actual = cam.resolution();
        log::info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }
}

impl FrameSource for CameraCapture {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<RgbImage, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // Rebuild from raw bytes so we don't depend on nokhwa's `image` version.
        let (w, h) = decoded.dimensions();
        RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| Error::CameraFrame(format!("Decode RGB: short buffer for {w}x{h}")))
    }
}
