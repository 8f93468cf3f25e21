//! Camera + detector lifecycle.
//!
//! Capture runs on its own thread because reading a camera frame blocks.
//! The newest detector result is dropped into a single-slot [`Mailbox`]
//! (latest value wins) and the render loop picks it up once per frame.
//! Start/failure notifications travel over a channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use parking_lot::Mutex;

use crate::camera::{CameraCapture, FrameSource};
use crate::config::CaptureParams;
use crate::error::Error;
use crate::target::HandFeed;
use crate::vision::{LandmarkDetector, SkinTipDetector};

/// Consecutive frame errors tolerated before the capture is declared dead.
const MAX_FRAME_ERRORS: u32 = 30;

/// Single-slot hand-off between threads. Publishing overwrites any value
/// nobody has taken yet.
pub struct Mailbox<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self { slot: Arc::new(Mutex::new(None)) }
    }
}

impl<T> Mailbox<T> {
    pub fn publish(&self, value: T) {
        *self.slot.lock() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// Hand tracking switched off in config; pointer only.
    Disabled,
    /// Waiting for the user to start the camera.
    Idle,
    Starting,
    Running,
    /// Start or stream failed; the user may retry.
    Failed,
}

enum CaptureEvent {
    Started { width: u32, height: u32 },
    Failed(String),
}

struct Worker {
    feed: Mailbox<HandFeed>,
    events: Receiver<CaptureEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Signal the thread to stop. With `wait` the thread is joined; without it
    /// the thread is detached and exits on its own once `open` returns.
    fn shutdown(&mut self, wait: bool) {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else { return };
        if !wait {
            log::debug!("camera still opening; detaching capture thread");
            return;
        }
        if handle.join().is_err() {
            log::error!("capture thread panicked");
        }
    }
}

pub struct HandTracker {
    params: CaptureParams,
    state: CaptureState,
    worker: Option<Worker>,
}

impl HandTracker {
    pub fn new(params: CaptureParams) -> Self {
        let state = if params.enabled { CaptureState::Idle } else { CaptureState::Disabled };
        Self { params, state, worker: None }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Start the default camera with the built-in fingertip detector.
    pub fn start(&mut self) -> Result<(), Error> {
        let p = self.params;
        self.start_with(
            move || CameraCapture::new(p.device_index, p.width, p.height, p.fps),
            SkinTipDetector::default(),
        )
    }

    /// Start capture on a worker thread. `open` runs on that thread, so the
    /// source itself never has to cross threads.
    ///
    /// Calling this while a capture is starting or running is ignored with a warning.
    pub fn start_with<S, O, D>(&mut self, open: O, detector: D) -> Result<(), Error>
    where
        S: FrameSource + 'static,
        O: FnOnce() -> Result<S, Error> + Send + 'static,
        D: LandmarkDetector + Send + 'static,
    {
        match self.state {
            CaptureState::Disabled => {
                log::warn!("hand tracking is disabled; ignoring start request");
                return Ok(());
            }
            CaptureState::Starting | CaptureState::Running => {
                log::warn!("capture already started; ignoring duplicate start");
                return Ok(());
            }
            CaptureState::Idle | CaptureState::Failed => {}
        }

        // A failed worker may still need joining before we replace it.
        if let Some(mut old) = self.worker.take() {
            old.shutdown(true);
        }

        let feed = Mailbox::default();
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, events) = unbounded();

        let spawned = {
            let feed = feed.clone();
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("hand-capture".into())
                .spawn(move || run_capture(open, detector, feed, tx, stop))
        };
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.state = CaptureState::Failed;
                return Err(Error::from(e));
            }
        };

        log::info!("starting camera {}", self.params.device_index);
        self.state = CaptureState::Starting;
        self.worker = Some(Worker { feed, events, stop, handle: Some(handle) });
        Ok(())
    }

    /// Drain lifecycle events and take the newest hand feed, if any.
    /// Call once per frame.
    pub fn poll(&mut self) -> Option<HandFeed> {
        let worker = self.worker.as_mut()?;

        loop {
            match worker.events.try_recv() {
                Ok(CaptureEvent::Started { width, height }) => {
                    log::info!("hand tracking ready ({width}x{height})");
                    self.state = CaptureState::Running;
                }
                Ok(CaptureEvent::Failed(reason)) => {
                    log::error!("Camera or model start failed: {reason}");
                    self.state = CaptureState::Failed;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state == CaptureState::Starting || self.state == CaptureState::Running {
                        log::error!("capture thread exited unexpectedly");
                        self.state = CaptureState::Failed;
                    }
                    break;
                }
            }
        }

        if self.state == CaptureState::Running {
            worker.feed.take()
        } else {
            None
        }
    }
}

impl Drop for HandTracker {
    // A camera open can block for seconds; quitting must not wait on it.
    fn drop(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown(self.state != CaptureState::Starting);
        }
    }
}

/// Body of the capture thread: open, announce, then detect until told to stop.
fn run_capture<S, O, D>(open: O, mut detector: D, feed: Mailbox<HandFeed>, tx: Sender<CaptureEvent>, stop: Arc<AtomicBool>)
where
    S: FrameSource,
    O: FnOnce() -> Result<S, Error>,
    D: LandmarkDetector,
{
    let mut source = match open() {
        Ok(source) => source,
        Err(e) => {
            let _ = tx.send(CaptureEvent::Failed(e.to_string()));
            return;
        }
    };

    let (width, height) = source.resolution();
    if stop.load(Ordering::Acquire) || tx.send(CaptureEvent::Started { width, height }).is_err() {
        return; // tracker already gone
    }

    let mut errors = 0u32;
    while !stop.load(Ordering::Acquire) {
        match source.next_frame() {
            Ok(frame) => {
                errors = 0;
                let predictions = detector.detect(&frame);
                feed.publish(HandFeed { source_width: frame.width(), source_height: frame.height(), predictions });
            }
            Err(e) => {
                errors += 1;
                log::warn!("{e}");
                if errors >= MAX_FRAME_ERRORS {
                    let _ = tx.send(CaptureEvent::Failed(format!("{errors} frame errors in a row: {e}")));
                    return;
                }
            }
        }
    }
}
