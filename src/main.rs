// What you SEE:
// • A glowing trail of dots follows your mouse and slowly fades.
// • Faster motion draws fatter dots; 1/2/3 switch the color scheme.
// • Click toggles a pulsing ring at the trail head.
// • H starts the camera: point a finger at it and the trail follows your fingertip
//   (hand height then picks the color scheme). ESC quits.

mod camera;
mod color;
mod config;
mod draw;
mod error;
mod session;
mod sketch;
mod smoothing;
mod target;
mod tracker;
mod trail;
mod types;
mod vision;

#[cfg(test)]
mod tests;

use config::Config;
use draw::Drawer;
use error::Error;
use session::Session;
use sketch::Sketch;
use std::time::{Duration, Instant};
use tracker::HandTracker;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- One sketch per process --- */
    let _session = match Session::acquire() {
        Ok(session) => session,
        Err(Error::AlreadyInitialized) => {
            log::warn!("Mouse Trails Synth already loaded; ignoring duplicate.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let config = Config::from_env()?;

    /* --- Window + canvas ---
       Visual: window opens on a dark background. */
    let mut drawer = Drawer::new(&config.title, config.width, config.height, config.target_fps)?;
    let mut screen = FrameBuffer::filled(config.width, config.height, config.background);
    log::info!("window {}x{} open", config.width, config.height);

    let mut sketch = Sketch::new(&config);
    let mut tracker = HandTracker::new(config.capture);
    sketch.set_capture(tracker.state());

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    let mut mouse_was_down = false;
    let mut last_source = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Resize: new canvas, same trail (stored positions are not rescaled). */
        let (w, h) = drawer.size();
        if screen.fit(w, h, config.background) {
            log::debug!("canvas resized to {w}x{h}");
        }

        /* 2) Inputs */
        if let Some(p) = drawer.mouse_pos() {
            sketch.pointer_moved(p);
        }
        let mouse_down = drawer.left_mouse_down();
        if mouse_down && !mouse_was_down {
            sketch.pointer_pressed(); // visual: pulse ring on/off
        }
        mouse_was_down = mouse_down;

        if let Some(key) = drawer.mode_key_pressed() {
            sketch.key_pressed(key);
        }

        let capture_before = tracker.state();
        if drawer.h_pressed_once() {
            if let Err(e) = tracker.start() {
                log::error!("Camera or model start failed: {e}");
            }
        }

        /* 3) Camera side: lifecycle changes + newest hand feed. */
        let feed = tracker.poll();
        if tracker.state() != capture_before {
            sketch.set_capture(tracker.state()); // visual: HUD hint changes
        }
        if let Some(feed) = feed {
            sketch.receive_hand(feed);
        }

        /* 4) Draw the frame and show it. */
        let report = sketch.draw(&mut screen);
        drawer.present(&screen)?;
        if last_source != Some(report.source) {
            log::info!("input: {:?} (frame {})", report.source, report.frame);
            last_source = Some(report.source);
        }
        log::trace!("raw {:?} -> stabilized {:?}", report.raw_target, report.target);

        /* 5) FPS (debug log once per second) */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1} | trail {} samples", frames_this_second as f32 / secs, sketch.trail().len());
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
