// src/resize.rs

//! Window-resize notifications.
//!
//! The kernel delivers `SIGWINCH` when the terminal window changes size.
//! [`subscribe`] blocks the signal for the process and hands back a blocking
//! stream of notifications; [`spawn_refresh_listener`] drains that stream on
//! a dedicated thread, refreshing the shared geometry on each event. The
//! listener is the sole writer after startup and communicates with the
//! render loop only through the shared snapshot, so it never blocks
//! rendering. It has no shutdown path of its own; it lives until the
//! process exits.

use crate::geometry::GeometryTracker;
use anyhow::{Context, Result};
use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{SigSet, Signal};
use std::io;
use std::thread;

/// A blocking stream of window-size-change notifications. Each `next()`
/// parks the calling thread until the next `SIGWINCH` arrives.
pub struct ResizeSignals {
    set: SigSet,
}

/// Blocks `SIGWINCH` for the calling thread and returns the notification
/// stream.
///
/// Must be called before any other threads are spawned: the signal mask is
/// inherited, so later threads (the listener included) start with the
/// signal blocked and `SigSet::wait` in the listener is the only consumer.
pub fn subscribe() -> Result<ResizeSignals> {
    let mut set = SigSet::empty();
    set.add(Signal::SIGWINCH);
    set.thread_block()
        .context("failed to block SIGWINCH for resize notifications")?;
    Ok(ResizeSignals { set })
}

impl Iterator for ResizeSignals {
    type Item = ();

    fn next(&mut self) -> Option<()> {
        loop {
            match self.set.wait() {
                Ok(_) => return Some(()),
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    warn!("resize signal wait failed: {}", e);
                    return None;
                }
            }
        }
    }
}

/// Spawns the listener thread: one `refresh()` per notification. A failed
/// refresh is logged and the stale snapshot stays in place; the caller's
/// render loop decides whether stale geometry is still usable.
pub fn spawn_refresh_listener(
    tracker: GeometryTracker,
    signals: ResizeSignals,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("resize-listener".to_string())
        .spawn(move || {
            for () in signals {
                match tracker.refresh() {
                    Ok(snapshot) => debug!("geometry refreshed on resize: {:?}", snapshot),
                    Err(e) => warn!("resize refresh failed, keeping last geometry: {}", e),
                }
            }
        })
}
