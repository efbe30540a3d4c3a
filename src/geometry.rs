// src/geometry.rs

//! Terminal geometry tracking.
//!
//! `GeometryTracker` owns the process-wide view of the terminal's character
//! grid and pixel dimensions. The snapshot is an immutable value replaced
//! wholesale on each successful query: readers copy the current value out
//! under a short read lock, so they observe either the old snapshot or the
//! new one in full, never a mix of fields from two refreshes. A refresh that
//! fails leaves the cached snapshot untouched.

use libc::{winsize, TIOCGWINSZ};
use log::debug;
use std::fs::OpenOptions;
use std::io;
use std::mem;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// The controlling terminal device queried for window dimensions.
const DEV_TTY: &str = "/dev/tty";

// Fallback cell dimensions when the ioctl reports zero rows or columns,
// which can happen in some contexts (e.g. certain multiplexers).
const DEFAULT_COLS: u16 = 80;
const DEFAULT_ROWS: u16 = 24;

/// The terminal's size at one point in time: character cells plus the total
/// drawable pixel area. Pixel fields are zero only before the first
/// successful query, or when the terminal does not report pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometrySnapshot {
    pub rows: u16,
    pub cols: u16,
    pub pixel_width: u16,
    pub pixel_height: u16,
}

/// Raised when the controlling terminal cannot be opened or does not answer
/// the size query. Fatal for a session: layout cannot proceed without
/// geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("terminal device {device} unavailable: {source}")]
    DeviceUnavailable {
        device: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Queries and caches terminal geometry. Cloning shares the underlying
/// snapshot, so a listener thread and the render loop see the same value.
#[derive(Debug, Clone)]
pub struct GeometryTracker {
    device: PathBuf,
    shared: Arc<RwLock<GeometrySnapshot>>,
}

impl GeometryTracker {
    /// Tracker against the controlling terminal (`/dev/tty`).
    pub fn new() -> Self {
        Self::with_device(DEV_TTY)
    }

    /// Tracker against an explicit terminal device path.
    pub fn with_device(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            shared: Arc::new(RwLock::new(GeometrySnapshot::default())),
        }
    }

    /// Issues one size query against the terminal device and, on success,
    /// replaces the cached snapshot with the freshly read value.
    ///
    /// A single attempt per invocation, no retries; cheap enough to call on
    /// every resize notification. On failure the previous snapshot is left
    /// exactly as it was.
    pub fn refresh(&self) -> Result<GeometrySnapshot, GeometryError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_CLOEXEC | libc::O_NONBLOCK)
            .open(&self.device)
            .map_err(|source| GeometryError::DeviceUnavailable {
                device: self.device.clone(),
                source,
            })?;

        let snapshot = query_window_size(file.as_raw_fd()).map_err(|source| {
            GeometryError::DeviceUnavailable {
                device: self.device.clone(),
                source,
            }
        })?;

        debug!(
            "rows: {} columns: {} width: {} height: {}",
            snapshot.rows, snapshot.cols, snapshot.pixel_width, snapshot.pixel_height
        );
        self.store(snapshot);
        Ok(snapshot)
    }

    /// Copies the current snapshot out. Never blocks on a refresh in
    /// progress for longer than the whole-value replacement takes.
    pub fn snapshot(&self) -> GeometrySnapshot {
        match self.shared.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replaces the shared snapshot as a single value.
    fn store(&self, snapshot: GeometrySnapshot) {
        match self.shared.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl Default for GeometryTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the window size from a terminal file descriptor via
/// `ioctl(TIOCGWINSZ)`. Zero rows or columns are substituted with nominal
/// defaults; pixel dimensions are reported as-is.
fn query_window_size(fd: std::os::unix::io::RawFd) -> io::Result<GeometrySnapshot> {
    // SAFETY: `ioctl` is an FFI call; `winsz` is a valid, zeroed winsize
    // that the kernel fills in on success.
    let winsz = unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(io::Error::last_os_error());
        }
        winsz
    };

    Ok(GeometrySnapshot {
        rows: if winsz.ws_row == 0 {
            DEFAULT_ROWS
        } else {
            winsz.ws_row
        },
        cols: if winsz.ws_col == 0 {
            DEFAULT_COLS
        } else {
            winsz.ws_col
        },
        pixel_width: winsz.ws_xpixel,
        pixel_height: winsz.ws_ypixel,
    })
}

/// True when the snapshot carries usable pixel dimensions. Terminals that
/// do not fill in the pixel fields of the winsize answer cannot host a
/// pixel-addressed image grid.
pub fn has_pixel_dimensions(snapshot: &GeometrySnapshot) -> bool {
    snapshot.pixel_width > 0 && snapshot.pixel_height > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use test_log::test;

    #[test]
    fn refresh_against_missing_device_fails_device_unavailable() {
        let tracker = GeometryTracker::with_device("/definitely/not/a/tty");
        let err = tracker.refresh().unwrap_err();
        assert!(matches!(err, GeometryError::DeviceUnavailable { .. }));
    }

    #[test]
    fn refresh_against_non_terminal_device_fails_device_unavailable() {
        // /dev/null opens fine but rejects TIOCGWINSZ with ENOTTY.
        let tracker = GeometryTracker::with_device("/dev/null");
        let err = tracker.refresh().unwrap_err();
        assert!(matches!(err, GeometryError::DeviceUnavailable { .. }));
    }

    #[test]
    fn failed_refresh_leaves_cached_snapshot_untouched() {
        let tracker = GeometryTracker::with_device("/dev/null");
        let before = GeometrySnapshot {
            rows: 24,
            cols: 80,
            pixel_width: 1280,
            pixel_height: 720,
        };
        tracker.store(before);

        assert!(tracker.refresh().is_err());
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn snapshot_starts_zeroed_before_any_query() {
        let tracker = GeometryTracker::with_device("/dev/null");
        assert_eq!(tracker.snapshot(), GeometrySnapshot::default());
    }

    #[test]
    fn concurrent_readers_never_observe_a_torn_snapshot() {
        // The writer only ever stores snapshots whose width and height agree
        // with each other; any reader seeing a mismatch would prove a torn
        // (field-wise) update.
        let tracker = GeometryTracker::with_device("/dev/null");
        tracker.store(GeometrySnapshot {
            rows: 1,
            cols: 1,
            pixel_width: 100,
            pixel_height: 100,
        });

        let writer = {
            let tracker = tracker.clone();
            thread::spawn(move || {
                for step in 1u16..=500 {
                    tracker.store(GeometrySnapshot {
                        rows: step,
                        cols: step,
                        pixel_width: step,
                        pixel_height: step,
                    });
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let tracker = tracker.clone();
                thread::spawn(move || {
                    for _ in 0..2000 {
                        let snap = tracker.snapshot();
                        assert_eq!(snap.pixel_width, snap.pixel_height);
                        assert_eq!(snap.rows, snap.cols);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
