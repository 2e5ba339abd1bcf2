//! Line input with an optional deadline.
//!
//! A background thread owns the blocking reader and forwards each line over a
//! channel. Waiting for a guess is then a `recv_timeout` on the calling
//! thread, so a guess and an expired deadline can never both be accepted: the
//! first one observed decides the attempt.

use crate::debug_log;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    Line(String),
    TimedOut,
    /// The reader hit end of input or failed.
    Closed,
}

pub struct LineReader {
    rx: Receiver<String>,
}

impl LineReader {
    /// Moves `reader` onto a background thread and starts forwarding lines.
    ///
    /// Trailing newlines are stripped. The thread stops at end of input, on a
    /// read error, or once this `LineReader` is dropped and the next line
    /// cannot be delivered.
    pub fn spawn<R: BufRead + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            loop {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = line.trim_end_matches(['\r', '\n']).to_string();
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug_log!("LineReader - read error: {}", e);
                        break;
                    }
                }
            }
        });
        Self { rx }
    }

    /// Reads from lines pushed by some other producer.
    pub fn from_channel(rx: Receiver<String>) -> Self {
        Self { rx }
    }

    /// Blocks until a line arrives or the input closes.
    pub fn read_line(&self) -> ReadResult {
        match self.rx.recv() {
            Ok(line) => ReadResult::Line(line),
            Err(_) => ReadResult::Closed,
        }
    }

    /// Waits up to `limit` for a line.
    ///
    /// `on_tick` receives the whole seconds left (rounded up) each time that
    /// number changes. It is never called again once a line has arrived.
    pub fn read_line_timeout<F: FnMut(u64)>(&self, limit: Duration, mut on_tick: F) -> ReadResult {
        let deadline = Instant::now() + limit;
        let mut last_shown = None;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return ReadResult::TimedOut;
            }

            let secs = seconds_left(remaining);
            if last_shown != Some(secs) {
                on_tick(secs);
                last_shown = Some(secs);
            }

            // Wake at the next whole-second boundary to refresh the countdown
            let slice = remaining.saturating_sub(Duration::from_secs(secs - 1));
            match self.rx.recv_timeout(slice) {
                Ok(line) => return ReadResult::Line(line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return ReadResult::Closed,
            }
        }
    }

    /// Drops lines that are already queued, returning how many were dropped.
    pub fn discard_pending(&self) -> usize {
        let mut dropped = 0;
        loop {
            match self.rx.try_recv() {
                Ok(_) => dropped += 1,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return dropped,
            }
        }
    }
}

/// Whole seconds in `remaining`, rounded up.
pub fn seconds_left(remaining: Duration) -> u64 {
    remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
}
