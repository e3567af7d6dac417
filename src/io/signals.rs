//! Unix signal handling.
//!
//! SIGINT, SIGTERM and SIGHUP all request a graceful shutdown: a background
//! thread clears the shared `running` flag and notifies the render loop, which
//! notices at its next tick or sub-tick boundary and turns the strip off
//! before exiting.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender, TryRecvError},
    thread,
};

/// Messages from the signal thread to the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Shutdown requested by the named signal.
    Shutdown { signal: &'static str },
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Cleared when the application should stop.
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    /// State with no signal thread attached, for simulation and tests.
    pub fn detached() -> Self {
        let (signal_sender, signal_receiver) = std::sync::mpsc::channel();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        }
    }

    /// Drain pending messages without blocking.
    pub fn poll(&self, debug_enabled: bool) {
        loop {
            match self.signal_receiver.try_recv() {
                Ok(message) => handle_signal_message(message, self, debug_enabled),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Handle a signal message received in the render loop.
pub fn handle_signal_message(message: SignalMessage, state: &SignalState, debug_enabled: bool) {
    match message {
        SignalMessage::Shutdown { signal } => {
            if debug_enabled {
                log_pipe!();
                log_debug!("Shutdown requested by {signal}");
            }
            state.running.store(false, Ordering::SeqCst);
        }
    }
}

/// Register the handlers and spawn the signal thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running_clone = state.running.clone();
    let signal_sender_clone = state.signal_sender.clone();

    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let name = match sig {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                _ => "SIGHUP",
            };

            log_pipe!();
            if sig == SIGINT && debug_enabled {
                log_info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
            } else if sig == SIGINT {
                log_info!("Received interrupt signal, initiating graceful shutdown...");
            } else {
                log_info!("Received {name}, initiating graceful shutdown...");
            }

            // Send shutdown message to the render loop first
            if let Err(e) = signal_sender_clone.send(SignalMessage::Shutdown { signal: name }) {
                log_warning!("Failed to send shutdown message: {e}");
            }

            running_clone.store(false, Ordering::SeqCst);
        }
    });

    Ok(state)
}
