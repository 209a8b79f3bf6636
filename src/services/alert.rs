//! End-of-quarter alert collaborators

use std::io::Write;
use tracing::{info, warn};

/// Fire-and-forget alert played when the clock reaches zero
pub trait Alert: Send + Sync {
    fn play(&self);
}

/// Rings the terminal bell on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct BellAlert;

impl Alert for BellAlert {
    fn play(&self) {
        info!("Quarter over, sounding alert");
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

/// Only records the alert in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlert;

impl Alert for LogAlert {
    fn play(&self) {
        info!("Quarter over (audible alert muted)");
    }
}
