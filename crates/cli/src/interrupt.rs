//! Ctrl-C delivery for interactive sessions.

use std::fmt;
use tokio::sync::mpsc;

/// Exit status of a run ended by Ctrl-C
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// The user asked to quit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted")
    }
}

impl std::error::Error for Interrupted {}

/// Buffered Ctrl-C presses
///
/// One listener lives for the whole process and feeds a queue, so a press
/// that lands between two waits is picked up by the next one.
pub struct Interrupts {
    rx: mpsc::UnboundedReceiver<()>,
}

impl Interrupts {
    /// Replace the default SIGINT handler with the queue
    pub fn listen() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut signal = platform::interrupt()?;
        tokio::spawn(async move {
            while signal.recv().await.is_some() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Ok(Self { rx })
    }

    #[cfg(test)]
    pub fn manual() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Next press; pending forever once the source is gone
    pub async fn recv(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
mod platform {
    use tokio::signal::unix::{Signal, SignalKind, signal};

    pub fn interrupt() -> std::io::Result<Signal> {
        signal(SignalKind::interrupt())
    }
}

#[cfg(windows)]
mod platform {
    use tokio::signal::windows::{CtrlC, ctrl_c};

    pub fn interrupt() -> std::io::Result<CtrlC> {
        ctrl_c()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_presses_are_buffered() {
        let (tx, mut interrupts) = Interrupts::manual();
        tx.send(()).unwrap();
        tx.send(()).unwrap();

        interrupts.recv().await;
        interrupts.recv().await;
    }

    #[test]
    fn test_interrupted_downcast() {
        let err = anyhow::Error::from(Interrupted);
        assert_eq!(err.downcast_ref::<Interrupted>(), Some(&Interrupted));
        assert_eq!(err.to_string(), "interrupted");
    }
}
