//! Fire-and-forget handoff from server threads to the engine's owning thread.
//!
//! ```text
//! ┌────────────────────────┐   crossbeam unbounded   ┌──────────────────────┐
//! │ HTTP handler threads   │  ── BridgeCommand ───▶  │ Engine thread        │
//! │ (any number of senders)│                         │ (single receiver)    │
//! │ submit() returns now   │                         │ drain() -> host.open │
//! └────────────────────────┘                         └──────────────────────┘
//! ```
//!
//! Commands from one sender arrive in submission order. There is no
//! acknowledgement and no cancellation: once queued, a command runs. A status
//! report produced right after `submit()` may not reflect the command yet.

use crossbeam_channel::{Receiver, Sender};
use log::{trace, warn};

use super::engine::EngineHost;

/// Work queued for the owning thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    /// Open a file or URI and start playing it
    Open(String),
}

impl BridgeCommand {
    /// Execute against the owning-side host.
    pub fn apply<H: EngineHost + ?Sized>(self, host: &mut H) {
        match self {
            BridgeCommand::Open(name) => host.open(&name),
        }
    }
}

/// Create a connected sender/receiver pair.
pub fn channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (BridgeSender { tx }, BridgeReceiver { rx })
}

/// Cloneable submit handle, safe to use from any thread.
#[derive(Clone, Debug)]
pub struct BridgeSender {
    tx: Sender<BridgeCommand>,
}

impl BridgeSender {
    /// Queue a command and return immediately.
    pub fn submit(&self, cmd: BridgeCommand) {
        trace!("Bridge submit: {:?}", cmd);
        if let Err(e) = self.tx.send(cmd) {
            warn!("Engine thread is gone, dropping {:?}", e.into_inner());
        }
    }

    /// Shorthand for `submit(BridgeCommand::Open(..))`.
    pub fn open(&self, name: impl Into<String>) {
        self.submit(BridgeCommand::Open(name.into()));
    }
}

/// Single consumer, owned by the engine thread.
#[derive(Debug)]
pub struct BridgeReceiver {
    rx: Receiver<BridgeCommand>,
}

impl BridgeReceiver {
    /// Raw channel, for use in `crossbeam_channel::select!`.
    pub fn receiver(&self) -> &Receiver<BridgeCommand> {
        &self.rx
    }

    /// Run every command queued so far. Returns how many were executed.
    pub fn drain<H: EngineHost + ?Sized>(&self, host: &mut H) -> usize {
        let mut count = 0;
        while let Ok(cmd) = self.rx.try_recv() {
            trace!("Bridge deliver: {:?}", cmd);
            cmd.apply(host);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Default)]
    struct Host {
        opened: Vec<String>,
    }

    impl EngineHost for Host {
        fn open(&mut self, name: &str) {
            self.opened.push(name.to_string());
        }
    }

    #[test]
    fn test_submit_does_not_run_until_drained() {
        let (tx, rx) = channel();
        let mut host = Host::default();

        tx.open("a.mp4");
        assert!(host.opened.is_empty());

        assert_eq!(rx.drain(&mut host), 1);
        assert_eq!(host.opened, vec!["a.mp4"]);
    }

    #[test]
    fn test_order_preserved_per_sender() {
        let (tx, rx) = channel();
        let mut host = Host::default();

        for i in 0..5 {
            tx.open(format!("{}.mkv", i));
        }
        rx.drain(&mut host);
        assert_eq!(host.opened, vec!["0.mkv", "1.mkv", "2.mkv", "3.mkv", "4.mkv"]);
    }

    #[test]
    fn test_submit_from_other_threads() {
        let (tx, rx) = channel();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        tx.open(format!("{}-{}", t, i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut host = Host::default();
        assert_eq!(rx.drain(&mut host), 40);

        // Per-sender order survives interleaving
        for t in 0..4 {
            let prefix = format!("{}-", t);
            let seq: Vec<_> = host.opened.iter().filter(|s| s.starts_with(&prefix)).cloned().collect();
            let expected: Vec<_> = (0..10).map(|i| format!("{}-{}", t, i)).collect();
            assert_eq!(seq, expected);
        }
    }

    #[test]
    fn test_submit_after_receiver_dropped_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        tx.open("lost.mp4");
    }

    #[test]
    fn test_queued_commands_survive_sender_drop() {
        let (tx, rx) = channel();
        tx.open("x");
        drop(tx);

        let mut host = Host::default();
        assert_eq!(rx.drain(&mut host), 1);
        assert_eq!(rx.drain(&mut host), 0);
        assert_eq!(host.opened, vec!["x"]);
    }
}
