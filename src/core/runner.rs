//! Engine-thread loop.
//!
//! Owns the [`EngineHost`] and the single [`BridgeReceiver`]. Waits on the
//! bridge and a periodic tick; bridge commands are executed as they arrive,
//! ticks advance engine time. Returns when every `BridgeSender` is dropped.

use crate::core::bridge::BridgeReceiver;
use crate::core::engine::EngineHost;
use crossbeam_channel::{select, tick};
use log::{debug, info};
use std::time::{Duration, Instant};

pub struct Runner<H: EngineHost> {
    host: H,
    bridge: BridgeReceiver,
    tick: Duration,
}

impl<H: EngineHost> Runner<H> {
    pub fn new(host: H, bridge: BridgeReceiver, tick: Duration) -> Self {
        Self { host, bridge, tick }
    }

    /// Run until the bridge disconnects, then hand the host back.
    pub fn run(mut self) -> H {
        info!("Engine loop started (tick {:?})", self.tick);
        let ticker = tick(self.tick);
        let mut last = Instant::now();

        loop {
            select! {
                recv(self.bridge.receiver()) -> msg => match msg {
                    Ok(cmd) => {
                        debug!("Engine: {:?}", cmd);
                        cmd.apply(&mut self.host);
                        // Anything queued behind it runs in the same wakeup
                        self.bridge.drain(&mut self.host);
                    }
                    Err(_) => break,
                },
                recv(ticker) -> _ => {
                    let now = Instant::now();
                    self.host.tick(now - last);
                    last = now;
                }
            }
        }

        info!("Engine loop stopped");
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bridge;
    use std::thread;

    #[derive(Default)]
    struct Host {
        opened: Vec<String>,
        ticks: usize,
    }

    impl EngineHost for Host {
        fn open(&mut self, name: &str) {
            self.opened.push(name.to_string());
        }

        fn tick(&mut self, _elapsed: Duration) {
            self.ticks += 1;
        }
    }

    #[test]
    fn test_runs_commands_on_own_thread_and_exits() {
        let (tx, rx) = bridge::channel();
        let runner = Runner::new(Host::default(), rx, Duration::from_millis(5));
        let handle = thread::spawn(move || runner.run());

        tx.open("one");
        tx.open("two");
        thread::sleep(Duration::from_millis(30));
        drop(tx);

        let host = handle.join().unwrap();
        assert_eq!(host.opened, vec!["one", "two"]);
        assert!(host.ticks > 0);
    }

    #[test]
    fn test_exits_when_no_senders() {
        let (tx, rx) = bridge::channel();
        drop(tx);
        let host = Runner::new(Host::default(), rx, Duration::from_secs(60)).run();
        assert!(host.opened.is_empty());
    }
}
