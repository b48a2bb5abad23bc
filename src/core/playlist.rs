//! Ordered list of media with a cursor.
//!
//! Navigation is called from HTTP handler threads, but loading media is an
//! engine-thread operation, so next/prev only move the cursor and queue an
//! open on the bridge.

use crate::core::bridge::BridgeSender;
use crate::core::engine::Playlist;
use log::{debug, info};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Entries {
    items: Vec<String>,
    cursor: Option<usize>,
}

/// Playlist backed by a plain vector. Navigation does not wrap.
#[derive(Debug)]
pub struct PlaylistQueue {
    entries: Mutex<Entries>,
    bridge: BridgeSender,
}

impl PlaylistQueue {
    pub fn new(items: Vec<String>, bridge: BridgeSender) -> Self {
        info!("Playlist created with {} item(s)", items.len());
        Self {
            entries: Mutex::new(Entries { items, cursor: None }),
            bridge,
        }
    }

    /// Open the first entry, if any.
    pub fn start(&self) {
        self.jump(|_, len| (len > 0).then_some(0));
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current(&self) -> Option<String> {
        let entries = self.lock();
        entries.cursor.and_then(|i| entries.items.get(i).cloned())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move the cursor to `pick(cursor, len)` and open that entry.
    fn jump(&self, pick: impl FnOnce(Option<usize>, usize) -> Option<usize>) {
        let target = {
            let mut entries = self.lock();
            let Some(idx) = pick(entries.cursor, entries.items.len()) else {
                debug!("Playlist: no entry to move to (cursor {:?})", entries.cursor);
                return;
            };
            entries.cursor = Some(idx);
            entries.items[idx].clone()
        };
        self.bridge.open(target);
    }
}

impl Playlist for PlaylistQueue {
    fn play_next(&self) {
        self.jump(|cursor, len| {
            let next = cursor.map_or(0, |i| i + 1);
            (next < len).then_some(next)
        });
    }

    fn play_prev(&self) {
        self.jump(|cursor, len| match cursor {
            Some(i) if i > 0 && i <= len => Some(i - 1),
            _ => None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bridge::{self, BridgeCommand, BridgeReceiver};
    use crate::core::engine::EngineHost;

    #[derive(Default)]
    struct Host {
        opened: Vec<String>,
    }

    impl EngineHost for Host {
        fn open(&mut self, name: &str) {
            self.opened.push(name.to_string());
        }
    }

    fn queue(items: &[&str]) -> (PlaylistQueue, BridgeReceiver) {
        let (tx, rx) = bridge::channel();
        let items = items.iter().map(|s| s.to_string()).collect();
        (PlaylistQueue::new(items, tx), rx)
    }

    fn opened(rx: &BridgeReceiver) -> Vec<String> {
        let mut host = Host::default();
        rx.drain(&mut host);
        host.opened
    }

    #[test]
    fn test_start_opens_first() {
        let (pl, rx) = queue(&["a", "b"]);
        pl.start();
        assert_eq!(opened(&rx), vec!["a"]);
        assert_eq!(pl.current().as_deref(), Some("a"));
    }

    #[test]
    fn test_next_prev_do_not_wrap() {
        let (pl, rx) = queue(&["a", "b"]);
        pl.play_next();
        pl.play_next();
        pl.play_next();
        pl.play_prev();
        pl.play_prev();
        pl.play_prev();
        assert_eq!(opened(&rx), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_empty_playlist_is_noop() {
        let (pl, rx) = queue(&[]);
        pl.start();
        pl.play_next();
        pl.play_prev();
        assert!(pl.is_empty());
        assert!(rx.receiver().try_recv().is_err());
    }

    #[test]
    fn test_navigation_goes_through_bridge() {
        let (pl, rx) = queue(&["x.mkv"]);
        pl.play_next();
        assert_eq!(rx.receiver().try_recv(), Ok(BridgeCommand::Open("x.mkv".into())));
    }
}
