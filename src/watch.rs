//! Re-assembly of sources whenever one of them changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{channel, Receiver, Sender},
    Arc,
};
use std::time::Duration;

use log::info;
use notify::{RawEvent, RecommendedWatcher, RecursiveMode, Watcher};

use crate::util::Fallible;

const COLLECT_EVENTS: Duration = Duration::from_millis(1000);

/// Runs `rebuild` once, then re-runs it whenever one of the files it
/// reported changes, blocking indefinitely.
pub fn watch<F>(mut rebuild: F) -> Fallible
where
    F: FnMut() -> Fallible<HashSet<PathBuf>>,
{
    let mut watched_old = rebuild()?;

    info!("Watching for changes...");

    let suspend: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
    let (rx_changes, mut watcher) = trigger_on_change(watched_old.iter(), suspend.clone())?;

    for _ in rx_changes {
        info!("Sources changed. Re-assembling...");

        suspend.store(true, Ordering::SeqCst);

        let watched_new = rebuild()?;
        update_watcher(&mut watcher, &watched_old, &watched_new)?;

        suspend.store(false, Ordering::SeqCst);

        watched_old = watched_new;
    }

    Ok(())
}

fn update_watcher(
    watcher: &mut RecommendedWatcher,
    old_files: &HashSet<PathBuf>,
    new_files: &HashSet<PathBuf>,
) -> Fallible {
    for path in old_files.difference(new_files) {
        watcher.unwatch(path)?;
    }
    for path in new_files.difference(old_files) {
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    Ok(())
}

fn trigger_on_change<P>(
    paths: impl Iterator<Item = P>,
    suspend: Arc<AtomicBool>,
) -> Fallible<(Receiver<()>, RecommendedWatcher)>
where
    P: AsRef<std::path::Path>,
{
    let (tx_files, rx_files) = channel();
    let mut watcher = notify::raw_watcher(tx_files)?;

    for path in paths {
        watcher.watch(path, RecursiveMode::NonRecursive)?;
    }

    let (tx_changes, rx_changes) = channel();
    start_event_thread(rx_files, tx_changes, suspend);

    Ok((rx_changes, watcher))
}

fn start_event_thread(
    in_channel: Receiver<RawEvent>,
    out_channel: Sender<()>,
    suspend: Arc<AtomicBool>,
) {
    std::thread::spawn(move || loop {
        in_channel.recv().unwrap();
        if suspend.load(Ordering::SeqCst) {
            continue;
        }

        while in_channel.recv_timeout(COLLECT_EVENTS).is_ok() {}
        if suspend.load(Ordering::SeqCst) {
            continue;
        }

        out_channel.send(()).unwrap();
    });
}
