use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use indexify::ListingRequest;
use notify::{
    Config, Error, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind,
};
use tracing::{Level, debug, span, trace, warn};

const SETTLE: Duration = Duration::from_millis(200);

/// Watches whichever folder was sent last on `watch_receiver` and asks the
/// listing service to refresh when its entries change.
pub fn init_service(watch_receiver: Receiver<PathBuf>, request_sender: Sender<ListingRequest>) {
    thread::spawn(move || {
        let span = span!(Level::DEBUG, "sentry service thread");
        let _enter = span.enter();
        if let Err(e) = guard(watch_receiver, request_sender) {
            warn!("guard error: {e:?}")
        }
    });
}

fn guard(watch_receiver: Receiver<PathBuf>, request_sender: Sender<ListingRequest>) -> Result<()> {
    let (event_sender, event_receiver) = unbounded::<Result<Event, Error>>();
    let mut watcher = RecommendedWatcher::new(event_sender, Config::default())?;
    let mut watched: Option<PathBuf> = None;

    loop {
        select! {
            recv(watch_receiver) -> path => {
                let Ok(path) = path else {
                    debug!("watch channel closed, stopping");
                    return Ok(());
                };
                if watched.as_ref() == Some(&path) {
                    continue;
                }
                if let Some(previous) = watched.take() {
                    if let Err(e) = watcher.unwatch(&previous) {
                        warn!("unwatch {} failed: {e:?}", previous.display());
                    }
                }
                match watcher.watch(&path, RecursiveMode::NonRecursive) {
                    Ok(()) => {
                        debug!("watching {}", path.display());
                        watched = Some(path);
                    }
                    Err(e) => warn!("watch {} failed: {e:?}", path.display()),
                }
            }
            recv(event_receiver) -> event => {
                let Ok(event) = event else {
                    return Ok(());
                };
                match event {
                    Ok(event) if affects_listing(&event.kind) => {
                        trace!("folder changed: {:?}", event.paths);
                        settle(&event_receiver);
                        if request_sender.send(ListingRequest::Refresh).is_err() {
                            debug!("listing service gone, stopping");
                            return Ok(());
                        }
                    }
                    Ok(_) => {}
                    Err(error) => warn!("watch error: {:?}", error),
                }
            }
        }
    }
}

/// Swallows the burst of events a single change tends to produce.
fn settle(event_receiver: &Receiver<Result<Event, Error>>) {
    let deadline = Instant::now() + SETTLE;
    while event_receiver.recv_deadline(deadline).is_ok() {}
}

pub fn affects_listing(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}
