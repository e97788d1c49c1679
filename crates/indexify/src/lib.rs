mod listing;

use std::thread;

use crossbeam_channel::Receiver;
use smol::channel::Sender;
use tracing::{Level, debug, span, warn};

pub use listing::{Entry, Listing, ListingQuery, ListingRequest, list_folder, stable_id};

/// Starts the listing thread. It answers every request with exactly one
/// [`Listing`] and exits once either channel is closed.
pub fn init_service(request_receiver: Receiver<ListingRequest>, data_sender: Sender<Listing>) {
    thread::spawn(move || {
        let span = span!(Level::DEBUG, "listing service thread");
        let _enter = span.enter();
        serve(request_receiver, data_sender);
    });
}

fn serve(request_receiver: Receiver<ListingRequest>, data_sender: Sender<Listing>) {
    let mut last_query: Option<ListingQuery> = None;

    for request in request_receiver {
        let query = match request {
            ListingRequest::Fetch(query) => query,
            ListingRequest::Refresh => match &last_query {
                Some(query) => query.clone(),
                None => {
                    debug!("refresh before first fetch, ignoring");
                    continue;
                }
            },
        };

        let listing = list_folder(&query).unwrap_or_else(|e| {
            warn!("listing {} failed: {e:?}", query.folder.display());
            Listing::failed(query.clone(), e.to_string())
        });
        last_query = Some(query);

        if data_sender.send_blocking(listing).is_err() {
            debug!("listing receiver dropped, stopping service");
            break;
        }
    }
}
