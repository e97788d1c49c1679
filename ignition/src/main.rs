use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender, unbounded};
use indexify::{Listing, ListingRequest};
use tracing::info;
use vaultify::Vaultify;

fn main() {
    logger::init_log();
    Vaultify::init_vault();
    let (request_sender, request_receiver, data_sender, data_receiver) = init_channel();
    let (watch_sender, watch_receiver) = unbounded::<PathBuf>();
    indexify::init_service(request_receiver, data_sender);
    sentrify::init_service(watch_receiver, request_sender.clone());
    facade::setup(request_sender, watch_sender, data_receiver);
}

fn init_channel() -> (
    Sender<ListingRequest>,
    Receiver<ListingRequest>,
    smol::channel::Sender<Listing>,
    smol::channel::Receiver<Listing>,
) {
    let (request_sender, request_receiver) = unbounded::<ListingRequest>();
    let (data_sender, data_receiver) = smol::channel::unbounded::<Listing>();
    info!("channel initialized");
    (request_sender, request_receiver, data_sender, data_receiver)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use indexify::ListingRequest;
    use vaultify::VAULTIFY;

    use super::init_channel;

    #[test]
    fn preferences_are_seeded() {
        vaultify::Vaultify::init_vault();
        assert!(VAULTIFY.preferences().limit > 0);
    }

    #[test]
    fn channels_connect_the_listing_service() {
        let (request_sender, request_receiver, data_sender, data_receiver) = init_channel();
        indexify::init_service(request_receiver, data_sender);

        let folder = std::env::temp_dir();
        request_sender
            .send(ListingRequest::Fetch(indexify::ListingQuery {
                folder: folder.clone(),
                sort: "title,asc".to_string(),
                page: 1,
                limit: 5,
            }))
            .unwrap();

        let listing = smol::block_on(async {
            smol::future::or(async { data_receiver.recv().await.ok() }, async {
                smol::Timer::after(Duration::from_secs(10)).await;
                None
            })
            .await
        })
        .unwrap();
        assert_eq!(listing.query.folder, folder);
        assert!(listing.entries.len() <= 5);
    }
}
