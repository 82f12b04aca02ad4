// src/scrape.rs
use std::{
    thread,
    time::Duration,
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
};

use reqwest::blocking::Client;

use crate::{
    config::options::FetchOptions,
    core::{net, sanitize},
    error::{Error, Result},
    progress::Progress,
    specs::{self, ListingFields},
};

/// Where fresh listing data comes from.
pub trait ListingSource: Sync {
    /// Fetch and parse one listing. Any error means "leave this row alone".
    fn fetch(&self, listing_id: &str) -> Result<ListingFields>;
}

/// Listing pages over HTTP.
pub struct HttpListingSource {
    client: Client,
    opts: FetchOptions,
}

impl HttpListingSource {
    pub fn new(opts: &FetchOptions) -> Result<Self> {
        Ok(Self { client: net::client(opts)?, opts: opts.clone() })
    }
}

impl ListingSource for HttpListingSource {
    fn fetch(&self, listing_id: &str) -> Result<ListingFields> {
        let id = sanitize::listing_id(listing_id);
        let url = self.opts.listing_url(id);
        let resp = net::http_get(&self.client, &url)?;
        if resp.status != 200 {
            return Err(Error::HttpStatus { id: s!(id), status: resp.status });
        }
        Ok(specs::listing::parse(&resp.body))
    }
}

/// Fetch every id with `opts.workers` threads. Results come back in `ids`
/// order regardless of completion order.
pub fn fetch_all<'p>(
    source: &dyn ListingSource,
    ids: &[String],
    opts: &FetchOptions,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Vec<Result<ListingFields>> {
    let mut results: Vec<Option<Result<ListingFields>>> = ids.iter().map(|_| None).collect();
    if ids.is_empty() {
        return Vec::new();
    }

    let counter = AtomicUsize::new(0);
    let workers = opts.workers.min(ids.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<ListingFields>)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let result = source.fetch(&ids[i]);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    pause(opts, i);
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            if let Some(p) = progress.as_deref_mut() {
                match &result {
                    Ok(_) => p.item_done(&ids[i]),
                    Err(e) => p.item_failed(&ids[i], &e.to_string()),
                }
            }
            results[i] = Some(result);
        }
    });

    results
        .into_iter()
        .zip(ids)
        .map(|(r, id)| r.unwrap_or_else(|| Err(Error::NoResult(id.clone()))))
        .collect()
}

fn pause(opts: &FetchOptions, i: usize) {
    let jitter = if opts.jitter_ms == 0 { 0 } else { (i as u64) % opts.jitter_ms };
    let ms = opts.pause_ms + jitter;
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms)); // be polite
    }
}
