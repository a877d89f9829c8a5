//! Deterministic in-memory record source
//!
//! Used by tests and by `--offline` runs. Pages can be scripted to fail, and
//! held open until released so overlapping fetches can be reproduced.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{Location, Name, PageRequest, Picture, User};
use crate::error::{FeedError, Result};
use crate::source::RecordSource;

const FIRST_NAMES: [&str; 8] = ["Ida", "Mateo", "Aiko", "Noah", "Lena", "Omar", "Sofia", "Rhys"];
const LAST_NAMES: [&str; 6] = ["Nielsen", "Garcia", "Sato", "Okafor", "Novak", "Evans"];
const PLACES: [(&str, &str); 5] = [
    ("Aarhus", "Denmark"),
    ("Valencia", "Spain"),
    ("Sapporo", "Japan"),
    ("Lagos", "Nigeria"),
    ("Cardiff", "United Kingdom"),
];

#[derive(Debug, Default)]
struct MockInner {
    failing: HashSet<u32>,
    held: HashMap<u32, Arc<Notify>>,
    calls: Vec<u32>,
}

/// Scriptable record source
#[derive(Debug, Default)]
pub struct MockRecordSource {
    inner: Mutex<MockInner>,
    delay: Option<Duration>,
}

impl MockRecordSource {
    /// Create a source that answers every page immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering each page
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every fetch of `page` fail
    pub fn fail_on(self, page: u32) -> Self {
        self.lock().failing.insert(page);
        self
    }

    /// Block fetches of `page` until [`release`](Self::release) is called
    pub fn hold(&self, page: u32) {
        self.lock().held.insert(page, Arc::new(Notify::new()));
    }

    /// Let a held fetch of `page` complete. A release before the fetch starts is remembered.
    pub fn release(&self, page: u32) {
        if let Some(gate) = self.lock().held.get(&page) {
            gate.notify_one();
        }
    }

    /// Pages requested so far, in request order
    pub fn calls(&self) -> Vec<u32> {
        self.lock().calls.clone()
    }

    /// Number of times `page` was requested
    pub fn calls_for(&self, page: u32) -> usize {
        self.lock().calls.iter().filter(|p| **p == page).count()
    }

    /// The records this source returns for a request
    pub fn users_for(request: &PageRequest) -> Vec<User> {
        (0..request.results)
            .map(|i| synthetic_user(request.page, i))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn synthetic_user(page: u32, index: u32) -> User {
    let n = (u64::from(page.saturating_sub(1)) * 31 + u64::from(index)) as usize;
    let first = FIRST_NAMES[n % FIRST_NAMES.len()];
    let last = LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()];
    let (city, country) = PLACES[n % PLACES.len()];

    User {
        gender: if n % 2 == 0 { "female" } else { "male" }.to_string(),
        name: Name {
            title: if n % 2 == 0 { "Ms" } else { "Mr" }.to_string(),
            first: first.to_string(),
            last: last.to_string(),
        },
        email: format!("{}.{}.p{}n{}@example.com", first, last, page, index).to_lowercase(),
        picture: Picture {
            thumbnail: format!("https://randomuser.me/api/portraits/thumb/lego/{}.jpg", n % 10),
        },
        location: Location {
            city: city.to_string(),
            country: country.to_string(),
        },
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<User>> {
        let (gate, fails) = {
            let mut inner = self.lock();
            inner.calls.push(request.page);
            (
                inner.held.get(&request.page).cloned(),
                inner.failing.contains(&request.page),
            )
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if fails {
            return Err(FeedError::Source(format!("page {} unavailable", request.page)));
        }
        Ok(Self::users_for(request))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
