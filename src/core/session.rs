use crate::content::ContentProvider;
use crate::core::catalog::TopicCatalog;
use crate::core::sampler::{self, ControlParams, Sample};
use crate::core::types::{ContentPayload, Topic};
use crate::error::FetchError;
use crate::persistence::{BookmarkSet, BookmarkStore, Storage};
use log::{debug, info, warn};

/// Notice recorded when live content could not be loaded.
pub const FALLBACK_NOTICE: &str = "Failed to load AI content. Using offline mode.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No active topic.
    Idle,
    /// A fetch for the active topic is in flight.
    Loading,
    Ready,
    /// The fetch failed and placeholder content is shown.
    Degraded,
}

/// Identifies one issued fetch. Hand it back to [`TopicSession::resolve`]
/// together with the provider's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    topic_id: String,
    topic_name: String,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// The name to pass to the content provider.
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }
}

/// Outcome of applying a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(SessionPhase),
    /// The session has moved on; the result was dropped.
    Stale,
}

/// Ties the selected topic to its content fetch, chart controls and bookmarks.
pub struct TopicSession<S: Storage> {
    catalog: TopicCatalog,
    bookmarks: BookmarkStore<S>,
    controls: ControlParams,
    active: Option<Topic>,
    content: Option<ContentPayload>,
    last_error: Option<String>,
    pending: Option<u64>,
    next_token: u64,
}

impl<S: Storage> TopicSession<S> {
    pub fn new(catalog: TopicCatalog, bookmarks: BookmarkStore<S>) -> Self {
        Self {
            catalog,
            bookmarks,
            controls: ControlParams::default(),
            active: None,
            content: None,
            last_error: None,
            pending: None,
            next_token: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.active, self.pending, &self.last_error) {
            (None, _, _) => SessionPhase::Idle,
            (Some(_), Some(_), _) => SessionPhase::Loading,
            (Some(_), None, Some(_)) => SessionPhase::Degraded,
            (Some(_), None, None) => SessionPhase::Ready,
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn active_topic(&self) -> Option<&Topic> {
        self.active.as_ref()
    }

    pub fn content(&self) -> Option<&ContentPayload> {
        self.content.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Makes `topic` active and issues a new fetch ticket for it. Any ticket
    /// issued earlier becomes stale.
    pub fn select_topic(&mut self, topic: Topic) -> FetchTicket {
        self.next_token += 1;
        let ticket = FetchTicket {
            token: self.next_token,
            topic_id: topic.id.clone(),
            topic_name: topic.name.clone(),
        };
        if let Some(superseded) = self.pending {
            debug!("request #{superseded} superseded by #{}", ticket.token);
        }
        info!("selected topic {:?} (request #{})", topic.id, ticket.token);

        self.active = Some(topic);
        self.content = None;
        self.last_error = None;
        self.pending = Some(ticket.token);
        ticket
    }

    /// Selects a catalog topic by id.
    pub fn open(&mut self, id: &str) -> Option<FetchTicket> {
        let topic = self.catalog.get(id)?.clone();
        Some(self.select_topic(topic))
    }

    /// Maps a related-concept name to a catalog topic, or synthesizes an
    /// ad-hoc topic when the catalog has no such name.
    pub fn resolve_related(&self, name: &str) -> Topic {
        match self.catalog.find_by_name(name) {
            Some(topic) => topic.clone(),
            None => Topic::ad_hoc(name),
        }
    }

    pub fn select_related(&mut self, name: &str) -> FetchTicket {
        let topic = self.resolve_related(name);
        self.select_topic(topic)
    }

    /// Applies a provider result. Results for anything but the most recent
    /// ticket of the current topic are discarded.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ContentPayload, FetchError>,
    ) -> Resolution {
        let current = self.pending == Some(ticket.token)
            && self.active.as_ref().map(|t| t.id.as_str()) == Some(ticket.topic_id.as_str());
        if !current {
            debug!("discarding stale result for {:?} (request #{})", ticket.topic_id, ticket.token);
            return Resolution::Stale;
        }

        self.pending = None;
        match result {
            Ok(payload) => {
                debug!("content ready for {:?}", ticket.topic_id);
                self.content = Some(payload);
                self.last_error = None;
            }
            Err(e) => {
                warn!("content fetch for {:?} failed: {e}", ticket.topic_name);
                self.content = Some(ContentPayload::placeholder());
                self.last_error = Some(FALLBACK_NOTICE.to_string());
            }
        }
        Resolution::Applied(self.phase())
    }

    /// Selects `topic`, waits for the provider and applies the result.
    pub async fn load<P>(&mut self, provider: &P, topic: Topic) -> Resolution
    where
        P: ContentProvider + ?Sized,
    {
        let ticket = self.select_topic(topic);
        let result = provider.fetch(ticket.topic_name()).await;
        self.resolve(&ticket, result)
    }

    /// Back to the catalog view. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.active = None;
        self.content = None;
        self.last_error = None;
        self.pending = None;
    }

    pub fn controls(&self) -> &ControlParams {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlParams {
        &mut self.controls
    }

    /// Chart series for the active topic, if it has one.
    pub fn chart(&self) -> Option<Vec<Sample>> {
        let topic = self.active.as_ref()?;
        sampler::sample(topic.visualization, &self.controls)
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        self.bookmarks.saved()
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.contains(id)
    }

    pub fn toggle_bookmark(&mut self, id: &str) -> BookmarkSet {
        self.bookmarks.toggle(id)
    }

    /// Set when the last bookmark write did not reach storage.
    pub fn bookmark_write_error(&self) -> Option<&str> {
        self.bookmarks.last_write_error()
    }
}
