use crate::{
    convert_players, merge_patches, project, Epoch, FeedError, FeedPayload, FeedUpdate,
    PlayerRecords, PlayerView, Position, RosterViewModel, SortMode,
};

/// Single owner of the authoritative records and every input of the derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterState {
    records: PlayerRecords,
    epoch: Option<Epoch>,
    observer: Position,
    players: Vec<PlayerView>,
    visible: Vec<PlayerView>,
    sort: SortMode,
    filter: String,
    polling: bool,
    poll_in_flight: bool,
    last_error: Option<FeedError>,
    dirty: bool,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            records: PlayerRecords::new(),
            epoch: None,
            observer: Position::default(),
            players: Vec::new(),
            visible: Vec::new(),
            sort: SortMode::default(),
            filter: String::new(),
            polling: true,
            poll_in_flight: false,
            last_error: None,
            dirty: false,
        }
    }
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &PlayerRecords {
        &self.records
    }

    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    /// Converted players in id order, before filtering and sorting.
    pub fn players(&self) -> &[PlayerView] {
        &self.players
    }

    pub fn poll_in_flight(&self) -> bool {
        self.poll_in_flight
    }

    pub fn last_error(&self) -> Option<&FeedError> {
        self.last_error.as_ref()
    }

    pub fn view(&self) -> RosterViewModel {
        RosterViewModel {
            players: self.visible.clone(),
            total_players: self.players.len(),
            sort: self.sort,
            filter: self.filter.clone(),
            epoch: self.epoch,
            observer: self.observer,
            polling: self.polling,
            last_error: self.last_error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Claims the next poll cycle. `None` while stopped or while a request is outstanding.
    pub(crate) fn begin_poll(&mut self) -> Option<Option<Epoch>> {
        if !self.polling || self.poll_in_flight {
            return None;
        }
        self.poll_in_flight = true;
        Some(self.epoch)
    }

    pub(crate) fn finish_poll(&mut self) {
        self.poll_in_flight = false;
    }

    pub(crate) fn is_polling(&self) -> bool {
        self.polling
    }

    pub(crate) fn stop_polling(&mut self) {
        self.polling = false;
        self.dirty = true;
    }

    /// Commits a validated reply: one record update, one list recomputation.
    pub(crate) fn apply_feed_update(&mut self, update: FeedUpdate) {
        match update.payload {
            FeedPayload::Snapshot(records) => self.records = records,
            FeedPayload::Diff(patches) => merge_patches(&mut self.records, patches),
        }
        self.epoch = Some(update.epoch).filter(|epoch| epoch.is_established());
        self.players = convert_players(&self.records, self.observer);
        self.last_error = None;
        self.refresh_view();
    }

    pub(crate) fn record_error(&mut self, err: FeedError) {
        self.last_error = Some(err);
        self.dirty = true;
    }

    /// Distances are refreshed on the next accepted reply, not here.
    pub(crate) fn set_observer(&mut self, observer: Position) {
        if self.observer != observer {
            self.observer = observer;
            self.dirty = true;
        }
    }

    pub(crate) fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.refresh_view();
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.visible = project(&self.players, self.sort, &self.filter);
        self.dirty = true;
    }
}
