use std::future::Future;

use crate::encoding::display_date;
use crate::models::{ItemRecord, ItemType};
use crate::store_client::RecordStoreClient;

pub const EMPTY_PLACEHOLDER: &str = "No items posted yet";

/// Something that can re-fetch the board after a successful post.
pub trait Refresh {
    fn refresh(&mut self) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Lost,
    Found,
}

impl Tab {
    pub const ALL_TABS: [Tab; 3] = [Tab::All, Tab::Lost, Tab::Found];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Lost => "Lost",
            Tab::Found => "Found",
        }
    }
}

/// Records split by type. Fetch order is kept inside each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitions<'a> {
    pub all: Vec<&'a ItemRecord>,
    pub lost: Vec<&'a ItemRecord>,
    pub found: Vec<&'a ItemRecord>,
}

impl<'a> Partitions<'a> {
    pub fn get(&self, tab: Tab) -> &[&'a ItemRecord] {
        match tab {
            Tab::All => &self.all,
            Tab::Lost => &self.lost,
            Tab::Found => &self.found,
        }
    }
}

pub fn partition(records: &[ItemRecord]) -> Partitions<'_> {
    let (lost, found) = records
        .iter()
        .partition(|record| record.item_type == ItemType::Lost);
    Partitions {
        all: records.iter().collect(),
        lost,
        found,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub title: String,
    pub badge: ItemType,
    pub description: String,
    pub location: String,
    pub date: String,
}

impl From<&ItemRecord> for ItemCard {
    fn from(record: &ItemRecord) -> Self {
        Self {
            title: record.item_name.clone(),
            badge: record.item_type,
            description: record.description.clone(),
            location: record.location.clone(),
            date: display_date(&record.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabContent {
    Placeholder(&'static str),
    Cards(Vec<ItemCard>),
}

/// The listing: owns the fetched records and replaces them wholesale on
/// every load.
pub struct BoardView {
    client: RecordStoreClient,
    records: Vec<ItemRecord>,
    state: LoadState,
}

impl BoardView {
    pub fn new(client: RecordStoreClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            state: LoadState::Loading,
        }
    }

    /// Creates the view and performs the initial fetch.
    pub async fn mount(client: RecordStoreClient) -> Self {
        let mut view = Self::new(client);
        view.load().await;
        view
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        self.records = self.client.list().await;
        self.state = LoadState::Loaded;
        tracing::debug!("Board loaded: {} items", self.records.len());
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    pub fn partitions(&self) -> Partitions<'_> {
        partition(&self.records)
    }

    /// Tab label with its count, e.g. `Lost (2)`.
    pub fn tab_label(&self, tab: Tab) -> String {
        format!("{} ({})", tab.name(), self.partitions().get(tab).len())
    }

    pub fn tab(&self, tab: Tab) -> TabContent {
        let partitions = self.partitions();
        let records = partitions.get(tab);
        if records.is_empty() {
            return TabContent::Placeholder(EMPTY_PLACEHOLDER);
        }
        TabContent::Cards(records.iter().map(|record| ItemCard::from(*record)).collect())
    }
}

impl Refresh for BoardView {
    async fn refresh(&mut self) {
        self.load().await;
    }
}
