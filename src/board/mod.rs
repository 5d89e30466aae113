pub mod submission;
pub mod view;

pub use submission::{Rejection, ReportForm, SubmissionHandler, POSTED_NOTICE};
pub use view::{
    partition, BoardView, ItemCard, LoadState, Partitions, Refresh, Tab, TabContent,
    EMPTY_PLACEHOLDER,
};
