use crate::error::DeckError;
use crate::types::PageResult;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,

    // Fetching
    Load,
    Refresh,
    PageLoaded { ticket: u64, page: PageResult },
    PageFailed { ticket: u64, message: String },

    // Raw value reported by the filter control
    FilterChanged(String),

    // Pager intents
    NextPage,
    PrevPage,

    OpenInBrowser,
    YankUrl,

    Error(String),
    None,
}

impl From<DeckError> for Action {
    fn from(err: DeckError) -> Self {
        Action::Error(err.to_string())
    }
}
