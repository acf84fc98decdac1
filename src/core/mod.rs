// Core directory logic
pub mod collation;
pub mod directory;
pub mod distance;
pub mod state;
pub mod summary;

pub use directory::{search, sorted_view, SchoolDirectory, SearchError, SearchResult, SortOrder, DEFAULT_MIN_QUERY_LEN};
pub use distance::{distance, distance_km, DistanceUnit};
pub use state::{PageState, Transition};
pub use summary::SchoolCard;
