pub mod lang;
pub mod pagination;
pub mod shutdown;
pub mod validations;

pub use lang::{lang, DATE_TIME_FORMAT_SHORT};
pub use pagination::PaginatedResult;
pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
pub use validations::validate_page;
