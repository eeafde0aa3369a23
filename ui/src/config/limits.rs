/// Global hard limits for the composer and the marketing backend
/// Page sizes offered by the recipient search table
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum subject length accepted by the send endpoint
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// Maximum template name length accepted by the templates endpoint
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 255;

/// Maximum quiet period before a search fires (5 seconds)
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5_000;

/// Maximum delay before a successful send dialog closes itself (1 minute)
pub const MAX_SUCCESS_CLOSE_DELAY_MS: u64 = 60_000;

/// Minimum request timeout
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout, below the 60 second operation timeout
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 55;

/// Maximum number of API calls in flight at once
pub const MAX_CONCURRENT_REQUESTS: usize = 32;
