/// Base URL of the Zoho Recruit v2 REST API
pub const DEFAULT_RECRUIT_BASE_URL: &str = "https://recruit.zoho.com/recruit/v2";

/// Base URL of the Zoho accounts server hosting the OAuth token endpoint
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.zoho.com";

/// Scheme placed in front of the access token in the `Authorization` header
pub const DEFAULT_AUTH_SCHEME: &str = "Zoho-oauthtoken";

/// Redirect URI registered for the self client
pub const DEFAULT_REDIRECT_URI: &str = "https://www.zoho.com/recruit";

/// Module path for job openings on the recruiting platform
pub const JOB_OPENINGS_MODULE: &str = "JobOpenings";

pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Output dimensionality of `text-embedding-3-small`
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// Text sent by the embedding connection probe
pub const CONNECTION_PROBE_TEXT: &str = "Test connection to OpenAI API";

/// Job opening used when the user does not type one
pub const DEFAULT_JOB_ID: &str = "821313000000528968";

/// Maximum number of characters of embedded text kept in the result metadata
pub const EMBEDDING_SAMPLE_CHARS: usize = 500;

/// Maximum number of characters of the raw description shown after a fetch
pub const DESCRIPTION_PREVIEW_CHARS: usize = 500;

/// Maximum number of characters of prepared embedding text shown before embedding
pub const EMBEDDING_TEXT_PREVIEW_CHARS: usize = 800;

/// Bounds of the placeholder time-to-fill value, in days
pub const TIME_TO_FILL_RANGE: std::ops::RangeInclusive<u32> = 20..=80;

/// Number of leading vector components printed as a sample
pub const VECTOR_SAMPLE_LEN: usize = 10;
