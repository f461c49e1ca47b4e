//! DRISTI Client Common Library
//!
//! CLIとWeb(WASM)で共有されるAPIクライアント・ワークフロー・表示モデル

pub mod api;
pub mod cameras;
pub mod endpoints;
pub mod error;
pub mod notice;
pub mod page;
pub mod polling;
pub mod preview;
pub mod results;
pub mod session;
pub mod storage;
pub mod transport;
pub mod types;
pub mod validation;
pub mod workflow;

pub use api::{ApiClient, LANDING_PAGE};
pub use cameras::{
    CameraConfig, CameraDraft, CameraRegistry, RegistryError, SearchCameraInfo, CONNECTION_TEST_DELAY,
    CONNECTION_TEST_MESSAGE, DEFAULT_DURATION_SECS,
};
pub use endpoints::{BackendProfile, Endpoints};
pub use error::{ApiError, ApiResult, StorageError, ValidationError};
pub use notice::{Notice, NoticeKind};
pub use page::{init_page, DashboardStats, Page, PageInit, TargetAction, TargetCard, TargetListView, UserProfile};
pub use polling::{poll_search_results, PollError, PollPolicy, PollProgress};
pub use preview::{Playback, PreviewFeed, SAMPLE_FEEDS};
pub use results::{format_confidence, MatchSummary, ResultsView, MAX_DISPLAYED_MATCHES};
pub use session::SessionManager;
pub use storage::{keys, KeyValueStore, MemoryStore};
pub use transport::{Body, FormPart, HttpRequest, HttpResponse, HttpTransport, Method, Navigator, TransportError};
pub use types::*;
pub use validation::{validate_email, validate_password, validate_photo, MAX_PHOTO_BYTES};
pub use workflow::{run_search, SearchError, SearchTicket, SearchWorkflow, Section, SelectedPhoto};
