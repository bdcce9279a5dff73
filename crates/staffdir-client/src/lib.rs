//! Staffdir Client - API proxy and the directory list controller.

pub mod api;
pub mod directory;
pub mod error;
pub mod filter;
pub mod http;
pub mod notification;
pub mod timer;

pub use api::EmployeeApi;
pub use directory::{DirectoryController, FormMode, LoadState, SaveOutcome};
pub use error::{ClientError, ClientResult};
pub use filter::{DepartmentFilter, ALL_DEPARTMENTS};
pub use http::HttpEmployeeClient;
pub use notification::{Toast, ToastKind, UndoPrompt};
pub use timer::{Deadline, Ticker, UiEvent};
