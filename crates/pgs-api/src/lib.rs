// pgs-api: Async HTTP client for the Period Grade System backend

pub mod client;
pub mod dispatch;
pub mod error;
pub mod transport;
pub mod types;

pub use client::GradeClient;
pub use dispatch::{CONNECTION_ERROR_MESSAGE, Dispatch, Dispatcher, Endpoint, Outcome, RequestOptions};
pub use error::Error;
pub use types::{
    GradeAssignment, GradeRecord, GradeUpdate, GradeValues, MessageReply, Module, ModuleMember,
    NewStudent, Student, StudentQuery, StudentUpdate, decode,
};

// Re-exported so consumers can inspect statuses without a direct dependency.
pub use reqwest::StatusCode;
