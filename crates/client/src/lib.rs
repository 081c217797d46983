//! `tradedesk-client`: typed HTTP access to the ERP and supplier-portal APIs.
//!
//! One [`ApiClient`] carries the base URLs and the injected
//! [`SessionContext`](tradedesk_auth::SessionContext); every module talks to
//! its collection through a [`ResourceService`] parameterized by an
//! [`Endpoint`] and the record type.

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod portal;
pub mod report;
pub mod resource;
pub mod sequence;

pub use auth::AuthService;
pub use config::ApiConfig;
pub use endpoint::{endpoints, Access, Backend, Endpoint};
pub use error::ApiError;
pub use http::ApiClient;
pub use portal::{Attachment, PortalService};
pub use report::ReportService;
pub use resource::ResourceService;
pub use sequence::{RequestSequence, Ticket};
