//! Client core for a paginated, searchable product list backed by a REST
//! `/posts` collection.
//!
//! # Overview
//! `PostsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `ProductListClient` sits on top: it keeps the loaded products and the
//! page cursor, runs each round-trip through a [`Transport`], and mirrors
//! results into a [`RenderPort`].
//!
//! # Design
//! - `PostsClient` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - Time is an argument. The search debouncer takes `Instant`s from the
//!   caller and never sleeps.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod debounce;
pub mod error;
pub mod http;
pub mod list;
pub mod pagination;
pub mod transport;
pub mod types;
pub mod view;

pub use client::PostsClient;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ApiError, ClientError, NetworkError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ClientState, Command, Outcome, ProductListClient, SearchTicket};
pub use pagination::PAGE_SIZE;
pub use transport::Transport;
pub use types::{NewProduct, Product, ProductUpdate, DEFAULT_USER_ID};
pub use view::{Notice, Prompter, RenderPort};
