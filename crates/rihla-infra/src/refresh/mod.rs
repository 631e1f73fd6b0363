//! Content refreshers - re-request server-rendered content after a cookie repair.

mod http;

pub use http::HttpContentRefresher;
