//! Outbound HTTP adapters implementing the `HttpRequester` port.

mod mock_requester;
mod reqwest_requester;

pub use mock_requester::MockHttpRequester;
pub use reqwest_requester::{ReqwestRequester, DEFAULT_TIMEOUT};
