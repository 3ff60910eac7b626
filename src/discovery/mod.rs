//! Feed discovery pipeline
//!
//! A submitted blog URL goes through three stages, each of which either hands
//! its output to the next or ends the run with a [`DiscoveryError`]:
//!
//! 1. [`validate_blog_url`]: syntax check (absolute `http`/`https` URL with a host)
//! 2. [`fetch_page`]: single GET through a [`PageSource`], requiring `200 OK`
//!    and a `text/html` content type
//! 3. [`FeedExtractor::extract`]: `<link>` elements whose `type` is a feed
//!    media type, hrefs in document order
//!
//! [`Discoverer`] chains the three. There is no retry anywhere in the chain.

mod error;
mod extractor;
mod fetcher;
pub mod media;
mod pipeline;
mod validator;

pub use error::{DiscoveryError, FetchError};
pub use extractor::FeedExtractor;
pub use fetcher::{FetchedDocument, HttpPageSource, PageSource, RawPage, fetch_page};
pub use pipeline::Discoverer;
pub use validator::validate_blog_url;
