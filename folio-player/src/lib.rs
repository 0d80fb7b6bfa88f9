//! Host runtime for folio carousels.
//!
//! `folio-core` decides *what* a carousel looks like; this crate decides
//! *when*. A [`host::CarouselHost`] owns one carousel plus its ambient
//! scheduler, turns their state changes into timers through the
//! [`effects::EffectRunner`], and pushes frames to a [`sink::RenderSink`].
//! Time comes from an injected [`clock::Clock`] so tests can drive it by
//! hand. [`driver::run`] wraps a host in a tokio event loop, and
//! [`query::QueryClient`] serves widget data.

pub mod clock;
pub mod driver;
pub mod effects;
pub mod host;
pub mod query;
pub mod sink;
pub mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{HostHandle, HostInbox};
pub use effects::{EffectRunner, TimerCommand, TimerKey};
pub use host::{CarouselHost, HostEvent};
pub use query::{
    FetchError, Fetcher, HttpFetcher, QueryClient, QueryKey, QueryOptions,
    QueryState, WidgetSource,
};
pub use sink::{RecordingSink, RenderSink, SinkEvent};
pub use timers::TimerQueue;
