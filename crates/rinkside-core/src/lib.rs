#![forbid(unsafe_code)]

//! `rinkside-core` holds the state machines behind the Rinkside club site.
//!
//! Design goals:
//! - **Host-driven input**: the embedding environment (the wasm frontend) pushes
//!   wheel, key, touch and click events.
//! - **Deterministic time**: the host passes a monotonic timestamp with every
//!   call; nothing in this crate reads a wall clock except [`perf`].
//! - **No DOM**: views are plain values ([`navigator::SectionView`],
//!   [`magazine::MagazineView`]) that the frontend projects onto the page.
//!
//! [`site::Site`] is the single application-state object tying the pieces
//! together.

pub mod config;
pub mod gesture;
pub mod konami;
pub mod magazine;
pub mod navigator;
pub mod particles;
pub mod perf;
pub mod reveal;
pub mod site;
pub mod theme;

pub use config::{ConfigError, SiteConfig};
pub use gesture::NavIntent;
pub use magazine::{AutoplayToken, MagazinePaginator, MagazineView};
pub use navigator::{Rejected, SectionNavigator, SectionView, Transition};
pub use site::Site;
