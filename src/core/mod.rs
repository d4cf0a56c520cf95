//! Core services shared by all renderers.
//!
//! - [`data_service`]: document ownership, scope reads/writes, change
//!   notification fan-out
//! - [`testers`]: applicability testers and combinators for renderer
//!   selection
//! - [`styling`]: semantic style token registry injected into views

pub mod data_service;
pub mod styling;
pub mod testers;

pub use data_service::{DataChange, DataChangeListener, DataService, ListenerRef};
pub use styling::StylingRegistry;
pub use testers::{and, rank_with, schema_matches, ui_type_is, RankedTester, Tester};
