//! Chat host integration for the onboarding bot
//!
//! - **Model** (`model`) - wire types for posts, attachments, dialogs and callbacks
//! - **Attachments** (`attachments`) - the six-step checklist and welcome post
//! - **Dialog** (`dialog`) - the email signature form
//! - **Host** (`host`) - the REST surface the bot needs, as a trait
//! - **Client** (`client`) - `HostApi` over the Mattermost v4 REST API
//! - **Memory** (`memory`) - a recording host for tests
//!
//! ```text
//! host button/dialog → server callback → onboarding service → HostApi
//!                                              ↓
//!                               checklist attachments ← state store
//! ```

pub mod attachments;
pub mod client;
pub mod dialog;
pub mod host;
pub mod memory;
pub mod model;

pub use attachments::{checklist_post, render_checklist, ChecklistBuilder};
pub use client::MattermostClient;
pub use dialog::signature_dialog;
pub use host::{HostApi, HostError};
pub use memory::InMemoryHost;
