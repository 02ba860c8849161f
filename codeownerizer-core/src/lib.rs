//! codeownerizer core library: domain types, the platform capability trait,
//! errors, and the user settings file.
//!
//! - [`types`]: newtypes, declared owners, remote state, grants
//! - [`platform`]: [`PlatformApi`] and [`Page`]
//! - [`error`]: [`CoreError`], [`PlatformError`], [`SettingsError`]
//! - [`settings`]: load / save `~/.codeownerizer/config.yaml`

pub mod error;
pub mod platform;
pub mod settings;
pub mod types;

pub use error::{CoreError, PlatformError, SettingsError};
pub use platform::{Page, PlatformApi};
pub use settings::Settings;
pub use types::{
    Account, CollaboratorState, GrantRequest, Login, OrgName, OwnerKind, OwnerRecord,
    Permissions, RepoName, RepoRef, Snapshot, TeamSlug, TeamState,
};
