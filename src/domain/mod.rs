//! Domain logic - pure version rules independent of files and git

pub mod directive;
pub mod version;

pub use directive::ReleaseDirective;
pub use version::Version;
