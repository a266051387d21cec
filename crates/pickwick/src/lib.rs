// ABOUTME: Finder composition over the picker core plus a fixture backend
// ABOUTME: The finder chains two pickers; selecting in the primary filters the dependent

pub mod finder;
pub mod fixture;

pub use finder::{Collaborators, Finder, FinderConfig};
pub use fixture::StaticMetadataService;
