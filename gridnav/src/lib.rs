//! Keyboard focus navigation for interactive grids.
//!
//! A [`NavigationModel`] binds to one grid element of a [`griddom::Document`],
//! moves focus between cells on arrow, paging, Home/End, Enter, Escape and F2
//! keys, and restores focus to the same coordinate when the focused cell is
//! removed. [`GridNavigation`] drives a model from a component lifecycle.

pub mod cell;
pub mod component;
pub mod config;
pub mod error;
pub mod grid;
pub mod keys;
pub mod model;
pub mod movement;

pub use cell::{FocusedCell, resolve_focus_target};
pub use component::GridNavigation;
pub use config::{DEFAULT_PAGE_SIZE, GridNavigationOptions, NavigationConfig, TableRole};
pub use error::NavError;
pub use grid::{CellIndex, GridLayout, cell_index, refresh_index_metadata};
pub use keys::Command;
pub use model::NavigationModel;
pub use movement::{Delta, Step, move_by, move_from, move_into_widget};
