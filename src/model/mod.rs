//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - dataset locations and load status
//! - `navigation` - modules and role permissions
//! - `records` - per-module columns and row actions
//! - `ModalStack` - Modal overlay management

pub mod domain;
pub mod modal;
pub mod navigation;
pub mod records;

