//! # Aeon Editor - Regulatory Network Editor Core
//!
//! Editing core for regulatory (Boolean) network models: variables connected
//! by signed, optionally observable regulations.
//!
//! ## Architecture
//!
//! The live model is the single source of truth. Every mutation is announced on
//! the event bus, and views keep derived state in sync by listening:
//!
//! ```text
//! ┌──────────────┐  Commands  ┌──────────────┐  Mutations  ┌────────────┐
//! │  Dialogs /   │───────────▶│  Controller  │────────────▶│ Live Model │
//! │  Formats     │◀───────────│              │             │            │
//! │              │  Prompts   │ - Import     │             │ - Vars     │
//! └──────────────┘            │ - Export     │             │ - Regs     │
//!                             └──────────────┘             └────────────┘
//!                                                                │ Events
//!                                                                ▼
//! ┌──────────────┐   Events   ┌──────────────┐
//! │    Views     │◀───────────│  Event Bus   │
//! │ - Graph      │            │              │
//! │ - Variables  │            │ - Channels   │
//! └──────────────┘            └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod editor;

// Re-export main types for easy access
pub use editor::*;
