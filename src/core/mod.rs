//! Core directory types

pub mod item;

pub use item::{Agent, Item, ItemKind, ItemMeta, Post, Skill, SkillStats, Source, Timestamp};
