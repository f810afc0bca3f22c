//! Data models for Atlas Flow
//!
//! Defines the board snapshot (`Board`), its columns and cards, and the
//! explicit patch/draft structures used by the store's update commands.
//!
//! Field names serialize in camelCase so a snapshot reads as
//! `{ "boardTitle", "columns", "availableTags" }`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title given to a board that has never been renamed
pub const DEFAULT_BOARD_TITLE: &str = "My Todo Board";

/// Visual category of a column
///
/// The core treats it as an opaque label; presentation decides the colors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnTheme {
    #[default]
    Sky,
    Amber,
    Violet,
    Emerald,
    Rose,
    Slate,
}

impl ColumnTheme {
    /// Every theme, in display order
    pub const ALL: [ColumnTheme; 6] = [
        ColumnTheme::Sky,
        ColumnTheme::Amber,
        ColumnTheme::Violet,
        ColumnTheme::Emerald,
        ColumnTheme::Rose,
        ColumnTheme::Slate,
    ];

    /// Get the theme name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnTheme::Sky => "sky",
            ColumnTheme::Amber => "amber",
            ColumnTheme::Violet => "violet",
            ColumnTheme::Emerald => "emerald",
            ColumnTheme::Rose => "rose",
            ColumnTheme::Slate => "slate",
        }
    }
}

impl fmt::Display for ColumnTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown column theme '{0}'. Valid themes: sky, amber, violet, emerald, rose, slate")]
pub struct ParseThemeError(pub String);

impl FromStr for ColumnTheme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnTheme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}

/// A task card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier, fixed at creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags in display order, no duplicates
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this card was created
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Build a card from a draft with an assigned id and creation time
    pub fn from_draft(id: impl Into<String>, draft: CardDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            tags: dedup_tags(draft.tags),
            created_at,
        }
    }

    /// Check whether the card carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag if it is not already present
    ///
    /// Returns true if the tag was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag
    ///
    /// Returns true if the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(pos) => {
                self.tags.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// A named, themed column of cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    /// Unique identifier, fixed at creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Visual category
    #[serde(default)]
    pub theme: ColumnTheme,
    /// Cards in caller-controlled order
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<String>, title: impl Into<String>, theme: ColumnTheme) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            theme,
            cards: Vec::new(),
        }
    }

    /// Get a card by ID
    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    /// Get the index of a card by ID
    pub fn card_index(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }
}

/// Full board snapshot
///
/// This is the document handed to persistence and returned to presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board title
    #[serde(rename = "boardTitle")]
    pub title: String,
    /// Columns in display order
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Global tag vocabulary
    #[serde(default)]
    pub available_tags: Vec<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_TITLE)
    }
}

impl Board {
    /// Create an empty board
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            available_tags: Vec::new(),
        }
    }

    /// Get a column by ID
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    /// Get a card within a specific column
    pub fn card(&self, column_id: &str, card_id: &str) -> Option<&Card> {
        self.column(column_id).and_then(|column| column.card(card_id))
    }

    /// Find a card anywhere on the board, returning its owning column
    pub fn find_card(&self, card_id: &str) -> Option<(&Column, &Card)> {
        self.columns
            .iter()
            .find_map(|column| column.card(card_id).map(|card| (column, card)))
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }

    /// Check whether an ID is used by any column or card
    pub fn contains_id(&self, id: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.id == id || column.card(id).is_some())
    }

    /// Check whether a tag is in the vocabulary
    pub fn has_tag(&self, tag: &str) -> bool {
        self.available_tags.iter().any(|t| t == tag)
    }

    /// Vocabulary tags with the number of cards using each
    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        self.available_tags
            .iter()
            .map(|tag| {
                let count = self
                    .columns
                    .iter()
                    .flat_map(|column| column.cards.iter())
                    .filter(|card| card.has_tag(tag))
                    .count();
                (tag.clone(), count)
            })
            .collect()
    }
}

/// Fields supplied when creating a card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDraft {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl CardDraft {
    /// Start a draft with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for a column
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub theme: Option<ColumnTheme>,
}

impl ColumnPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn theme(theme: ColumnTheme) -> Self {
        Self {
            theme: Some(theme),
            ..Default::default()
        }
    }

    /// Check whether the patch sets nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.theme.is_none()
    }

    /// Merge into a column, returning true if anything changed
    pub fn apply_to(self, column: &mut Column) -> bool {
        let mut changed = false;
        if let Some(title) = self.title {
            changed |= replace_if_different(&mut column.title, title);
        }
        if let Some(theme) = self.theme {
            changed |= replace_if_different(&mut column.theme, theme);
        }
        changed
    }
}

/// Partial update for a card
///
/// Each field is either unset (`None`) or set to a value. `description` is
/// doubly wrapped so it can be cleared: `Some(None)` removes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl CardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(description: Option<String>) -> Self {
        Self {
            description: Some(description),
            ..Default::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Check whether the patch sets nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }

    /// Merge into a card, returning true if anything changed
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply_to(self, card: &mut Card) -> bool {
        let mut changed = false;
        if let Some(title) = self.title {
            changed |= replace_if_different(&mut card.title, title);
        }
        if let Some(description) = self.description {
            changed |= replace_if_different(&mut card.description, description);
        }
        if let Some(tags) = self.tags {
            changed |= replace_if_different(&mut card.tags, dedup_tags(tags));
        }
        changed
    }
}

/// Remove duplicate tags, keeping the first occurrence of each
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
