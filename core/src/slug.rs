//! One-way textual rendering of compasses.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Compass, Coord};

/// Separator placed between slug tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    /// No separator configured.
    None,
    /// Explicitly empty separator.
    Empty,
    /// `,`
    #[default]
    Comma,
    /// `.`
    Period,
    /// `;`
    Semicolon,
    /// `-`
    Hyphen,
}

impl SlugSeparator {
    /// Text emitted between tokens, `None` when tokens are run together.
    #[must_use]
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::None | Self::Empty => None,
            Self::Comma => Some(","),
            Self::Period => Some("."),
            Self::Semicolon => Some(";"),
            Self::Hyphen => Some("-"),
        }
    }
}

impl FromStr for SlugSeparator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "empty" | "" => Ok(Self::Empty),
            "comma" | "," => Ok(Self::Comma),
            "period" | "." => Ok(Self::Period),
            "semicolon" | ";" => Ok(Self::Semicolon),
            "hyphen" | "-" => Ok(Self::Hyphen),
            other => Err(format!("unknown slug separator '{other}'")),
        }
    }
}

struct Slug<'a> {
    compass: &'a Compass,
    yonder: u32,
    separator: Option<&'static str>,
}

impl Slug<'_> {
    fn separate(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.separator {
            Some(separator) => f.write_str(separator),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Slug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compass = self.compass;
        if compass.room_id() > 0 {
            write!(f, "#{}", compass.room_id())?;
            self.separate(f)?;
        }
        if compass.over() > 0 || compass.under() > 0 {
            if compass.over() > 0 {
                write!(f, "O{}", compass.over())?;
            }
            if compass.under() > 0 {
                write!(f, "U{}", compass.under())?;
            }
            self.separate(f)?;
        }
        if compass.north() > 0 {
            write!(f, "N{}", compass.north())?;
        } else {
            write!(f, "S{}", compass.south())?;
        }
        self.separate(f)?;
        if compass.east() > 0 {
            write!(f, "E{}", compass.east())?;
        } else {
            write!(f, "W{}", compass.west())?;
        }
        if self.yonder != 0 {
            self.separate(f)?;
            write!(f, "Y{}", self.yonder)?;
        }
        Ok(())
    }
}

impl Compass {
    /// Renders the compass and a `yonder` depth into a compact slug.
    ///
    /// Invalid compasses render as an empty string. The slug is lossy and
    /// has no parser.
    #[must_use]
    pub fn to_slug(&self, yonder: u32, separator: SlugSeparator) -> String {
        if !self.is_valid() {
            return String::new();
        }
        Slug {
            compass: self,
            yonder,
            separator: separator.as_str(),
        }
        .to_string()
    }
}

/// Renders `compass` into a slug, empty when absent or invalid.
#[must_use]
pub fn compass_to_slug(compass: Option<&Compass>, yonder: u32, separator: SlugSeparator) -> String {
    compass.map_or_else(String::new, |compass| compass.to_slug(yonder, separator))
}

/// Decodes `coord` and renders it with the default separator.
#[must_use]
pub fn coord_to_slug(coord: Coord, yonder: u32) -> String {
    compass_to_slug(coord.to_compass().as_ref(), yonder, SlugSeparator::default())
}
