use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use underdark_system_tilemap::{RoomTiles, TilemapError};

const TRANSFER_DOMAIN: &str = "room";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded room payload.
pub(crate) const TRANSFER_HEADER: &str = "room:v1";
/// Delimiter used to separate the prefix, room level and payload.
const FIELD_DELIMITER: char = ':';

/// Single room level packed into a copy-and-paste friendly string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RoomTransfer {
    /// Identifier of the room.
    pub(crate) room_id: u16,
    /// Level within the room, starting at one.
    pub(crate) level: u16,
    /// Tile layout of the level.
    pub(crate) tiles: RoomTiles,
}

impl RoomTransfer {
    /// Encodes the room into a single-line string.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let encoded = STANDARD_NO_PAD.encode(self.tiles.to_codes());
        format!("{TRANSFER_HEADER}:{}x{}:{encoded}", self.room_id, self.level)
    }

    /// Decodes a room from its string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, RoomTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RoomTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(RoomTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(RoomTransferError::MissingVersion)?;
        let room_level = parts.next().ok_or(RoomTransferError::MissingRoomLevel)?;
        let payload = parts.next().ok_or(RoomTransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(RoomTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(RoomTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (room_id, level) = parse_room_level(room_level)?;
        let codes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(RoomTransferError::InvalidEncoding)?;
        let tiles = RoomTiles::from_codes(&codes).map_err(RoomTransferError::InvalidTiles)?;

        Ok(Self {
            room_id,
            level,
            tiles,
        })
    }
}

/// Errors that can occur while decoding room transfer strings.
#[derive(Debug, Error)]
pub(crate) enum RoomTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("room string was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("room string is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("room string is missing the version")]
    MissingVersion,
    /// The room and level segment was missing.
    #[error("room string is missing the room and level")]
    MissingRoomLevel,
    /// The payload segment was missing.
    #[error("room string is missing the payload")]
    MissingPayload,
    /// The string used an unexpected prefix.
    #[error("room prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The string used an unsupported version.
    #[error("room version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The room and level could not be parsed.
    #[error("could not parse room and level '{0}'")]
    InvalidRoomLevel(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode room payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a valid room definition.
    #[error("room payload is not a valid room: {0}")]
    InvalidTiles(#[source] TilemapError),
}

fn parse_room_level(room_level: &str) -> Result<(u16, u16), RoomTransferError> {
    let invalid = || RoomTransferError::InvalidRoomLevel(room_level.to_owned());
    let (room_id, level) = room_level.split_once(['x', 'X']).ok_or_else(invalid)?;

    let room_id = room_id.trim().parse::<u16>().map_err(|_| invalid())?;
    let level = level.trim().parse::<u16>().map_err(|_| invalid())?;

    if room_id == 0 || level == 0 {
        return Err(invalid());
    }

    Ok((room_id, level))
}
