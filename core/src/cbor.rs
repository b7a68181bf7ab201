// SPDX-License-Identifier: MIT OR Apache-2.0

//! CBOR serialization helpers for events and game records
//!
//! Relay layers forward [`GameEvent`]s as CBOR; finished games are stored as
//! CBOR [`GameRecord`]s by the archiver.

use crate::archiver::GameRecord;
use crate::GameEvent;

/// Serialize a game event to CBOR
pub fn encode_event(event: &GameEvent) -> Result<Vec<u8>, serde_cbor::Error> {
    serde_cbor::to_vec(event).map_err(|err| {
        tracing::error!("Failed to serialize game event: {}", err);
        err
    })
}

/// Deserialize a game event from CBOR
pub fn decode_event(data: &[u8]) -> Result<GameEvent, serde_cbor::Error> {
    serde_cbor::from_slice(data).map_err(|err| {
        tracing::warn!(len = data.len(), "Failed to deserialize game event: {}", err);
        err
    })
}

/// Serialize a game record to CBOR
pub fn encode_record(record: &GameRecord) -> Result<Vec<u8>, serde_cbor::Error> {
    serde_cbor::to_vec(record).map_err(|err| {
        tracing::error!("Failed to serialize game record: {}", err);
        err
    })
}

/// Deserialize a game record from CBOR
pub fn decode_record(data: &[u8]) -> Result<GameRecord, serde_cbor::Error> {
    serde_cbor::from_slice(data).map_err(|err| {
        tracing::warn!(len = data.len(), "Failed to deserialize game record: {}", err);
        err
    })
}
