// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game archive helper functions for the core crate

use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::engine::GameResult;
use crate::history::CanonicalState;
use crate::Move;

// Threshold for gzip compression (1 MiB)
const COMPRESSION_THRESHOLD: usize = 1024 * 1024;

/// Everything needed to replay or review a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Number of points on the board
    pub points: usize,
    pub komi: f32,
    /// Committed actions in order
    pub moves: Vec<Move>,
    pub final_position: CanonicalState,
    /// `None` while the game is still running
    pub result: Option<GameResult>,
}

/// Archives a finished game into `dir`
///
/// The file is named `YYYY-MM-DD_<points>pt_<moves>mv.cbor`, with a numeric
/// suffix when that name is taken. If the CBOR data exceeds 1 MiB it is gzip
/// compressed and saved with a `.cbor.gz` extension.
pub fn archive_finished_game(record: &GameRecord, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory {}", dir.display()))?;

    let date = Utc::now().format("%Y-%m-%d").to_string();
    let filename_base = format!("{}_{}pt_{}mv", date, record.points, record.moves.len());

    let cbor_data = crate::cbor::encode_record(record).context("Failed to serialize game to CBOR")?;

    let (final_data, extension) = if cbor_data.len() >= COMPRESSION_THRESHOLD {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&cbor_data)
            .context("Failed to compress game data")?;
        let compressed_data = encoder.finish().context("Failed to finish compression")?;

        tracing::info!(
            "Compressed game archive from {} bytes to {} bytes",
            cbor_data.len(),
            compressed_data.len()
        );
        (compressed_data, "cbor.gz")
    } else {
        (cbor_data, "cbor")
    };

    // create_new claims the name atomically; a taken name moves on to the next suffix
    let mut suffix = 1;
    let (file_path, mut file) = loop {
        let filename = if suffix == 1 {
            format!("{}.{}", filename_base, extension)
        } else {
            format!("{}_{}.{}", filename_base, suffix, extension)
        };
        let candidate = dir.join(filename);
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => break (candidate, file),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create archive file {}", candidate.display()))
            }
        }
    };

    file.write_all(&final_data)
        .context("Failed to write archive data")?;
    file.flush().context("Failed to flush file buffer")?;

    tracing::info!("Game archived to {:?} ({} bytes)", file_path, final_data.len());
    Ok(file_path)
}

/// Read a game archive file, handling both compressed and uncompressed formats
pub fn read_game_archive(path: &Path) -> Result<GameRecord> {
    let buffer = std::fs::read(path)
        .with_context(|| format!("Failed to read archive file {}", path.display()))?;

    let cbor_data = if path.to_string_lossy().ends_with(".gz") {
        let mut decoder = GzDecoder::new(&buffer[..]);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Failed to decompress archive data")?;
        decompressed
    } else {
        buffer
    };

    crate::cbor::decode_record(&cbor_data).context("Failed to parse CBOR data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn record(moves: usize) -> GameRecord {
        GameRecord {
            points: 361,
            komi: 7.5,
            moves: (0..moves)
                .map(|i| Move::Place {
                    point: i % 361,
                    color: if i % 2 == 0 { Color::Black } else { Color::White },
                })
                .collect(),
            final_position: CanonicalState::from_stones(&[crate::Stone::Empty; 361]),
            result: None,
        }
    }

    #[test]
    fn test_archive_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let original = record(12);

        let path = archive_finished_game(&original, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_361pt_12mv.cbor"), "unexpected name {}", name);

        let loaded = read_game_archive(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_same_day_games_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let first = archive_finished_game(&record(3), dir.path()).unwrap();
        let second = archive_finished_game(&record(3), dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("_3mv_2.cbor"));
    }

    #[test]
    fn test_existing_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let taken = dir.path().join(format!("{}_361pt_5mv.cbor", date));
        std::fs::write(&taken, b"keep me").unwrap();

        let path = archive_finished_game(&record(5), dir.path()).unwrap();
        assert_ne!(path, taken);
        assert!(path.to_string_lossy().ends_with("_5mv_2.cbor"));
        assert_eq!(std::fs::read(&taken).unwrap(), b"keep me");
        assert_eq!(read_game_archive(&path).unwrap().moves.len(), 5);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_large_archive_is_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let large = record(200_000);
        let path = archive_finished_game(&large, dir.path()).unwrap();
        assert!(path.to_string_lossy().ends_with(".cbor.gz"));
        assert_eq!(read_game_archive(&path).unwrap().moves.len(), 200_000);
    }
}
