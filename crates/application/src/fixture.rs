//! Upload fixture
//!
//! The upload case submits a minimal WAV file synthesized in memory; the
//! harness never reads from disk.

use chrono::Utc;

use soundcheck_domain::FilePart;

/// Minimal RIFF/WAVE header: 16-bit mono PCM at 44.1 kHz with an empty data
/// chunk. Enough for the service to recognize an audio file.
pub const WAV_HEADER: [u8; 44] = [
    0x52, 0x49, 0x46, 0x46, // "RIFF"
    0x24, 0x00, 0x00, 0x00, // chunk size: 36
    0x57, 0x41, 0x56, 0x45, // "WAVE"
    0x66, 0x6d, 0x74, 0x20, // "fmt "
    0x10, 0x00, 0x00, 0x00, // subchunk size: 16
    0x01, 0x00, // PCM
    0x01, 0x00, // mono
    0x44, 0xac, 0x00, 0x00, // 44100 Hz
    0x88, 0x58, 0x01, 0x00, // byte rate: 88200
    0x02, 0x00, // block align
    0x10, 0x00, // 16 bits per sample
    0x64, 0x61, 0x74, 0x61, // "data"
    0x00, 0x00, 0x00, 0x00, // data size: 0
];

/// Multipart field name carrying the audio files.
pub const FILES_FIELD: &str = "files";

/// Multipart text field naming the upload folder.
pub const FOLDER_NAME_FIELD: &str = "folderName";

/// File name sent with the fixture part.
pub const FIXTURE_FILE_NAME: &str = "test_audio.wav";

/// Builds the in-memory WAV file part for the upload case.
#[must_use]
pub fn wav_file_part() -> FilePart {
    FilePart::new(FILES_FIELD, FIXTURE_FILE_NAME, WAV_HEADER.to_vec())
}

/// Builds a folder name unique-ish per run, suffixed with the wall-clock
/// time (HHMMSS).
#[must_use]
pub fn folder_name() -> String {
    format!("Test_Pack_{}", Utc::now().format("%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wav_header_shape() {
        assert_eq!(WAV_HEADER.len(), 44);
        assert_eq!(&WAV_HEADER[0..4], b"RIFF");
        assert_eq!(&WAV_HEADER[8..12], b"WAVE");
        assert_eq!(&WAV_HEADER[36..40], b"data");
    }

    #[test]
    fn test_wav_file_part() {
        let part = wav_file_part();
        assert_eq!(part.name, "files");
        assert_eq!(part.file_name, "test_audio.wav");
        assert_eq!(part.bytes, WAV_HEADER.to_vec());
    }

    #[test]
    fn test_folder_name_format() {
        let name = folder_name();
        assert!(name.starts_with("Test_Pack_"));
        assert_eq!(name.len(), "Test_Pack_".len() + 6);
    }
}
