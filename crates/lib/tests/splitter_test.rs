//! Tests for the default recursive character splitter.

use anyhow::Result;
use ragstage::{ChunkError, ChunkerConfig, RecursiveCharacterSplitter, TextSplitter};

#[test]
fn test_split_empty_input() {
    let splitter = RecursiveCharacterSplitter::default();
    assert!(splitter.split("").is_empty());
    assert!(splitter.split("   \n\n  ").is_empty());
}

#[test]
fn test_split_single_short_paragraph() {
    let splitter = RecursiveCharacterSplitter::default();
    let text = "This is a single paragraph well under the chunk size limit.";
    assert_eq!(splitter.split(text), vec![text.to_string()]);
}

#[test]
fn test_split_multiple_paragraphs() {
    let splitter = RecursiveCharacterSplitter::default();
    let chunks = splitter.split("First paragraph.\n\nSecond paragraph.\n\nThird paragraph.");
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], "First paragraph.");
    assert_eq!(chunks[1], "Second paragraph.");
    assert_eq!(chunks[2], "Third paragraph.");
}

#[test]
fn test_split_long_paragraph_windows_with_overlap() -> Result<()> {
    // chunk_size 200 and overlap 56: 500 chars produce windows starting at
    // 0, 144, 288 and 432.
    let splitter = RecursiveCharacterSplitter::new(ChunkerConfig::default())?;
    let long_text = "a".repeat(500);
    let chunks = splitter.split(&long_text);

    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[0].chars().count(), 200);
    assert_eq!(chunks[1].chars().count(), 200);
    assert_eq!(chunks[2].chars().count(), 200);
    assert_eq!(chunks[3].chars().count(), 68);
    // Consecutive windows share the configured overlap.
    assert_eq!(&chunks[0][200 - 56..], &chunks[1][..56]);
    assert_eq!(&chunks[1][200 - 56..], &chunks[2][..56]);
    Ok(())
}

#[test]
fn test_every_chunk_stays_within_bound() -> Result<()> {
    let config = ChunkerConfig {
        chunk_size: 50,
        chunk_overlap: 10,
        ..Default::default()
    };
    let splitter = RecursiveCharacterSplitter::new(config)?;
    let text = "word ".repeat(100);
    let chunks = splitter.split(&text);
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 50);
    }
    Ok(())
}

#[test]
fn test_custom_length_function_bounds_chunks() -> Result<()> {
    fn byte_len(text: &str) -> usize {
        text.len()
    }

    let config = ChunkerConfig {
        chunk_size: 40,
        chunk_overlap: 8,
        length_function: byte_len,
    };
    let splitter = RecursiveCharacterSplitter::new(config)?;
    // Multi-byte characters: the byte metric must bound the windows, not
    // the character count.
    let text = "héllo wörld ".repeat(30);
    let chunks = splitter.split(&text);
    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(chunk.len() <= 40);
    }
    Ok(())
}

#[test]
fn test_rejects_zero_chunk_size() {
    let config = ChunkerConfig {
        chunk_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        RecursiveCharacterSplitter::new(config),
        Err(ChunkError::InvalidConfig(_))
    ));
}

#[test]
fn test_rejects_overlap_not_smaller_than_size() {
    let config = ChunkerConfig {
        chunk_size: 100,
        chunk_overlap: 100,
        ..Default::default()
    };
    assert!(matches!(
        RecursiveCharacterSplitter::new(config),
        Err(ChunkError::InvalidConfig(_))
    ));
}
