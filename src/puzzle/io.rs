//! File I/O for Hashi puzzles

use super::{Island, Puzzle};
use anyhow::{Context, Result};
use std::path::Path;

/// A puzzle as read from disk, with the island rows exactly as the file had them
#[derive(Debug, Clone)]
pub struct PuzzleFile {
    pub puzzle: Puzzle,
    /// Island arrays verbatim, including any trailing fields beyond `[x, y, required]`
    pub raw_islands: Vec<serde_json::Value>,
}

/// Load a puzzle from a JSON file.
/// Format: `[[width, height], [[x, y, required, ...], ...]]`
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<PuzzleFile> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle from its JSON representation
pub fn parse_puzzle_from_string(content: &str) -> Result<PuzzleFile> {
    let (dimensions, raw_islands): ([usize; 2], Vec<serde_json::Value>) =
        serde_json::from_str(content).context("Expected [[width, height], [islands...]]")?;

    let mut islands = Vec::with_capacity(raw_islands.len());
    for (index, raw) in raw_islands.iter().enumerate() {
        let island: Island = serde_json::from_value(raw.clone())
            .with_context(|| format!("Invalid island {}: {}", index, raw))?;
        islands.push(island);
    }

    let [width, height] = dimensions;
    let puzzle = Puzzle::new(width, height, islands)?;

    Ok(PuzzleFile {
        puzzle,
        raw_islands,
    })
}

/// Serialize a puzzle in the on-disk format
pub fn puzzle_to_string(puzzle: &Puzzle) -> Result<String> {
    let document = serde_json::json!([[puzzle.width, puzzle.height], puzzle.islands]);
    serde_json::to_string_pretty(&document).context("Failed to serialize puzzle")
}

/// Save a puzzle to a JSON file
pub fn save_puzzle_to_file<P: AsRef<Path>>(puzzle: &Puzzle, path: P) -> Result<()> {
    let content = puzzle_to_string(puzzle)?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Built-in puzzles: three solvable, three without a solution
pub fn example_puzzles() -> Vec<(&'static str, Puzzle)> {
    let examples: [(&str, usize, usize, &[[usize; 3]]); 6] = [
        (
            "corner_cluster",
            4,
            4,
            &[[0, 0, 4], [0, 2, 2], [1, 0, 3], [1, 1, 4], [1, 2, 1], [3, 1, 3], [3, 2, 1]],
        ),
        ("square", 7, 7, &[[1, 1, 3], [4, 1, 4], [1, 4, 2], [4, 4, 3]]),
        ("l_shape", 3, 3, &[[0, 0, 2], [0, 1, 2], [0, 2, 1], [1, 0, 1]]),
        (
            "disconnected",
            4,
            4,
            &[[0, 0, 1], [0, 2, 1], [1, 1, 1], [1, 3, 1], [2, 3, 2], [3, 3, 1]],
        ),
        (
            "forced_crossing",
            3,
            3,
            &[[0, 0, 1], [0, 1, 1], [1, 0, 2], [1, 2, 2], [2, 1, 2], [2, 2, 2]],
        ),
        (
            "stranded_pair",
            5,
            5,
            &[[0, 0, 1], [0, 2, 2], [1, 0, 2], [1, 2, 1], [2, 1, 1], [3, 1, 2]],
        ),
    ];

    examples
        .into_iter()
        .filter_map(|(name, width, height, triples)| {
            Puzzle::from_triples(width, height, triples)
                .ok()
                .map(|puzzle| (name, puzzle))
        })
        .collect()
}

/// Write the built-in puzzles into a directory
pub fn create_example_puzzles<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, puzzle) in example_puzzles() {
        save_puzzle_to_file(&puzzle, dir.join(format!("{}.json", name)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_puzzle() {
        let content = "[[4, 4], [[0,0,4],[0,2,2],[1,0,3]]]";
        let file = parse_puzzle_from_string(content).unwrap();
        assert_eq!(file.puzzle.width, 4);
        assert_eq!(file.puzzle.islands[2], Island::new(1, 0, 3));
        assert_eq!(file.raw_islands.len(), 3);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let content = r#"[[3, 3], [[0, 0, 1, "a"], [2, 0, 1, "b"]]]"#;
        let file = parse_puzzle_from_string(content).unwrap();
        assert_eq!(file.puzzle.islands[1], Island::new(2, 0, 1));
        assert_eq!(file.raw_islands[1], serde_json::json!([2, 0, 1, "b"]));
    }

    #[test]
    fn test_invalid_puzzles_rejected() {
        assert!(parse_puzzle_from_string("{}").is_err());
        assert!(parse_puzzle_from_string("[[3, 3], [[0, 0]]]").is_err());
        assert!(parse_puzzle_from_string("[[3, 3], [[5, 0, 1]]]").is_err());
        assert!(parse_puzzle_from_string("[[3, 3], [[0, 0, 1], [0, 0, 2]]]").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/puzzle.json");
        let puzzle = Puzzle::from_triples(5, 5, &[[0, 0, 1], [4, 0, 1]]).unwrap();

        save_puzzle_to_file(&puzzle, &path).unwrap();
        let loaded = load_puzzle_from_file(&path).unwrap();
        assert_eq!(loaded.puzzle, puzzle);
    }

    #[test]
    fn test_example_puzzles() {
        let examples = example_puzzles();
        assert_eq!(examples.len(), 6);

        let dir = tempdir().unwrap();
        create_example_puzzles(dir.path()).unwrap();
        assert!(dir.path().join("corner_cluster.json").exists());
        assert!(dir.path().join("forced_crossing.json").exists());
        assert!(dir.path().join("stranded_pair.json").exists());
    }
}
