//! Corpus loading from the local document directory.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::core::errors::PipelineError;

/// A source document read from the corpus directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path relative to the corpus root, with `/` separators.
    pub source: String,
    pub content: String,
}

/// Reads every file under `dir` whose extension matches `extension`, sorted by path.
pub fn load_documents(dir: &Path, extension: &str) -> Result<Vec<Document>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::Corpus {
            path: dir.display().to_string(),
            message: "not a directory".to_string(),
        });
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::Corpus {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extension) {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| PipelineError::Corpus {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        tracing::debug!("Loaded {} ({} bytes)", source, content.len());
        documents.push(Document { source, content });
    }

    Ok(documents)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_matching_files_recursively_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("projects")).unwrap();
        fs::write(dir.path().join("projects/tapnex.md"), "Tapnex notes").unwrap();
        fs::write(dir.path().join("about.md"), "About me").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("SKILLS.MD"), "Rust, Python").unwrap();

        let docs = load_documents(dir.path(), "md").unwrap();
        let sources: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();

        assert_eq!(sources, vec!["SKILLS.MD", "about.md", "projects/tapnex.md"]);
        assert_eq!(docs[2].content, "Tapnex notes");
    }

    #[test]
    fn missing_directory_is_a_corpus_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_documents(&dir.path().join("nope"), "md").unwrap_err();
        assert!(matches!(err, PipelineError::Corpus { .. }));
    }

    #[test]
    fn extension_may_carry_a_dot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "x").unwrap();
        assert_eq!(load_documents(dir.path(), ".md").unwrap().len(), 1);
    }
}
