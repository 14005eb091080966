// src/version/record.rs

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::errors::{RelkitError, Result};
use crate::fs::FileSystem;
use crate::properties::PropertiesDocument;

pub const VERSION_MAJOR_KEY: &str = "versionMajor";
pub const VERSION_MINOR_KEY: &str = "versionMinor";
pub const VERSION_BUILD_KEY: &str = "versionBuild";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    Major,
    Minor,
    Build,
}

impl VersionField {
    pub fn key(self) -> &'static str {
        match self {
            VersionField::Major => VERSION_MAJOR_KEY,
            VersionField::Minor => VERSION_MINOR_KEY,
            VersionField::Build => VERSION_BUILD_KEY,
        }
    }
}

/// The `versionMajor` / `versionMinor` / `versionBuild` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRecord {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl VersionRecord {
    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// Parse the record from a properties document. Every key must be
    /// present and hold a non-negative integer; nothing is defaulted.
    pub fn from_document(doc: &PropertiesDocument) -> Result<Self> {
        let field = |field: VersionField| -> Result<u32> {
            let key = field.key();
            let raw = doc
                .get(key)
                .ok_or_else(|| RelkitError::VersionRecord(format!("missing key '{key}'")))?;
            raw.parse::<u32>().map_err(|e| {
                RelkitError::VersionRecord(format!("'{key}' is not a valid number ('{raw}'): {e}"))
            })
        };

        Ok(Self {
            major: field(VersionField::Major)?,
            minor: field(VersionField::Minor)?,
            build: field(VersionField::Build)?,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_document(&PropertiesDocument::parse(text))
    }

    /// Read the record from `path`.
    pub fn read(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        Self::parse(&read_document_text(fs, path)?)
    }

    pub fn get(&self, field: VersionField) -> u32 {
        match field {
            VersionField::Major => self.major,
            VersionField::Minor => self.minor,
            VersionField::Build => self.build,
        }
    }

    /// Copy with `field` incremented by one; other fields are untouched.
    pub fn incremented(&self, field: VersionField) -> Result<Self> {
        let next = self.get(field).checked_add(1).ok_or_else(|| {
            RelkitError::VersionRecord(format!("'{}' cannot be incremented further", field.key()))
        })?;

        let mut record = *self;
        match field {
            VersionField::Major => record.major = next,
            VersionField::Minor => record.minor = next,
            VersionField::Build => record.build = next,
        }
        Ok(record)
    }

    /// Read-modify-write of the record file, changing only `field`.
    ///
    /// Not safe against concurrent writers; callers serialize.
    pub fn increment_file(fs: &dyn FileSystem, path: &Path, field: VersionField) -> Result<Self> {
        let mut doc = PropertiesDocument::parse(&read_document_text(fs, path)?);
        let current = Self::from_document(&doc)?;
        let next = current.incremented(field)?;

        doc.set(field.key(), next.get(field).to_string());
        fs.write(path, doc.render().as_bytes())?;

        info!(
            field = field.key(),
            from = %current,
            to = %next,
            path = ?path,
            "version record updated"
        );
        Ok(next)
    }

    /// `major.minor.build`.
    pub fn version_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

fn read_document_text(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    if !fs.is_file(path) {
        return Err(RelkitError::VersionRecord(format!(
            "could not read version file {}",
            path.display()
        )));
    }
    Ok(fs.read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn parses_trimmed_values() {
        let record =
            VersionRecord::parse("versionMajor= 1 \nversionMinor=4\nversionBuild =9\n").unwrap();
        assert_eq!(record, VersionRecord::new(1, 4, 9));
        assert_eq!(record.version_name(), "1.4.9");
    }

    #[test]
    fn whitespace_separated_record_parses() {
        let record = VersionRecord::parse("versionMajor 1\nversionMinor 4\nversionBuild 9\n").unwrap();
        assert_eq!(record, VersionRecord::new(1, 4, 9));
    }

    #[test]
    fn last_duplicate_key_wins() {
        let record = VersionRecord::parse(
            "versionMajor=1\nversionMinor=4\nversionBuild=9\nversionBuild=12\n",
        )
        .unwrap();
        assert_eq!(record.build, 12);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = VersionRecord::parse("versionMajor=1\nversionMinor=4\n").unwrap_err();
        assert!(matches!(err, RelkitError::VersionRecord(msg) if msg.contains("versionBuild")));
    }

    #[test]
    fn negative_or_text_values_are_errors() {
        assert!(VersionRecord::parse("versionMajor=-1\nversionMinor=0\nversionBuild=0").is_err());
        assert!(VersionRecord::parse("versionMajor=one\nversionMinor=0\nversionBuild=0").is_err());
    }

    #[test]
    fn increment_only_touches_one_field() {
        let record = VersionRecord::new(1, 4, 9);
        assert_eq!(
            record.incremented(VersionField::Build).unwrap(),
            VersionRecord::new(1, 4, 10)
        );
        assert_eq!(
            record.incremented(VersionField::Major).unwrap(),
            VersionRecord::new(2, 4, 9)
        );
    }

    #[test]
    fn increment_file_preserves_other_lines() {
        let fs = MockFileSystem::new();
        let path = PathBuf::from("/app/version.properties");
        fs.add_file(
            &path,
            "#Tue Oct 07 10:00:00 CEST 2025\nversionMajor=1\nversionMinor=4\nversionBuild=9\n",
        );

        let next = VersionRecord::increment_file(&fs, &path, VersionField::Minor).unwrap();

        assert_eq!(next, VersionRecord::new(1, 5, 9));
        assert_eq!(
            fs.contents(&path).unwrap(),
            "#Tue Oct 07 10:00:00 CEST 2025\nversionMajor=1\nversionMinor=5\nversionBuild=9\n"
        );
    }

    #[test]
    fn increment_file_keeps_untouched_entries_byte_for_byte() {
        let fs = MockFileSystem::new();
        let path = PathBuf::from("/app/version.properties");
        fs.add_file(&path, "versionMajor = 1\nversionMinor : 4\nversionBuild 9\n");

        VersionRecord::increment_file(&fs, &path, VersionField::Build).unwrap();

        assert_eq!(
            fs.contents(&path).unwrap(),
            "versionMajor = 1\nversionMinor : 4\nversionBuild=10\n"
        );
    }

    #[test]
    fn missing_file_is_a_version_record_error() {
        let fs = MockFileSystem::new();
        let err = VersionRecord::read(&fs, Path::new("/app/version.properties")).unwrap_err();
        assert!(matches!(err, RelkitError::VersionRecord(msg) if msg.contains("could not read")));
    }
}
