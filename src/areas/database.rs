//! Content store
//!
//! Blobs and commits are stored once per distinct content under
//! `.gitlet/objects/<2 hex>/<38 hex>`, zlib-compressed. Storing is idempotent: an object
//! that already exists is never rewritten.

use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object unless it already exists and return its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            let compressed = Self::compress(&object.serialize()?)?;
            Self::write_object(&object_path, &compressed)?;
        }

        Ok(object_id)
    }

    /// Store file content as a blob
    pub fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Blob::deserialize(object_reader)?.into_content()),
            other => anyhow::bail!("object {} is a {}, not a blob", object_id, other),
        }
    }

    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            other => anyhow::bail!("object {} is a {}, not a commit", object_id, other),
        }
    }

    /// Content of `name` in `commit`, or empty content if the commit does not track it
    ///
    /// Callers must check [`Commit::contains_file`] to tell an empty file apart from an
    /// untracked one.
    pub fn load_file(&self, commit: &Commit, name: &str) -> anyhow::Result<Bytes> {
        match commit.file_oid(name) {
            Some(oid) => self.load_blob(oid),
            None => Ok(Bytes::new()),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Err(RepositoryError::ObjectNotFound(object_id.clone()).into());
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, _) = ObjectType::read_header(&mut object_reader)
            .with_context(|| format!("Invalid object {}", object_id))?;

        Ok((object_type, object_reader))
    }

    fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let compressed = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        let mut content = Vec::new();
        flate2::read::ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut content)
            .with_context(|| format!("Corrupt object file {}", object_path.display()))?;

        Ok(content.into())
    }

    /// Write through a sibling temp file so readers never see a partial object
    fn write_object(object_path: &Path, compressed: &[u8]) -> anyhow::Result<()> {
        let fan_out_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(fan_out_dir).with_context(|| {
            format!("Unable to create object directory {}", fan_out_dir.display())
        })?;

        let temp_path = fan_out_dir.join(format!("tmp-obj-{}", rand::random::<u32>()));
        std::fs::write(&temp_path, compressed)
            .with_context(|| format!("Unable to write object file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, object_path)
            .with_context(|| format!("Unable to move object into {}", object_path.display()))
    }

    fn compress(data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish().context("Unable to compress object content")
    }

    /// Every stored object ID starting with `prefix`, of any type
    ///
    /// Prefixes of two or more digits only list their fan-out directory; shorter ones
    /// scan all 256.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let dir_names = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255).map(|i| format!("{:02x}", i)).collect()
        };

        let mut matches = Vec::new();
        for dir_name in dir_names {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)
                .with_context(|| format!("Unable to list objects in {}", dir_path.display()))?
            {
                let entry = entry?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                // temp files never parse as object IDs
                if let Ok(oid) = ObjectId::try_parse(full_oid)
                    && oid.starts_with(&prefix)
                {
                    matches.push(oid);
                }
            }
        }

        Ok(matches)
    }

    /// Resolve an abbreviated commit ID
    ///
    /// Only commit objects are candidates, so a prefix shared with a blob still resolves.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.is_empty() || prefix.len() > OBJECT_ID_LENGTH {
            return Err(RepositoryError::NoCommitWithId.into());
        }

        let candidates = self
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .map(|oid| Ok((self.object_type(&oid)?, oid)))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .filter(|(object_type, _)| *object_type == ObjectType::Commit)
            .map(|(_, oid)| oid)
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => Err(RepositoryError::NoCommitWithId.into()),
            [oid] => Ok(oid.clone()),
            _ => Err(RepositoryError::AmbiguousCommitId(prefix.to_string()).into()),
        }
    }

    /// Every commit in the store, in no particular order
    pub fn list_commits(&self) -> anyhow::Result<Vec<Commit>> {
        self.find_objects_by_prefix("")?
            .into_iter()
            .filter_map(|oid| match self.object_type(&oid) {
                Ok(ObjectType::Commit) => Some(self.load_commit(&oid)),
                Ok(_) => None,
                Err(error) => Some(Err(error)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::error::as_user_error;
    use assert_fs::TempDir;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeMap;

    #[fixture]
    fn database_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn database_in(dir: &TempDir) -> Database {
        Database::new(dir.path().join("objects").into_boxed_path())
    }

    fn count_objects(database: &Database) -> usize {
        database.find_objects_by_prefix("").unwrap().len()
    }

    fn child(parent: &Commit, message: &str, seconds: i64) -> Commit {
        Commit::new_child(
            parent,
            None,
            message.into(),
            &BTreeMap::new(),
            [],
            DateTime::from_timestamp(seconds, 0).unwrap().fixed_offset(),
        )
        .unwrap()
    }

    #[rstest]
    fn blobs_round_trip(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let oid = database.put_blob(Bytes::from_static(b"hello\n")).unwrap();

        assert_eq!(oid.as_ref(), "ce013625030ba8dba906f756967f9e9ca394464a");
        assert_eq!(database.load_blob(&oid).unwrap(), Bytes::from_static(b"hello\n"));
    }

    #[rstest]
    fn missing_objects_are_reported_as_not_found(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let oid = ObjectId::try_parse("0".repeat(40)).unwrap();

        let error = database.load_blob(&oid).unwrap_err();
        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::ObjectNotFound(oid))
        );
        assert!(as_user_error(&error).is_none());
    }

    #[rstest]
    fn commits_round_trip(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let root = Commit::root().unwrap();
        let oid = database.store_commit(&root).unwrap();

        assert_eq!(&oid, root.oid());
        assert_eq!(database.load_commit(&oid).unwrap(), root);
        assert!(database.load_blob(&oid).is_err());
    }

    #[rstest]
    fn commit_prefixes_resolve_to_commits_only(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let root = Commit::root().unwrap();
        database.store_commit(&root).unwrap();
        database.put_blob(Bytes::from_static(b"content")).unwrap();

        let short = &root.oid().as_ref()[..8];
        assert_eq!(&database.resolve_commit_prefix(short).unwrap(), root.oid());
        assert_eq!(
            &database
                .resolve_commit_prefix(&root.oid().as_ref().to_uppercase())
                .unwrap(),
            root.oid()
        );
    }

    #[rstest]
    #[case("")]
    #[case("zz")]
    #[case("0123456789012345678901234567890123456789a")]
    fn bad_prefixes_resolve_to_nothing(database_dir: TempDir, #[case] prefix: &str) {
        let database = database_in(&database_dir);
        database.store_commit(&Commit::root().unwrap()).unwrap();

        let error = database.resolve_commit_prefix(prefix).unwrap_err();
        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::NoCommitWithId)
        );
    }

    #[rstest]
    fn shared_prefixes_are_ambiguous(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let root = Commit::root().unwrap();
        database.store_commit(&root).unwrap();
        for seconds in 1..40 {
            database
                .store_commit(&child(&root, "child", seconds))
                .unwrap();
        }

        // 40 commits spread over 16 possible first characters
        let crowded = database
            .list_commits()
            .unwrap()
            .iter()
            .map(|commit| commit.oid().as_ref()[..1].to_string())
            .fold(BTreeMap::<String, usize>::new(), |mut counts, first| {
                *counts.entry(first).or_default() += 1;
                counts
            })
            .into_iter()
            .find(|(_, count)| *count > 1)
            .map(|(first, _)| first)
            .unwrap();

        let error = database.resolve_commit_prefix(&crowded).unwrap_err();
        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::AmbiguousCommitId(crowded))
        );
    }

    #[rstest]
    fn listing_commits_skips_blobs(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let root = Commit::root().unwrap();
        let first = child(&root, "first", 10);
        database.store_commit(&root).unwrap();
        database.store_commit(&first).unwrap();
        database.put_blob(Bytes::from_static(b"blob")).unwrap();

        let mut messages = database
            .list_commits()
            .unwrap()
            .iter()
            .map(|commit| commit.message().to_string())
            .collect::<Vec<_>>();
        messages.sort();

        assert_eq!(messages, vec!["first".to_string(), "initial commit".to_string()]);
    }

    #[rstest]
    fn untracked_files_load_as_empty(database_dir: TempDir) {
        let database = database_in(&database_dir);
        let root = Commit::root().unwrap();

        assert!(database.load_file(&root, "missing.txt").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn storing_twice_keeps_a_single_copy(content in proptest::collection::vec(any::<u8>(), 0..256)) {
            let dir = TempDir::new().unwrap();
            let database = database_in(&dir);

            let first = database.put_blob(Bytes::from(content.clone())).unwrap();
            let second = database.put_blob(Bytes::from(content.clone())).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(count_objects(&database), 1);
            prop_assert_eq!(database.load_blob(&first).unwrap(), Bytes::from(content));
        }
    }
}
