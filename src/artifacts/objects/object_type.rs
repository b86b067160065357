use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header, leaving the reader at the payload
    pub fn read_header(reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let object_type = read_field(reader, b' ')?.parse()?;
        let size = read_field(reader, b'\0')?
            .parse()
            .map_err(|_| anyhow::anyhow!("malformed object size"))?;

        Ok((object_type, size))
    }
}

fn read_field(reader: &mut impl BufRead, delimiter: u8) -> anyhow::Result<String> {
    let mut field = Vec::new();
    reader.read_until(delimiter, &mut field)?;

    if field.pop() != Some(delimiter) {
        anyhow::bail!("truncated object header");
    }

    Ok(String::from_utf8(field)?)
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => anyhow::bail!("unknown object type: {value}"),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::{Cursor, Read};

    #[test]
    fn header_leaves_reader_at_payload() {
        let mut reader = Cursor::new(b"commit 5\0hello".to_vec());

        assert_eq!(
            ObjectType::read_header(&mut reader).unwrap(),
            (ObjectType::Commit, 5)
        );

        let mut payload = String::new();
        reader.read_to_string(&mut payload).unwrap();
        assert_eq!(payload, "hello");
    }

    #[rstest]
    #[case::unknown_type(b"tree 3\0abc".as_slice())]
    #[case::bad_size(b"blob x\0abc".as_slice())]
    #[case::missing_nul(b"blob 3".as_slice())]
    #[case::empty(b"".as_slice())]
    fn malformed_headers_are_rejected(#[case] bytes: &[u8]) {
        assert!(ObjectType::read_header(&mut Cursor::new(bytes)).is_err());
    }
}
