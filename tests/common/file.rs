use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}

/// Write `count` files with random names and contents directly under `dir`
pub fn write_generated_files(dir: &Path, count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut specs = Vec::<FileSpec>::new();
    while specs.len() < count {
        let file_name = format!("{}.txt", Word().fake::<String>());
        if specs.iter().any(|spec| spec.path.ends_with(&file_name)) {
            continue;
        }

        let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
        let spec = FileSpec::new(dir.join(file_name), file_content);
        write_file(spec.clone());
        specs.push(spec);
    }

    specs
}
