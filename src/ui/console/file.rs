use crate::muted_error;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const TAB_WIDTH: usize = 4;

/// Lines of source files. Every readable file is read once and kept for the session.
#[derive(Default)]
pub struct SourceCache {
    cached_lines: RefCell<HashMap<PathBuf, Rc<[String]>>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return file lines with tabs expanded. Unreadable file gives no lines and is not cached.
    pub fn lines(&self, file_path: &Path) -> Rc<[String]> {
        let mut cache = self.cached_lines.borrow_mut();
        if let Some(lines) = cache.get(file_path) {
            return Rc::clone(lines);
        }

        let Some(source) = muted_error!(fs::read_to_string(file_path), "read source file:") else {
            return Rc::from(Vec::new());
        };
        let tab = " ".repeat(TAB_WIDTH);
        let lines: Rc<[String]> = source.lines().map(|l| l.replace('\t', &tab)).collect();
        cache.insert(file_path.to_path_buf(), Rc::clone(&lines));
        lines
    }
}
