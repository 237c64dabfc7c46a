/// A dotted path identifying a leaf column inside a nested schema, e.g. `a.b.c`.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct ColumnPath {
    parts: Vec<String>,
}

impl ColumnPath {
    pub fn new(parts: Vec<String>) -> Self {
        ColumnPath { parts }
    }

    pub fn string(&self) -> String {
        self.parts.join(".")
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl std::fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.string())
    }
}

impl From<Vec<String>> for ColumnPath {
    fn from(parts: Vec<String>) -> Self {
        ColumnPath { parts }
    }
}

impl From<&[String]> for ColumnPath {
    fn from(parts: &[String]) -> Self {
        ColumnPath {
            parts: parts.to_vec(),
        }
    }
}

impl AsRef<[String]> for ColumnPath {
    fn as_ref(&self) -> &[String] {
        &self.parts
    }
}
