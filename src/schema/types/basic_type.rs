use crate::parquet_bridge::Repetition;

/// Name, repetition and field id shared by every schema node, leaf or group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicTypeInfo {
    name: String,
    /// `None` only for the root of the schema tree (the "message" type), which has no
    /// repetition of its own.
    repetition: Option<Repetition>,
    id: Option<i32>,
}

impl BasicTypeInfo {
    pub fn new(name: String, repetition: Option<Repetition>, id: Option<i32>) -> Self {
        Self {
            name,
            repetition,
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` at the schema root; every other node always has a repetition.
    pub fn repetition(&self) -> Option<Repetition> {
        self.repetition
    }

    pub fn is_root(&self) -> bool {
        self.repetition.is_none()
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }
}
