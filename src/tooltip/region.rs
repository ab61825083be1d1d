/// Anything the pointer can hover that has an identifier and a display value
pub trait Region {
    fn id(&self) -> String;

    /// Raw value to display, `None` when the region carries no value
    fn value(&self) -> Option<String>;
}

/// A region with fixed contents, used where no DOM element backs the region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRegion {
    pub id: String,
    pub value: Option<String>,
}

impl StaticRegion {
    #[must_use]
    pub fn new(id: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            id: id.into(),
            value: value.map(str::to_string),
        }
    }
}

impl Region for StaticRegion {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn value(&self) -> Option<String> {
        self.value.clone()
    }
}
