use super::ids::ModelId;

/// A named molecular entity loaded from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub unique_name: String,
    pub(crate) models: Vec<ModelId>,
    current_model: usize,
}

impl Structure {
    pub(crate) fn new(unique_name: &str) -> Self {
        Self {
            unique_name: unique_name.to_string(),
            models: Vec::new(),
            current_model: 0,
        }
    }

    pub fn models(&self) -> &[ModelId] {
        &self.models
    }

    /// The model currently shown for this structure, `None` if it has no models yet.
    pub fn current_model(&self) -> Option<ModelId> {
        self.models.get(self.current_model).copied()
    }

    pub fn current_model_index(&self) -> usize {
        self.current_model
    }

    /// Makes the model at `index` current.
    ///
    /// # Return
    ///
    /// Returns `false` and leaves the current model unchanged if `index` is out of range.
    pub fn set_current_model(&mut self, index: usize) -> bool {
        if index >= self.models.len() {
            return false;
        }
        self.current_model = index;
        true
    }
}
