// src/form.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// Current value of each field in a form, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    fields: Vec<(&'static str, String)>,
}

impl FormDraft {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            fields: names.iter().map(|n| (*n, String::new())).collect(),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| UnknownField(name.to_owned()))?;
        slot.1 = value.into();
        Ok(())
    }

    /// Value of `name`; empty for unknown fields.
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(n, v)| (*n, v.as_str()))
    }
}
