use bytes::Bytes;

use crate::command::{require_keys, require_non_empty, required_key, Command};
use crate::error::Result;

/// `PFADD key value [value ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfAddCommand {
    pub key: Option<Bytes>,
    pub values: Vec<Bytes>,
}

impl PfAddCommand {
    /// Creates a command adding a single value.
    pub fn value(value: impl Into<Bytes>) -> Self {
        Self::values([value.into()])
    }

    /// Creates a command adding all the given values.
    pub fn values(values: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            key: None,
            values: values.into_iter().collect(),
        }
    }

    /// Sets the HyperLogLog key the values are added to.
    pub fn to(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for PfAddCommand {
    fn name(&self) -> &'static str {
        "PFADD"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "values", &self.values)
    }
}

/// `PFCOUNT key [key ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfCountCommand {
    pub keys: Vec<Bytes>,
}

impl PfCountCommand {
    /// Counts the cardinality of a single key.
    pub fn value_in(key: impl Into<Bytes>) -> Self {
        Self::values_in([key.into()])
    }

    /// Counts the cardinality of the union of the given keys.
    pub fn values_in(keys: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl Command for PfCountCommand {
    fn name(&self) -> &'static str {
        "PFCOUNT"
    }

    fn validate(&self) -> Result<()> {
        require_keys(self.name(), "keys", &self.keys)
    }
}

/// `PFMERGE destkey sourcekey [sourcekey ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfMergeCommand {
    pub key: Option<Bytes>,
    pub source_keys: Vec<Bytes>,
}

impl PfMergeCommand {
    /// Creates a merge of the given source keys.
    pub fn values_in(source_keys: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            key: None,
            source_keys: source_keys.into_iter().collect(),
        }
    }

    /// Sets the destination key.
    pub fn into_key(mut self, destination: impl Into<Bytes>) -> Self {
        self.key = Some(destination.into());
        self
    }
}

impl Command for PfMergeCommand {
    fn name(&self) -> &'static str {
        "PFMERGE"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_keys(self.name(), "source keys", &self.source_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;

    #[test]
    fn test_pf_add_builder() {
        let command = PfAddCommand::values([Bytes::from("a"), Bytes::from("b")]).to("hll");
        assert_eq!(command.key, Some(Bytes::from("hll")));
        assert_eq!(command.values.len(), 2);
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_pf_add_without_key_is_invalid() {
        let command = PfAddCommand::value("a");
        assert_eq!(
            command.validate(),
            Err(CommandError::InvalidCommand(
                "PFADD: key must not be null".to_string()
            ))
        );
    }

    #[test]
    fn test_pf_add_without_values_is_invalid() {
        let command = PfAddCommand::values(Vec::new()).to("hll");
        assert_eq!(
            command.validate(),
            Err(CommandError::InvalidCommand(
                "PFADD: values must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn test_pf_count_requires_keys() {
        assert!(PfCountCommand::values_in(Vec::new()).validate().is_err());
        assert!(PfCountCommand::value_in("hll").validate().is_ok());
    }

    #[test]
    fn test_pf_count_rejects_empty_key() {
        let command = PfCountCommand::values_in([Bytes::from("hll"), Bytes::new()]);
        assert!(command.validate().unwrap_err().is_precondition());
    }

    #[test]
    fn test_pf_merge_requires_destination_and_sources() {
        let sources = [Bytes::from("a"), Bytes::from("b")];
        assert!(PfMergeCommand::values_in(sources.clone()).validate().is_err());
        assert!(PfMergeCommand::values_in(Vec::new())
            .into_key("dest")
            .validate()
            .is_err());
        assert!(PfMergeCommand::values_in(sources)
            .into_key("dest")
            .validate()
            .is_ok());
    }
}
