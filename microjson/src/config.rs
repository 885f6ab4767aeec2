// SPDX-License-Identifier: Apache-2.0

/// What to do with a schema byte that is not a known tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Fail with `ExtractError::UnknownTag`.
    #[default]
    Error,
    /// Consume the schema byte, consume no data, and leave the value `Null`.
    ///
    /// Inside an array or object this cannot make progress through the byte
    /// budget, so the enclosing composite fails with `MalformedLength`.
    Ignore,
}

/// Runtime limits and policies for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Maximum number of arrays and objects open at once; 0 allows scalars only.
    pub max_depth: usize,
    pub unknown_tags: UnknownTagPolicy,
}

impl ExtractConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            unknown_tags: UnknownTagPolicy::Error,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new()
    }
}
