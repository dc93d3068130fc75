// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build configuration: split policy and leaf size.

use core::fmt;
use core::str::FromStr;

use crate::error::UnknownSplitMethod;

/// Policy used to divide primitives between the two children of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SplitMethod {
    /// Surface area heuristic over 12 centroid buckets.
    #[default]
    Sah,
    /// Morton-ordered treelets merged with the surface area heuristic.
    Hlbvh,
    /// Split at the midpoint of the centroid bounds.
    Middle,
    /// Split into two halves of equal primitive count.
    EqualCounts,
}

impl SplitMethod {
    /// Scene-parameter name of the method.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sah => "sah",
            Self::Hlbvh => "hlbvh",
            Self::Middle => "middle",
            Self::EqualCounts => "equal",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SplitMethod {
    type Err = UnknownSplitMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sah" => Ok(Self::Sah),
            "hlbvh" => Ok(Self::Hlbvh),
            "middle" => Ok(Self::Middle),
            "equal" => Ok(Self::EqualCounts),
            _ => Err(UnknownSplitMethod { name: s.to_owned() }),
        }
    }
}

/// Parameters for [`Bvh::new`](crate::Bvh::new).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BvhConfig {
    split_method: SplitMethod,
    max_prims_in_node: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            split_method: SplitMethod::Sah,
            max_prims_in_node: Self::DEFAULT_MAX_PRIMS_IN_NODE,
        }
    }
}

impl BvhConfig {
    /// Leaf size used when none is given.
    pub const DEFAULT_MAX_PRIMS_IN_NODE: usize = 4;

    /// Largest accepted leaf size.
    pub const MAX_PRIMS_IN_NODE_LIMIT: usize = 255;

    /// Create a configuration. `max_prims_in_node` is clamped into `1..=255`.
    pub fn new(split_method: SplitMethod, max_prims_in_node: usize) -> Self {
        Self {
            split_method,
            max_prims_in_node: max_prims_in_node.clamp(1, Self::MAX_PRIMS_IN_NODE_LIMIT),
        }
    }

    /// Build a configuration from scene-description parameters.
    ///
    /// Missing values take their defaults. An unrecognized split method is
    /// reported with a warning and replaced by [`SplitMethod::Sah`]; an
    /// out-of-range leaf size is reported and clamped.
    pub fn from_params(split_method: Option<&str>, max_prims_in_node: Option<i64>) -> Self {
        let method = match split_method.map(str::parse::<SplitMethod>) {
            None => SplitMethod::default(),
            Some(Ok(method)) => method,
            Some(Err(err)) => {
                tracing::warn!("{err}; using \"{}\"", SplitMethod::Sah);
                SplitMethod::Sah
            }
        };

        let max_prims = match max_prims_in_node {
            None => Self::DEFAULT_MAX_PRIMS_IN_NODE,
            Some(n) => {
                let limit = Self::MAX_PRIMS_IN_NODE_LIMIT;
                let clamped = usize::try_from(n.max(1)).map_or(limit, |n| n.min(limit));
                if i64::try_from(clamped).ok() != Some(n) {
                    tracing::warn!(
                        requested = n,
                        used = clamped,
                        "maxnodeprims out of range; clamping"
                    );
                }
                clamped
            }
        };

        Self::new(method, max_prims)
    }

    /// Replace the split method.
    #[must_use]
    pub const fn with_split_method(mut self, split_method: SplitMethod) -> Self {
        self.split_method = split_method;
        self
    }

    /// Replace the leaf size, clamped into `1..=255`.
    #[must_use]
    pub fn with_max_prims_in_node(self, max_prims_in_node: usize) -> Self {
        Self::new(self.split_method, max_prims_in_node)
    }

    /// The split policy.
    pub const fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Target number of primitives per leaf.
    pub const fn max_prims_in_node(&self) -> usize {
        self.max_prims_in_node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("sah".parse(), Ok(SplitMethod::Sah));
        assert_eq!("hlbvh".parse(), Ok(SplitMethod::Hlbvh));
        assert_eq!("middle".parse(), Ok(SplitMethod::Middle));
        assert_eq!("equal".parse(), Ok(SplitMethod::EqualCounts));
        for m in [
            SplitMethod::Sah,
            SplitMethod::Hlbvh,
            SplitMethod::Middle,
            SplitMethod::EqualCounts,
        ] {
            assert_eq!(m.to_string().parse(), Ok(m));
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "octree".parse::<SplitMethod>().unwrap_err();
        assert_eq!(err.name, "octree");
        assert_eq!(err.to_string(), "unknown BVH split method \"octree\"");
    }

    #[test]
    fn from_params_falls_back_to_sah() {
        let cfg = BvhConfig::from_params(Some("kd"), None);
        assert_eq!(cfg.split_method(), SplitMethod::Sah);
        assert_eq!(cfg.max_prims_in_node(), 4);

        let cfg = BvhConfig::from_params(Some("middle"), Some(8));
        assert_eq!(cfg.split_method(), SplitMethod::Middle);
        assert_eq!(cfg.max_prims_in_node(), 8);
    }

    #[test]
    fn leaf_size_is_clamped() {
        assert_eq!(BvhConfig::from_params(None, Some(1000)).max_prims_in_node(), 255);
        assert_eq!(BvhConfig::from_params(None, Some(-3)).max_prims_in_node(), 1);
        assert_eq!(BvhConfig::from_params(None, Some(0)).max_prims_in_node(), 1);
        assert_eq!(
            BvhConfig::default().with_max_prims_in_node(300).max_prims_in_node(),
            255
        );
    }
}
