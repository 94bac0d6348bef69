//! Classification of how a sequence's elements physically exist.

/// Where a sequence's elements live.
///
/// Variants are ordered by decreasing addressability guarantees, so a
/// composite's classification is the maximum of its components'.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageType {
    /// Fully materialized in memory.
    MemArray,
    /// A composite whose components are stored differently.
    MemSparse,
    /// Values computed on demand and not necessarily materialized.
    MemVirtual,
}

impl StorageType {
    /// Classification of a composite built from `self` and `other`.
    ///
    /// Equal inputs keep their classification. Differing inputs resolve to
    /// the least capable one: `MemVirtual` wins over `MemSparse`, which wins
    /// over `MemArray`.
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_identity_on_equal_inputs() {
        for t in [
            StorageType::MemArray,
            StorageType::MemSparse,
            StorageType::MemVirtual,
        ] {
            assert_eq!(t.combine(t), t);
        }
    }

    #[test]
    fn combine_prefers_virtual_then_sparse() {
        use StorageType::*;
        assert_eq!(MemArray.combine(MemVirtual), MemVirtual);
        assert_eq!(MemSparse.combine(MemVirtual), MemVirtual);
        assert_eq!(MemArray.combine(MemSparse), MemSparse);
        assert_eq!(MemSparse.combine(MemArray), MemSparse);
    }
}
