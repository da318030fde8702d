use crate::item::Item;
use std::collections::HashMap;

/// Per-run summary of a container's contents: kind -> total count.
///
/// Built fresh at the start of every stash pass and thrown away afterwards. Placements made
/// during the pass are not reflected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    counts: HashMap<String, u32>,
}

impl ContentIndex {
    pub fn build(contents: &[Item]) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for item in contents {
            counts
                .entry(item.kind.clone())
                .and_modify(|c| *c = c.saturating_add(item.count))
                .or_insert(item.count);
        }
        Self { counts }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.counts.contains_key(kind)
    }

    /// Total count of `kind`, 0 when absent
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_stacks_of_same_kind() {
        let idx = ContentIndex::build(&[
            Item::new("wood", 50),
            Item::new("stone", 3),
            Item::new("wood", 7),
        ]);

        assert_eq!(idx.count("wood"), 57);
        assert_eq!(idx.count("stone"), 3);
        assert_eq!(idx.count("ruby"), 0);
        assert!(!idx.contains("ruby"));
        assert!(idx.contains("stone"));
    }

    #[test]
    fn identical_contents_give_equal_indexes() {
        let contents = vec![Item::new("resin", 4), Item::new("flint", 2)];
        let mut reversed = contents.clone();
        reversed.reverse();
        assert_eq!(ContentIndex::build(&contents), ContentIndex::build(&reversed));
    }
}
