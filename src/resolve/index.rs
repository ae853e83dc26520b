use std::collections::HashMap;

use crate::model::item::TestItem;

/// Index from declared base name to the concrete collected items that name
/// expanded into (one entry per parameterized variant).
///
/// Built once from the collection list, consulted read-only during the
/// static pass. Values are indices into the item list the index was built
/// from, in collection order.
#[derive(Debug, Default)]
pub struct CollectIndex {
    by_base: HashMap<String, Vec<usize>>,
}

impl CollectIndex {
    pub fn from_items(items: &[TestItem]) -> Self {
        let mut by_base: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            by_base.entry(item.id.base().to_owned()).or_default().push(i);
        }
        Self { by_base }
    }

    /// Indices of the items collected under `base`, empty when the name was
    /// never collected.
    pub fn candidates(&self, base: &str) -> &[usize] {
        self.by_base.get(base).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ident::TestId;

    fn item(node_id: &str) -> TestItem {
        TestItem::new(TestId::parse(node_id).expect("valid node id"))
    }

    #[test]
    fn groups_variants_under_base_name() {
        let items = vec![
            item("a.py::test_foo[1]"),
            item("a.py::test_foo[2]"),
            item("a.py::test_bar"),
        ];
        let index = CollectIndex::from_items(&items);
        assert_eq!(index.candidates("test_foo"), &[0, 1]);
        assert_eq!(index.candidates("test_bar"), &[2]);
    }

    #[test]
    fn unknown_base_has_no_candidates() {
        let index = CollectIndex::from_items(&[item("a.py::test_foo")]);
        assert!(index.candidates("test_missing").is_empty());
    }

    #[test]
    fn concrete_variant_name_is_not_a_base() {
        // Lookups happen by the name as declared; a fully suffixed name is
        // not a collection key.
        let index = CollectIndex::from_items(&[item("a.py::test_foo[1]")]);
        assert!(index.candidates("test_foo[1]").is_empty());
        assert_eq!(index.candidates("test_foo"), &[0]);
    }

    #[test]
    fn preserves_collection_order() {
        let items = vec![
            item("a.py::test_foo[b]"),
            item("a.py::test_other"),
            item("a.py::test_foo[a]"),
        ];
        let index = CollectIndex::from_items(&items);
        assert_eq!(index.candidates("test_foo"), &[0, 2]);
    }
}
