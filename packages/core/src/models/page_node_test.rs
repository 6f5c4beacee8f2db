//! Tests for PageNode construction, lookup and normalization

#[cfg(test)]
mod tests {
    use crate::models::{PageNode, TreeSnapshot};
    use serde_json::json;

    fn sample_tree() -> PageNode {
        PageNode::new("root", "Root", "DOC")
            .with_child(PageNode::new("a", "A", "DOC"))
            .with_child(PageNode::new("b", "B", "DOC").with_child(PageNode::new("c", "C", "DOC")))
    }

    #[test]
    fn test_with_child_sets_cached_fields() {
        let tree = sample_tree();
        let b = tree.find("b").unwrap();
        assert_eq!(b.parent_id.as_deref(), Some("root"));
        assert_eq!(b.position, 1);
        assert_eq!(b.child_ids(), vec!["c"]);
    }

    #[test]
    fn test_find_and_contains() {
        let tree = sample_tree();
        assert!(tree.contains("c"));
        assert!(!tree.contains("zzz"));
        assert!(tree.find("b").unwrap().contains("c"));
        assert!(!tree.find("a").unwrap().contains("c"));
    }

    #[test]
    fn test_node_count() {
        assert_eq!(sample_tree().node_count(), 4);
        assert_eq!(PageNode::new("x", "X", "DOC").node_count(), 1);
    }

    #[test]
    fn test_normalize_repairs_stale_fields() {
        let mut tree = sample_tree();
        tree.children.swap(0, 1);
        tree.children[0].children[0].parent_id = Some("stale".to_string());

        tree.normalize();

        assert_eq!(tree.children[0].id, "b");
        assert_eq!(tree.children[0].position, 0);
        assert_eq!(tree.children[1].position, 1);
        assert_eq!(tree.children[0].children[0].parent_id.as_deref(), Some("b"));
        assert_eq!(tree.parent_id, None);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sample_tree();
        let mut copy = original.clone();
        copy.children[1].children.clear();

        assert_eq!(original.find("b").unwrap().children.len(), 1);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let tree = sample_tree();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["spaceKey"], "DOC");
        assert_eq!(value["children"][1]["parentId"], "root");
        assert_eq!(value["children"][1]["position"], 1);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let tree: PageNode = serde_json::from_value(json!({
            "id": "root",
            "title": "Root",
            "parentId": null,
            "spaceKey": "DOC"
        }))
        .unwrap();
        assert!(tree.children.is_empty());
        assert_eq!(tree.position, 0);
    }

    #[test]
    fn test_snapshot_from_tree() {
        let snapshot = TreeSnapshot::from_tree(sample_tree());
        assert_eq!(snapshot.root_page_id, "root");
        assert_eq!(snapshot.space_key, "DOC");
    }
}
