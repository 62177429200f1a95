mod content;
mod node;
mod role;

pub use content::Content;
pub use node::Element;
pub use role::Role;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// IDs from `root` down to the element with `id`, both inclusive.
pub fn find_path(root: &Element, id: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    if find_path_recursive(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn find_path_recursive(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id {
        return true;
    }
    for child in element.child_elements() {
        if find_path_recursive(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Whether `id` is `node` itself or one of its descendants.
///
/// `node` may be a detached subtree (e.g. a node taken out of a mutation record).
pub fn contains_or_equal(node: &Element, id: &str) -> bool {
    find_element(node, id).is_some()
}

/// Collect all IDs in a subtree, in tree order.
pub fn collect_ids(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_ids_recursive(element, &mut result);
    result
}

fn collect_ids_recursive(element: &Element, result: &mut Vec<String>) {
    result.push(element.id.clone());
    for child in element.child_elements() {
        collect_ids_recursive(child, result);
    }
}
