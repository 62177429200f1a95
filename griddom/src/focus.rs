use crate::element::Element;

/// Collect all focusable element IDs in tree order.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.can_focus() {
        result.push(element.id.clone());
    }
    for child in element.child_elements() {
        collect_focusable_recursive(child, result);
    }
}

/// First focusable element strictly below `element`, in tree order.
pub fn first_focusable_descendant(element: &Element) -> Option<&Element> {
    for child in element.child_elements() {
        if child.can_focus() {
            return Some(child);
        }
        if let Some(found) = first_focusable_descendant(child) {
            return Some(found);
        }
    }
    None
}

/// Next element in Tab order after `current`, wrapping around.
pub(crate) fn next_in_order(focusable: &[String], current: Option<&str>) -> Option<String> {
    if focusable.is_empty() {
        return None;
    }

    let next = match current.and_then(|c| focusable.iter().position(|id| id == c)) {
        Some(i) => &focusable[(i + 1) % focusable.len()],
        None => &focusable[0],
    };
    Some(next.clone())
}

/// Previous element in Tab order before `current`, wrapping around.
pub(crate) fn prev_in_order(focusable: &[String], current: Option<&str>) -> Option<String> {
    if focusable.is_empty() {
        return None;
    }

    let last = focusable.len() - 1;
    let prev = match current.and_then(|c| focusable.iter().position(|id| id == c)) {
        Some(0) | None => &focusable[last],
        Some(i) => &focusable[i - 1],
    };
    Some(prev.clone())
}
