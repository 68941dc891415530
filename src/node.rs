use std::fmt;


// Display node handed to the external diff/patch renderer. This is plain data:
// the renderer owns reconciliation, event wiring and the real UI tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn elem(tag: &str) -> Self {
        Node::Element(Element {
            tag: tag.to_owned(),
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl fmt::Display) -> Self { Node::Text(text.to_string()) }

    pub fn br() -> Self { Node::elem("br") }

    pub fn with_class(self, class: &str) -> Self {
        self.map_element(|el| el.classes.push(class.to_owned()))
    }

    pub fn with_classes(self, classes: impl IntoIterator<Item = &'static str>) -> Self {
        self.map_element(|el| el.classes.extend(classes.into_iter().map(str::to_owned)))
    }

    pub fn with_class_if(self, class: &str, condition: bool) -> Self {
        if condition { self.with_class(class) } else { self }
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.map_element(|el| el.attrs.push((name.to_owned(), value.to_owned())))
    }

    pub fn with_text(self, text: impl fmt::Display) -> Self {
        self.with_child(Node::text(text))
    }

    pub fn with_child(self, child: Node) -> Self {
        self.map_element(|el| el.children.push(child))
    }

    pub fn with_maybe_child(self, child: Option<Node>) -> Self {
        self.map_element(|el| el.children.extend(child))
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Node>) -> Self {
        self.map_element(|el| el.children.extend(children))
    }

    // Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut ret = String::new();
        self.collect_text(&mut ret);
        ret
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    fn map_element(mut self, f: impl FnOnce(&mut Element)) -> Self {
        if let Node::Element(ref mut el) = self {
            f(el);
        }
        self
    }
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool { self.classes.iter().any(|c| c == class) }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    // Depth-first search over element children.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(el) = child {
                if pred(el) {
                    return Some(el);
                }
                if let Some(found) = el.find(pred) {
                    return Some(found);
                }
            }
        }
        None
    }
}
