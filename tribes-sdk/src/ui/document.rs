//! A headless element tree.
//!
//! Only what the tribe controls touch is modelled: attributes, classes, the
//! inner markup of an element, and enough of the tree structure to look up
//! ancestors, descendants and siblings.
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A handle to an element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    html: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            html: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }
    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownNode(id))
    }
    fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|child| *child != id);
        }
        Ok(())
    }
    fn is_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> Result<bool> {
        loop {
            if id == ancestor {
                return Ok(true);
            }
            match self.node(id)?.parent {
                Some(parent) => id = parent,
                None => return Ok(false),
            }
        }
    }
    // Descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack = self.node(root)?.children.iter().rev().copied().collect::<Vec<_>>();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id)?.children.iter().rev().copied());
        }
        Ok(out)
    }
}

/// A shared, clonable handle to an element tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Arc<RwLock<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    const BODY: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self { tree: Arc::new(RwLock::new(Tree { nodes: vec![Node::new("body")] })) }
    }
    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        self.tree.read().expect("failed to read document")
    }
    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.tree.write().expect("failed to write document")
    }
    /// The root element.
    pub fn body(&self) -> NodeId {
        Self::BODY
    }
    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> Result<NodeId> {
        let mut tree = self.write();
        tree.nodes.push(Node::new(tag));
        Ok(NodeId(tree.nodes.len() - 1))
    }
    /// Move `child` to the end of the children of `parent`.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.write();
        tree.node(parent)?;
        if tree.is_ancestor(child, parent)? {
            return Err(Error::InvalidTree("an element cannot contain its own ancestor"));
        }
        tree.detach(child)?;
        tree.node_mut(child)?.parent = Some(parent);
        tree.node_mut(parent)?.children.push(child);
        Ok(())
    }
    /// Move `new` right after `reference`, as its next sibling.
    ///
    /// Does nothing when `reference` has no parent, like jQuery's `.after()`.
    pub fn insert_after(&self, reference: NodeId, new: NodeId) -> Result<()> {
        let mut tree = self.write();
        tree.node(new)?;
        let Some(parent) = tree.node(reference)?.parent else {
            return Ok(());
        };
        if tree.is_ancestor(new, parent)? {
            return Err(Error::InvalidTree("an element cannot contain its own ancestor"));
        }
        tree.detach(new)?;
        let siblings = &mut tree.node_mut(parent)?.children;
        let index = siblings.iter().position(|id| *id == reference).map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, new);
        tree.node_mut(new)?.parent = Some(parent);
        Ok(())
    }
    /// Detach `id` (and its subtree) from the document.
    pub fn remove(&self, id: NodeId) -> Result<()> {
        self.write().detach(id)
    }
    /// Whether `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> Result<bool> {
        self.read().is_ancestor(Self::BODY, id)
    }
    pub fn tag(&self, id: NodeId) -> Result<String> {
        Ok(self.read().node(id)?.tag.clone())
    }
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.read().node(id)?.parent)
    }
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.read().node(id)?.children.clone())
    }
    pub fn attr(&self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.read().node(id)?.attributes.get(name).cloned())
    }
    pub fn has_attr(&self, id: NodeId, name: &str) -> Result<bool> {
        Ok(self.read().node(id)?.attributes.contains_key(name))
    }
    pub fn set_attr(&self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        self.write().node_mut(id)?.attributes.insert(name.into(), value.into());
        Ok(())
    }
    pub fn remove_attr(&self, id: NodeId, name: &str) -> Result<()> {
        self.write().node_mut(id)?.attributes.remove(name);
        Ok(())
    }
    /// Set or remove a boolean attribute such as `disabled` or `hidden`.
    pub fn toggle_attr(&self, id: NodeId, name: &str, on: bool) -> Result<()> {
        if on {
            self.set_attr(id, name, name)
        } else {
            self.remove_attr(id, name)
        }
    }
    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.read().node(id)?.classes.iter().any(|c| c == class))
    }
    pub fn add_class(&self, id: NodeId, class: &str) -> Result<()> {
        let mut tree = self.write();
        let classes = &mut tree.node_mut(id)?.classes;
        for class in class.split_whitespace() {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.into());
            }
        }
        Ok(())
    }
    pub fn remove_class(&self, id: NodeId, class: &str) -> Result<()> {
        self.write().node_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }
    /// The inner markup of an element without children.
    pub fn html(&self, id: NodeId) -> Result<String> {
        Ok(self.read().node(id)?.html.clone())
    }
    pub fn set_html(&self, id: NodeId, html: impl Into<String>) -> Result<()> {
        self.write().node_mut(id)?.html = html.into();
        Ok(())
    }
    /// The inner markup with tags stripped and entities `&lt;`, `&gt;`, `&amp;` decoded.
    pub fn text(&self, id: NodeId) -> Result<String> {
        let html = self.html(id)?;
        let mut text = String::with_capacity(html.len());
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                c if !in_tag => text.push(c),
                _ => {}
            }
        }
        Ok(text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&"))
    }
    pub fn set_text(&self, id: NodeId, text: &str) -> Result<()> {
        self.set_html(id, text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;"))
    }
    /// The attached element whose `id` attribute is `value`.
    pub fn get_by_id(&self, value: &str) -> Option<NodeId> {
        let tree = self.read();
        tree.descendants(Self::BODY).ok()?.into_iter().find(|id| {
            tree.node(*id).is_ok_and(|node| node.attributes.get("id").is_some_and(|v| v == value))
        })
    }
    /// All attached elements carrying the attribute `name`, in document order.
    pub fn query_attr(&self, name: &str) -> Vec<NodeId> {
        let tree = self.read();
        tree.descendants(Self::BODY)
            .unwrap_or_default()
            .into_iter()
            .filter(|id| tree.node(*id).is_ok_and(|node| node.attributes.contains_key(name)))
            .collect()
    }
    /// Descendants of `root` with the tag `tag`, in document order.
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Result<Vec<NodeId>> {
        let tree = self.read();
        let mut out = Vec::new();
        for id in tree.descendants(root)? {
            if tree.node(id)?.tag.eq_ignore_ascii_case(tag) {
                out.push(id);
            }
        }
        Ok(out)
    }
    /// Descendants of `root` with the class `class`, in document order.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Result<Vec<NodeId>> {
        let tree = self.read();
        let mut out = Vec::new();
        for id in tree.descendants(root)? {
            if tree.node(id)?.classes.iter().any(|c| c == class) {
                out.push(id);
            }
        }
        Ok(out)
    }
    /// The nearest element with the class `class`, starting at `id` itself.
    pub fn closest_by_class(&self, id: NodeId, class: &str) -> Result<Option<NodeId>> {
        let tree = self.read();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = tree.node(id)?;
            if node.classes.iter().any(|c| c == class) {
                return Ok(Some(id));
            }
            current = node.parent;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // <div class="card" id="card">
    //   <span class="badge-tribe_leader d-none"></span>
    //   <button data-tribeleader="7"></button>
    // </div>
    fn card(document: &Document) -> (NodeId, NodeId, NodeId) {
        let card = document.create_element("div").expect("create");
        document.add_class(card, "card").expect("class");
        document.set_attr(card, "id", "card").expect("attr");
        let badge = document.create_element("span").expect("create");
        document.add_class(badge, "badge-tribe_leader d-none").expect("class");
        let button = document.create_element("button").expect("create");
        document.set_attr(button, "data-tribeleader", "7").expect("attr");
        document.append_child(document.body(), card).expect("append");
        document.append_child(card, badge).expect("append");
        document.append_child(card, button).expect("append");
        (card, badge, button)
    }

    #[test]
    fn tree_queries() {
        let document = Document::new();
        let (card, badge, button) = card(&document);

        assert_eq!(document.get_by_id("card"), Some(card));
        assert_eq!(document.get_by_id("missing"), None);
        assert_eq!(document.query_attr("data-tribeleader"), vec![button]);
        assert_eq!(document.find_by_tag(card, "SPAN").expect("find"), vec![badge]);
        assert_eq!(document.find_by_class(document.body(), "badge-tribe_leader").expect("find"), vec![badge]);
        assert_eq!(document.closest_by_class(button, "card").expect("closest"), Some(card));
        assert_eq!(document.closest_by_class(card, "card").expect("closest"), Some(card));
        assert_eq!(document.closest_by_class(button, "row").expect("closest"), None);
        assert!(document.has_class(badge, "d-none").expect("class"));
        assert_eq!(document.tag(button).expect("tag"), "button");
    }

    #[test]
    fn insert_after_and_remove() {
        let document = Document::new();
        let (card, badge, button) = card(&document);
        let label = document.create_element("span").expect("create");
        assert!(!document.is_attached(label).expect("attached"));

        document.insert_after(badge, label).expect("insert");
        assert_eq!(document.children(card).expect("children"), vec![badge, label, button]);
        assert_eq!(document.parent(label).expect("parent"), Some(card));

        document.remove(button).expect("remove");
        assert_eq!(document.children(card).expect("children"), vec![badge, label]);
        assert!(!document.is_attached(button).expect("attached"));
        assert!(document.query_attr("data-tribeleader").is_empty());

        // detached reference: no-op
        let orphan = document.create_element("i").expect("create");
        document.insert_after(button, orphan).expect("insert");
        assert_eq!(document.parent(orphan).expect("parent"), None);
    }

    #[test]
    fn cycles_are_rejected() {
        let document = Document::new();
        let (card, badge, _) = card(&document);
        assert!(document.append_child(badge, card).is_err());
        assert!(document.append_child(card, card).is_err());
    }

    #[test]
    fn attributes_and_content() {
        let document = Document::new();
        let button = document.create_element("button").expect("create");
        document.toggle_attr(button, "disabled", true).expect("toggle");
        assert!(document.has_attr(button, "disabled").expect("attr"));
        document.toggle_attr(button, "disabled", false).expect("toggle");
        assert_eq!(document.attr(button, "disabled").expect("attr"), None);

        document.set_html(button, r#"Follow <i class="fas fa-plus"></i>"#).expect("html");
        assert_eq!(document.text(button).expect("text"), "Follow ");
        document.set_text(button, "1 < 2").expect("text");
        assert_eq!(document.html(button).expect("html"), "1 &lt; 2");
        assert_eq!(document.text(button).expect("text"), "1 < 2");
    }

    #[test]
    fn unknown_node() {
        let document = Document::new();
        let other = Document::new();
        let foreign = other.create_element("p").expect("create");
        assert!(matches!(document.attr(foreign, "id"), Err(Error::UnknownNode(id)) if id == foreign));
    }
}
