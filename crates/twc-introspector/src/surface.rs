//! Client surface object graph and method discovery.
//!
//! The SDK client is modelled as a graph of [`SurfaceNode`]s. Nodes are
//! reference counted: when the declarations give two properties the same
//! named type, both properties point at the same node, exactly as two
//! properties of a live object can reference one shared object.
//! [`discover_methods`] relies on that identity to visit shared nodes once.

use std::collections::HashSet;
use std::rc::Rc;
use twc_core::MethodPath;

/// One object in the client graph; members keep declaration order.
#[derive(Debug, Default)]
pub struct SurfaceNode {
    members: Vec<(String, SurfaceValue)>,
}

impl SurfaceNode {
    /// Creates a node from its members.
    #[must_use]
    pub const fn new(members: Vec<(String, SurfaceValue)>) -> Self {
        Self { members }
    }

    /// Own members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[(String, SurfaceValue)] {
        &self.members
    }

    pub(crate) fn into_members(self) -> Vec<(String, SurfaceValue)> {
        self.members
    }

    /// Member called `name`.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&SurfaceValue> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }
}

/// Value of a member of a [`SurfaceNode`].
#[derive(Debug, Clone)]
pub enum SurfaceValue {
    /// Nested object, possibly shared with other members
    Object(Rc<SurfaceNode>),
    /// Callable member with its declared type text
    Method {
        /// Declared type, e.g. `Method<AuthTestArguments>`
        signature: String,
    },
    /// Any non-callable, non-object value
    Value {
        /// Declared type
        ty: String,
    },
}

impl SurfaceValue {
    /// Creates a method value.
    #[must_use]
    pub fn method(signature: impl Into<String>) -> Self {
        Self::Method {
            signature: signature.into(),
        }
    }

    /// Creates a plain value.
    #[must_use]
    pub fn value(ty: impl Into<String>) -> Self {
        Self::Value { ty: ty.into() }
    }

    /// Returns `true` for callable members.
    #[must_use]
    pub const fn is_method(&self) -> bool {
        matches!(self, Self::Method { .. })
    }
}

/// Root of the client graph.
#[derive(Debug, Clone)]
pub struct ClientSurface {
    root: Rc<SurfaceNode>,
}

impl ClientSurface {
    /// Wraps a root node.
    #[must_use]
    pub const fn new(root: Rc<SurfaceNode>) -> Self {
        Self { root }
    }

    /// The client object itself.
    #[must_use]
    pub const fn root(&self) -> &Rc<SurfaceNode> {
        &self.root
    }

    /// Dotted paths of every callable member.
    #[must_use]
    pub fn methods(&self) -> Vec<MethodPath> {
        discover_methods(&self.root, SurfaceValue::is_method)
    }
}

/// Enumerates every reachable non-object member accepted by `predicate`.
///
/// Traversal uses an explicit stack, so the order is last-in first-out.
/// Object members are descended into at most once, keyed on node identity
/// (never on structural equality), so a shared node is walked once.
/// An empty object contributes nothing.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use twc_introspector::{SurfaceNode, SurfaceValue, discover_methods};
///
/// let auth = Rc::new(SurfaceNode::new(vec![
///     ("test".into(), SurfaceValue::method("Method<AuthTestArguments>")),
/// ]));
/// let root = Rc::new(SurfaceNode::new(vec![
///     ("token".into(), SurfaceValue::value("string")),
///     ("auth".into(), SurfaceValue::Object(auth)),
/// ]));
///
/// let paths = discover_methods(&root, SurfaceValue::is_method);
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].to_string(), "auth.test");
///
/// // Accept everything that is not an object.
/// assert_eq!(discover_methods(&root, |_| true).len(), 2);
/// ```
pub fn discover_methods<P>(root: &Rc<SurfaceNode>, predicate: P) -> Vec<MethodPath>
where
    P: Fn(&SurfaceValue) -> bool,
{
    let mut visited: HashSet<*const SurfaceNode> = HashSet::new();
    visited.insert(Rc::as_ptr(root));

    let mut stack = vec![(Rc::clone(root), MethodPath::root())];
    let mut found = Vec::new();

    while let Some((node, path)) = stack.pop() {
        for (name, value) in node.members() {
            match value {
                SurfaceValue::Object(child) => {
                    if visited.insert(Rc::as_ptr(child)) {
                        stack.push((Rc::clone(child), path.child(name)));
                    }
                }
                other => {
                    if predicate(other) {
                        found.push(path.child(name));
                    }
                }
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methods(names: &[&str]) -> Rc<SurfaceNode> {
        Rc::new(SurfaceNode::new(
            names
                .iter()
                .map(|name| ((*name).to_string(), SurfaceValue::method("Method<X>")))
                .collect(),
        ))
    }

    #[test]
    fn test_nested_paths() {
        let users = methods(&["list"]);
        let usergroups = Rc::new(SurfaceNode::new(vec![
            ("create".into(), SurfaceValue::method("Method<X>")),
            ("users".into(), SurfaceValue::Object(users)),
        ]));
        let root = Rc::new(SurfaceNode::new(vec![(
            "usergroups".into(),
            SurfaceValue::Object(usergroups),
        )]));

        let mut paths: Vec<String> = discover_methods(&root, SurfaceValue::is_method)
            .iter()
            .map(ToString::to_string)
            .collect();
        paths.sort();
        assert_eq!(paths, ["usergroups.create", "usergroups.users.list"]);
    }

    #[test]
    fn test_aliased_object_visited_once() {
        let shared = methods(&["list"]);
        let root = Rc::new(SurfaceNode::new(vec![
            ("conversations".into(), SurfaceValue::Object(Rc::clone(&shared))),
            ("channels".into(), SurfaceValue::Object(Rc::clone(&shared))),
        ]));

        let paths = discover_methods(&root, SurfaceValue::is_method);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0], MethodPath::parse("conversations.list"));
    }

    #[test]
    fn test_structurally_equal_objects_both_visited() {
        let root = Rc::new(SurfaceNode::new(vec![
            ("a".into(), SurfaceValue::Object(methods(&["list"]))),
            ("b".into(), SurfaceValue::Object(methods(&["list"]))),
        ]));
        assert_eq!(discover_methods(&root, SurfaceValue::is_method).len(), 2);
    }

    #[test]
    fn test_lifo_order() {
        let root = Rc::new(SurfaceNode::new(vec![
            ("first".into(), SurfaceValue::Object(methods(&["a"]))),
            ("second".into(), SurfaceValue::Object(methods(&["b"]))),
            ("top".into(), SurfaceValue::method("Method<X>")),
        ]));
        let paths: Vec<String> = discover_methods(&root, SurfaceValue::is_method)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, ["top", "second.b", "first.a"]);
    }

    #[test]
    fn test_empty_object_contributes_nothing() {
        let root = Rc::new(SurfaceNode::new(vec![(
            "empty".into(),
            SurfaceValue::Object(Rc::new(SurfaceNode::default())),
        )]));
        assert!(discover_methods(&root, |_| true).is_empty());
    }

    #[test]
    fn test_predicate_filters_values() {
        let root = Rc::new(SurfaceNode::new(vec![
            ("token".into(), SurfaceValue::value("string")),
            ("call".into(), SurfaceValue::method("() => void")),
        ]));
        assert_eq!(discover_methods(&root, |_| true).len(), 2);
        assert_eq!(discover_methods(&root, |_| false).len(), 0);
        assert_eq!(discover_methods(&root, SurfaceValue::is_method).len(), 1);
    }

    #[test]
    fn test_surface_methods() {
        let surface = ClientSurface::new(methods(&["a", "b"]));
        assert_eq!(surface.methods().len(), 2);
        assert!(surface.root().member("a").is_some_and(SurfaceValue::is_method));
    }
}
