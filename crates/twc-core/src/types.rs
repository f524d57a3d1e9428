//! Strong domain types.
//!
//! The three name spaces the generator reconciles (specification-derived
//! response types, the SDK's callable surface and the SDK's argument
//! declarations) meet at [`OperationName`]. Keeping each in its own newtype
//! stops a method path from being compared with an argument name by accident.
//!
//! # Examples
//!
//! ```
//! use twc_core::{MethodPath, OperationName};
//!
//! let path = MethodPath::new(["chat", "postMessage"]);
//! assert_eq!(path.to_string(), "chat.postMessage");
//! assert_eq!(OperationName::from_path(&path).as_str(), "ChatPostMessage");
//! ```

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered property-name segments identifying a callable on the SDK client.
///
/// Displayed dotted (`chat.postMessage`). Empty segments are dropped on
/// construction so `".chat.postMessage"` style inputs normalise to the same
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodPath(Vec<String>);

impl MethodPath {
    /// Creates a path from its segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            segments
                .into_iter()
                .map(Into::into)
                .filter(|segment| !segment.is_empty())
                .collect(),
        )
    }

    /// The empty path naming the client object itself.
    #[inline]
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Parses a dotted path such as `usergroups.users.list`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::MethodPath;
    ///
    /// let path = MethodPath::parse("usergroups.users.list");
    /// assert_eq!(path.segments().len(), 3);
    /// assert_eq!(MethodPath::parse(".auth.test"), MethodPath::parse("auth.test"));
    /// ```
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self::new(dotted.split('.'))
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
        Self(segments)
    }

    /// Returns the path segments.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` for the root (empty) path.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MethodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Canonical PascalCase operation identifier, e.g. `ChatPostMessage`.
///
/// This is the join key between response namespaces, discovered methods and
/// argument declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationName(String);

impl OperationName {
    /// Wraps an already canonical name (for example a `Paths` namespace name).
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives the operation name for a method path.
    #[must_use]
    pub fn from_path(path: &MethodPath) -> Self {
        Self(naming::to_operation_name(path.segments()))
    }

    /// Name of the argument interface the SDK is expected to declare.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::OperationName;
    ///
    /// let op = OperationName::new("AuthTest");
    /// assert_eq!(op.expected_argument_type(), "AuthTestArguments");
    /// ```
    #[must_use]
    pub fn expected_argument_type(&self) -> String {
        format!("{}Arguments", self.0)
    }

    /// lowerCamelCase method name for the generated wrapper.
    #[must_use]
    pub fn method_name(&self) -> String {
        naming::to_camel_case(&self.0)
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exported argument interface name from the SDK declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArgumentTypeName(String);

impl ArgumentTypeName {
    /// Creates a new argument type name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns `true` if this declaration is the argument type for `operation`.
    ///
    /// The SDK is inconsistent about acronym casing (`APITestArguments` for
    /// `api.test`), so the comparison ignores case.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::{ArgumentTypeName, OperationName};
    ///
    /// let arg = ArgumentTypeName::new("APITestArguments");
    /// assert!(arg.matches(&OperationName::new("ApiTest")));
    /// assert!(!arg.matches(&OperationName::new("AuthTest")));
    /// ```
    #[must_use]
    pub fn matches(&self, operation: &OperationName) -> bool {
        naming::are_same_name_ignoring_case(
            Some(self.0.as_str()),
            Some(operation.expected_argument_type().as_str()),
        )
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgumentTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_path_drops_empty_segments() {
        let path = MethodPath::new(["", "chat", "", "postMessage"]);
        assert_eq!(path.segments(), ["chat", "postMessage"]);
        assert_eq!(path.to_string(), "chat.postMessage");
    }

    #[test]
    fn test_method_path_child() {
        let root = MethodPath::root();
        assert!(root.is_root());
        let chat = root.child("chat");
        let post = chat.child("postMessage");
        assert_eq!(post, MethodPath::parse("chat.postMessage"));
        assert_eq!(chat.child(""), chat);
    }

    #[test]
    fn test_operation_name_from_path() {
        let op = OperationName::from_path(&MethodPath::parse("usergroups.users.list"));
        assert_eq!(op.as_str(), "UsergroupsUsersList");
        assert_eq!(op.method_name(), "usergroupsUsersList");
    }

    #[test]
    fn test_argument_type_matching_is_case_insensitive() {
        let arg = ArgumentTypeName::new("chatPostMessageArguments");
        assert!(arg.matches(&OperationName::new("ChatPostMessage")));
        assert!(!arg.matches(&OperationName::new("ChatPostMessageX")));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut names = vec![
            OperationName::new("UsersList"),
            OperationName::new("AuthTest"),
            OperationName::new("ChatUpdate"),
        ];
        names.sort();
        assert_eq!(names[0].as_str(), "AuthTest");
        assert_eq!(names[2].as_str(), "UsersList");
    }
}
