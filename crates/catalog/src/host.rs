//! Flattened host record and the metadata parsed from its command.

use crate::types::Leaf;
use regex::Regex;
use std::sync::LazyLock;

/// Separator between path segments and the name in [`Host::title`].
pub const TITLE_SEPARATOR: &str = " / ";

/// `user@host` where the user part may be empty.
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w*)@([\w.-]+)").expect("address pattern should be a valid regex")
});

/// A launchable host from the catalog with metadata parsed from its command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Display label of the leaf.
    pub name: String,
    /// Launch command, unmodified.
    pub cmd: String,
    /// Category names from the root down to this host.
    pub path: Vec<String>,
    /// Address after the first `@` in the command.
    pub ip: Option<String>,
    /// Word immediately before that `@`.
    pub user: Option<String>,
    /// Text after the first `#`, trimmed. Empty without a `#`.
    pub comment: String,
}

impl Host {
    /// Builds a host from a leaf, parsing address and comment from its command.
    #[must_use]
    pub fn from_leaf(path: Vec<String>, leaf: &Leaf) -> Self {
        let (user, ip) = parse_address(&leaf.cmd);

        Self {
            name: leaf.name.clone(),
            cmd: leaf.cmd.clone(),
            path,
            ip,
            user,
            comment: parse_comment(&leaf.cmd),
        }
    }

    /// Path segments and name joined by [`TITLE_SEPARATOR`].
    #[must_use]
    pub fn title(&self) -> String {
        self.path
            .iter()
            .map(String::as_str)
            .chain([self.name.as_str()])
            .collect::<Vec<_>>()
            .join(TITLE_SEPARATOR)
    }

    /// Terms a list front end searches: path segments, name, command and address.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.path
            .iter()
            .map(String::as_str)
            .chain([self.name.as_str(), self.cmd.as_str()])
            .chain(self.ip.as_deref())
    }

    /// Case-insensitive match where every whitespace-separated term of
    /// `query` must occur in some keyword. An empty query matches.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let keywords: Vec<String> = self.keywords().map(str::to_lowercase).collect();

        query.split_whitespace().all(|term| {
            let term = term.to_lowercase();
            keywords.iter().any(|keyword| keyword.contains(&term))
        })
    }
}

fn parse_comment(cmd: &str) -> String {
    cmd.split_once('#')
        .map(|(_, comment)| comment.trim().to_string())
        .unwrap_or_default()
}

fn parse_address(cmd: &str) -> (Option<String>, Option<String>) {
    let Some(captures) = ADDRESS.captures(cmd) else {
        return (None, None);
    };

    let user = captures
        .get(1)
        .map(|m| m.as_str())
        .filter(|user| !user.is_empty())
        .map(str::to_string);
    let ip = captures.get(2).map(|m| m.as_str().to_string());

    (user, ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(cmd: &str) -> Host {
        let leaf = Leaf {
            name: "Test".into(),
            cmd: cmd.into(),
        };
        Host::from_leaf(vec![], &leaf)
    }

    #[test]
    fn test_user_ip_and_comment() {
        let host = host("ssh user1@10.0.0.5 # secretpw");
        assert_eq!(host.user.as_deref(), Some("user1"));
        assert_eq!(host.ip.as_deref(), Some("10.0.0.5"));
        assert_eq!(host.comment, "secretpw");
    }

    #[test]
    fn test_without_comment() {
        let host = host("ssh admin@db.internal.example");
        assert_eq!(host.comment, "");
        assert_eq!(host.ip.as_deref(), Some("db.internal.example"));
        assert_eq!(host.user.as_deref(), Some("admin"));
    }

    #[test]
    fn test_without_address() {
        let host = host("echo hello");
        assert!(host.ip.is_none());
        assert!(host.user.is_none());
        assert_eq!(host.comment, "");
    }

    #[test]
    fn test_hyphenated_host() {
        let host = host("ssh -p 2222 deploy@web-01.example.com");
        assert_eq!(host.ip.as_deref(), Some("web-01.example.com"));
        assert_eq!(host.user.as_deref(), Some("deploy"));
    }

    #[test]
    fn test_address_without_user() {
        let host = host("ssh @bastion");
        assert_eq!(host.ip.as_deref(), Some("bastion"));
        assert!(host.user.is_none());
    }

    #[test]
    fn test_first_address_wins() {
        let host = host("ssh -J jump@gw alice@inner # via gw");
        assert_eq!(host.user.as_deref(), Some("jump"));
        assert_eq!(host.ip.as_deref(), Some("gw"));
    }

    #[test]
    fn test_comment_splits_on_first_hash() {
        let host = host("ssh a@b #  pass#word  ");
        assert_eq!(host.comment, "pass#word");
    }

    #[test]
    fn test_cmd_is_unmodified() {
        let host = host("  ssh a@b # x ");
        assert_eq!(host.cmd, "  ssh a@b # x ");
    }

    #[test]
    fn test_title() {
        let leaf = Leaf {
            name: "Web".into(),
            cmd: "ssh root@web".into(),
        };
        let host = Host::from_leaf(vec!["Prod".into(), "EU".into()], &leaf);
        assert_eq!(host.title(), "Prod / EU / Web");
    }

    #[test]
    fn test_title_at_root() {
        assert_eq!(host("ssh a@b").title(), "Test");
    }

    #[test]
    fn test_keywords() {
        let leaf = Leaf {
            name: "Web".into(),
            cmd: "ssh root@web".into(),
        };
        let host = Host::from_leaf(vec!["Prod".into()], &leaf);
        let keywords: Vec<_> = host.keywords().collect();
        assert_eq!(keywords, ["Prod", "Web", "ssh root@web", "web"]);
    }

    #[test]
    fn test_keywords_without_ip() {
        let h = host("echo hi");
        let keywords: Vec<_> = h.keywords().collect();
        assert_eq!(keywords, ["Test", "echo hi"]);
    }

    #[test]
    fn test_matches() {
        let leaf = Leaf {
            name: "Database".into(),
            cmd: "ssh admin@10.1.2.3".into(),
        };
        let host = Host::from_leaf(vec!["Staging".into()], &leaf);

        assert!(host.matches(""));
        assert!(host.matches("data"));
        assert!(host.matches("STAGING 10.1"));
        assert!(!host.matches("staging prod"));
    }
}
