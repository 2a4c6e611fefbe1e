use crate::errors::ConfigError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

// String literals are matched first so that calls inside them are left alone.
static CALL_SITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`[^`]*`)|\b([A-Za-z_][A-Za-z0-9_]*)(\s*\()"#)
        .expect("call site pattern")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

static QUALIFIED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("qualified identifier pattern")
});

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Renames calls to `from(` into `to(`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: &str, to: &str) -> Result<Self, ConfigError> {
        if !is_identifier(from) || !QUALIFIED_IDENTIFIER.is_match(to) {
            return Err(ConfigError::InvalidRewriteRule(format!("{}={}", from, to)));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

impl FromStr for RewriteRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidRewriteRule(s.to_string()))?;
        Self::new(from.trim(), to.trim()).map_err(|_| ConfigError::InvalidRewriteRule(s.to_string()))
    }
}

impl Display for RewriteRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}={}", self.from, self.to)
    }
}

/// Ordered table of call renames applied to every emitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// A table with no rules; values pass through untouched.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Qt's QML translation functions mapped to their C++ counterparts.
    pub fn qt_translations() -> Self {
        let rules = [
            ("qsTr", "tr"),
            ("qsTrId", "qtTrId"),
            ("qsTranslate", "QCoreApplication::translate"),
        ]
        .into_iter()
        .map(|(from, to)| RewriteRule {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect();
        Self { rules }
    }

    /// Add a rule. A rule for an already mapped name replaces it in place.
    pub fn insert(&mut self, rule: RewriteRule) {
        match self.rules.iter_mut().find(|r| r.from == rule.from) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.from == name)
            .map(|r| r.to.as_str())
    }

    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.rules.is_empty() {
            return Cow::Borrowed(value);
        }

        CALL_SITE.replace_all(value, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            match self.lookup(&caps[2]) {
                Some(to) => format!("{}{}", to, &caps[3]),
                None => caps[0].to_string(),
            }
        })
    }
}

impl Default for RewriteTable {
    fn default() -> Self {
        Self::qt_translations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_rewrites_qs_tr() {
        let table = RewriteTable::default();
        assert_eq!(table.apply(r#"qsTr("Apple")"#), r#"tr("Apple")"#);
        assert_eq!(table.apply(r#"qsTrId("id-apple")"#), r#"qtTrId("id-apple")"#);
        assert_eq!(
            table.apply(r#"qsTranslate("Fruit", "Apple")"#),
            r#"QCoreApplication::translate("Fruit", "Apple")"#
        );
    }

    #[test]
    fn test_only_whole_call_names_are_rewritten() {
        let table = RewriteTable::default();
        assert_eq!(table.apply("myqsTr(x)"), "myqsTr(x)");
        assert_eq!(table.apply("qsTr"), "qsTr");
        assert_eq!(table.apply("qsTr (\"a\")"), "tr (\"a\")");
        assert_eq!(table.apply("2.45"), "2.45");
    }

    #[test]
    fn test_string_literals_are_untouched() {
        let table = RewriteTable::default();
        assert_eq!(table.apply(r#""call qsTr(x)""#), r#""call qsTr(x)""#);
        assert_eq!(
            table.apply(r#"qsTr("say \"qsTr(\" twice")"#),
            r#"tr("say \"qsTr(\" twice")"#
        );
        assert_eq!(table.apply("'qsTr(a)'"), "'qsTr(a)'");
        assert_eq!(table.apply("`qsTr(x)`"), "`qsTr(x)`");
        assert_eq!(table.apply("qsTr(`a`) + `qsTr(b)`"), "tr(`a`) + `qsTr(b)`");
    }

    #[test]
    fn test_empty_table_passes_through() {
        let table = RewriteTable::empty();
        assert!(matches!(table.apply("qsTr(\"a\")"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_insert_overrides_existing_rule() {
        let mut table = RewriteTable::default();
        table.insert("qsTr=QObject::tr".parse().unwrap());
        table.insert("loadIcon=QIcon::fromTheme".parse().unwrap());

        assert_eq!(table.rules().len(), 4);
        assert_eq!(table.rules()[0].to, "QObject::tr");
        assert_eq!(table.apply("qsTr(\"a\")"), "QObject::tr(\"a\")");
        assert_eq!(table.apply("loadIcon(\"edit\")"), "QIcon::fromTheme(\"edit\")");
    }

    #[test]
    fn test_parse_rule() {
        let rule: RewriteRule = " qsTr = tr ".parse().unwrap();
        assert_eq!(rule.from, "qsTr");
        assert_eq!(rule.to, "tr");
        assert_eq!(rule.to_string(), "qsTr=tr");

        assert!("qsTr".parse::<RewriteRule>().is_err());
        assert!("qs-Tr=tr".parse::<RewriteRule>().is_err());
        assert!("qsTr=".parse::<RewriteRule>().is_err());
        assert!("A::b=tr".parse::<RewriteRule>().is_err());
    }
}
