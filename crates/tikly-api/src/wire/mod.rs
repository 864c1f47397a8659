// Wire-level value types
//
// `Command` is what goes out, `Sentence` is one reply row, `Reply` is the
// full answer to a command. `framing` turns sentences into bytes and back.

pub mod framing;

use std::fmt;

/// An ordered list of words: a command path followed by attribute,
/// query, or `numbers` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    words: Vec<String>,
}

impl Command {
    /// Start a command with its path, e.g. `/ip/firewall/filter/print`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            words: vec![path.into()],
        }
    }

    /// Append an `=name=value` attribute word.
    pub fn attr(mut self, name: &str, value: impl AsRef<str>) -> Self {
        self.push_attr(name, value);
        self
    }

    /// Append a `?name=value` query word.
    pub fn query(mut self, name: &str, value: impl AsRef<str>) -> Self {
        self.words.push(format!("?{name}={}", value.as_ref()));
        self
    }

    /// Append `=numbers=<id>`, the item selector used by `remove`.
    pub fn numbers(self, id: impl AsRef<str>) -> Self {
        self.attr("numbers", id)
    }

    pub fn push_attr(&mut self, name: &str, value: impl AsRef<str>) {
        self.words.push(format!("={name}={}", value.as_ref()));
    }

    /// The command path (first word).
    pub fn path(&self) -> &str {
        self.words.first().map_or("", String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Space-joined words, with any password attribute masked.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if word.starts_with("=password=") {
                f.write_str("=password=***")?;
            } else {
                f.write_str(word)?;
            }
        }
        Ok(())
    }
}

/// One reply row: key/value pairs in the order the device sent them.
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pairs: Vec<(String, String)>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parse attribute words (`=key=value`) into a sentence.
    ///
    /// Words without the leading `=` (tags, API attributes such as
    /// `.tag=...`) are skipped. The value may itself contain `=`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sentence = Self::new();
        for word in words {
            let Some(attr) = word.as_ref().strip_prefix('=') else {
                continue;
            };
            match attr.split_once('=') {
                Some((key, value)) => sentence.insert(key, value),
                None => sentence.insert(attr, ""),
            }
        }
        sentence
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Sentence {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut sentence = Self::new();
        for (k, v) in iter {
            sentence.insert(k, v);
        }
        sentence
    }
}

/// The complete answer to one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// One entry per `!re` sentence, in arrival order.
    pub rows: Vec<Sentence>,
    /// Attributes carried by the terminating `!done` sentence.
    pub done: Sentence,
}

impl Reply {
    /// The out-of-band `ret` value, e.g. the id assigned by an `add`.
    pub fn ret(&self) -> Option<&str> {
        self.done.get("ret")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_builders_produce_wire_tokens() {
        let cmd = Command::new("/ip/address/print").query(".id", "*1");
        assert_eq!(cmd.words(), ["/ip/address/print", "?.id=*1"]);

        let cmd = Command::new("/ip/address/remove").numbers("*1");
        assert_eq!(cmd.words(), ["/ip/address/remove", "=numbers=*1"]);
        assert_eq!(cmd.path(), "/ip/address/remove");
    }

    #[test]
    fn display_masks_password() {
        let cmd = Command::new("/login")
            .attr("name", "admin")
            .attr("password", "hunter2");
        assert_eq!(cmd.to_string(), "/login =name=admin =password=***");
    }

    #[test]
    fn sentence_parses_values_containing_equals() {
        let s = Sentence::from_words(["=.id=*A", "=comment=a=b", "=flag", ".tag=3"]);
        assert_eq!(s.get(".id"), Some("*A"));
        assert_eq!(s.get("comment"), Some("a=b"));
        assert_eq!(s.get("flag"), Some(""));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn sentence_keys_are_unique() {
        let s: Sentence = [("a", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(s.len(), 1);
        assert_eq!(s.get("a"), Some("2"));
    }

    #[test]
    fn reply_exposes_ret() {
        let reply = Reply {
            rows: Vec::new(),
            done: [("ret", "*7")].into_iter().collect(),
        };
        assert_eq!(reply.ret(), Some("*7"));
        assert_eq!(Reply::default().ret(), None);
    }
}
